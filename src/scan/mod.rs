/// Scan layer: core sample types, fitting configuration, and loading.
///
/// Architecture:
/// ```text
///  .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse rows → Scan
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   Scan    │  Vec<Sample> + background/exclusion/order config
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  fit::*   │  mask → iterative fit → FitResult
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
