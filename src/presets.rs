use serde::Serialize;

/// A published background/exclusion window for a known absorption band.
///
/// These are the customary windows for water and carbonate bands in
/// silicate glasses. They are starting points for manual adjustment, not
/// instrument calibrations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandPreset {
    /// Short display name of the band.
    pub name: &'static str,
    /// Background window (low, high) in wavenumbers.
    pub background: (f64, f64),
    /// Exclusion window (low, high) in wavenumbers.
    pub exclusion: (f64, f64),
    /// Polynomial order of the background fit.
    pub fit_order: usize,
}

/// 3500 cm⁻¹ total-water band.
pub const H2O_3500: BandPreset = BandPreset {
    name: "3500",
    background: (2400.0, 4000.0),
    exclusion: (2590.0, 3788.0),
    fit_order: 1,
};

/// 4500 cm⁻¹ hydroxyl combination band.
pub const OH_4500: BandPreset = BandPreset {
    name: "4500",
    background: (4050.0, 5072.0),
    exclusion: (4300.0, 4600.0),
    fit_order: 3,
};

/// 5200 cm⁻¹ molecular-water combination band.
pub const H2O_5200: BandPreset = BandPreset {
    name: "5200",
    background: (4710.0, 5960.0),
    exclusion: (5138.0, 5280.0),
    fit_order: 3,
};

/// Carbonate doublet.
pub const CO3: BandPreset = BandPreset {
    name: "CO3",
    background: (1242.0, 2038.0),
    exclusion: (1362.0, 1770.0),
    fit_order: 3,
};

/// Alternative, wider carbonate window.
pub const CO3_ALT: BandPreset = BandPreset {
    name: "CO3 (2)",
    background: (1499.0, 2339.0),
    exclusion: (1551.0, 2058.0),
    fit_order: 5,
};

/// All published presets, in menu order.
pub fn all() -> &'static [BandPreset] {
    &[H2O_3500, OH_4500, H2O_5200, CO3, CO3_ALT]
}
