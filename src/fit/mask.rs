use crate::scan::model::{x_span, Sample};

/// Indices of the samples eligible for background fitting, ascending.
///
/// The configured background window is clamped to the data's x span, then
/// samples strictly inside the window are selected and samples strictly
/// inside the exclusion window are dropped again. Both comparisons are on
/// open intervals, so samples sitting exactly on a bound fall outside.
///
/// An empty result is valid here; the engine reports it as an empty-range
/// failure before attempting a regression.
pub fn background_indices(
    samples: &[Sample],
    background: (f64, f64),
    exclusion: (f64, f64),
) -> Vec<usize> {
    let Some((data_min, data_max)) = x_span(samples) else {
        return Vec::new();
    };

    // The background window never exceeds the data domain.
    let low = background.0.max(data_min);
    let high = background.1.min(data_max);
    let (excl_low, excl_high) = exclusion;

    samples
        .iter()
        .enumerate()
        .filter(|(_, s)| s.x > low && s.x < high)
        .filter(|(_, s)| !(s.x > excl_low && s.x < excl_high))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(xs: &[f64]) -> Vec<Sample> {
        xs.iter()
            .map(|&x| Sample {
                x,
                y: 0.0,
                x_err: 0.0,
                y_err: 0.0,
            })
            .collect()
    }

    #[test]
    fn window_bounds_are_exclusive() {
        let s = samples(&[0.0, 1.0, 2.0, 3.0, 4.0]);
        let idx = background_indices(&s, (1.0, 3.0), (0.0, 0.0));
        assert_eq!(idx, vec![2]);
    }

    #[test]
    fn exclusion_window_removes_interior_points() {
        let s = samples(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        let idx = background_indices(&s, (0.0, 5.0), (1.5, 3.5));
        assert_eq!(idx, vec![1, 4]);
    }

    #[test]
    fn exclusion_bounds_are_exclusive_too() {
        let s = samples(&[0.0, 1.0, 2.0, 3.0, 4.0]);
        let idx = background_indices(&s, (0.0, 4.0), (1.0, 3.0));
        // x = 1 and x = 3 sit exactly on the exclusion bounds and stay in.
        assert_eq!(idx, vec![1, 2, 3]);
    }

    #[test]
    fn window_is_clamped_to_the_data_span() {
        let s = samples(&[10.0, 11.0, 12.0, 13.0]);
        // Bounds far outside the data behave like the data's own span.
        let wide = background_indices(&s, (-1e9, 1e9), (0.0, 0.0));
        let snug = background_indices(&s, (10.0, 13.0), (0.0, 0.0));
        assert_eq!(wide, snug);
        assert_eq!(wide, vec![1, 2]);
    }

    #[test]
    fn unordered_samples_keep_acquisition_order_indices() {
        let s = samples(&[5.0, 1.0, 4.0, 2.0, 3.0]);
        let idx = background_indices(&s, (1.0, 5.0), (0.0, 0.0));
        assert_eq!(idx, vec![2, 3, 4]);
    }

    #[test]
    fn degenerate_window_selects_nothing() {
        let s = samples(&[0.0, 1.0, 2.0]);
        assert!(background_indices(&s, (1.0, 1.0), (0.0, 0.0)).is_empty());
        assert!(background_indices(&[], (0.0, 1.0), (0.0, 0.0)).is_empty());
    }
}
