//! Binary-search font sizing against the surface's text metrics.

use super::constants::{DEFAULT_FONT_SIZE, FONT_FIT_TOLERANCE, MIN_FONT_SIZE};
use super::surface::RasterSurface;

/// Largest size at most `starting_size` (or the default when `None`) whose
/// measured `sample` width fits `max_width`, floored at [`MIN_FONT_SIZE`].
///
/// The search stops once bracketed within [`FONT_FIT_TOLERANCE`] pixels and
/// returns the fitting side of the bracket, so the result never overflows as
/// long as the floor itself fits.
pub fn fit_font_size<S: RasterSurface + ?Sized>(
    surface: &S,
    starting_size: Option<f32>,
    max_width: f32,
    sample: &str,
) -> f32 {
    let start = starting_size.unwrap_or(DEFAULT_FONT_SIZE).max(MIN_FONT_SIZE);

    if surface.measure_text(sample, start) <= max_width {
        return start;
    }
    if surface.measure_text(sample, MIN_FONT_SIZE) > max_width {
        return MIN_FONT_SIZE;
    }

    let mut lo = MIN_FONT_SIZE;
    let mut hi = start;
    while hi - lo > FONT_FIT_TOLERANCE {
        let mid = (lo + hi) / 2.0;
        if surface.measure_text(sample, mid) > max_width {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    lo
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::RecordingSurface;

    #[test]
    fn test_returns_starting_size_when_it_fits() {
        let surface = RecordingSurface::new(200.0, 100.0);
        // "abcd" at size 6 measures 12 px.
        let size = fit_font_size(&surface, Some(6.0), 20.0, "abcd");
        assert_eq!(size, 6.0);
    }

    #[test]
    fn test_shrinks_to_fit() {
        let surface = RecordingSurface::new(200.0, 100.0);
        let sample = "a long team name";
        let max_width = 30.0;
        let size = fit_font_size(&surface, Some(6.0), max_width, sample);
        assert!(surface.measure_text(sample, size) <= max_width);
        assert!(size >= MIN_FONT_SIZE);
        // Within tolerance of the optimum.
        assert!(
            surface.measure_text(sample, size + FONT_FIT_TOLERANCE * 2.0) > max_width,
            "size {} is not near-optimal",
            size
        );
    }

    #[test]
    fn test_floors_at_minimum_size() {
        let surface = RecordingSurface::new(200.0, 100.0);
        // Even the minimum size overflows 3 px for this sample.
        let size = fit_font_size(&surface, Some(6.0), 3.0, "wider than three");
        assert_eq!(size, MIN_FONT_SIZE);
    }

    #[test]
    fn test_deterministic() {
        let surface = RecordingSurface::new(200.0, 100.0);
        let a = fit_font_size(&surface, Some(6.0), 17.0, "Quizzards");
        let b = fit_font_size(&surface, Some(6.0), 17.0, "Quizzards");
        assert_eq!(a, b);
    }

    #[test]
    fn test_never_overflows_when_floor_fits() {
        let surface = RecordingSurface::new(200.0, 100.0);
        for chars in 1..40 {
            let sample: String = "x".repeat(chars);
            for max_width in [5.0_f32, 10.0, 20.0, 40.0] {
                if surface.measure_text(&sample, MIN_FONT_SIZE) > max_width {
                    continue;
                }
                let size = fit_font_size(&surface, None, max_width, &sample);
                assert!(
                    surface.measure_text(&sample, size) <= max_width,
                    "overflow for {} chars at max_width {}",
                    chars,
                    max_width
                );
            }
        }
    }
}
