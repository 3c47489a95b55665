//! Decorative trend series for the key metric sparklines.
//!
//! The dashboard keeps no real history of its aggregates, so each cycle walks
//! backwards from the current value to invent a short lead-in.

use rand::Rng;

/// Number of synthetic points before the current value.
pub const TREND_POINTS: usize = 10;

/// Build a random-walk series that ends with `current`.
///
/// Returns `TREND_POINTS + 1` values; each step moves by at most
/// `max_variation / 2`.
pub fn synthetic_trend<R: Rng + ?Sized>(current: f64, max_variation: f64, rng: &mut R) -> Vec<f64> {
    let mut series = Vec::with_capacity(TREND_POINTS + 1);
    let mut value = current;

    for _ in 0..TREND_POINTS {
        value += (rng.gen::<f64>() * 2.0 - 1.0) * (max_variation / 2.0);
        series.push(value);
    }

    // Generated backwards in time
    series.reverse();
    series.push(current);
    series
}

/// Normalize values to 0-7 for 8 sparkline bar levels.
///
/// Returns an empty Vec if there are fewer than 2 values. A flat series maps
/// to the lowest level.
pub fn sparkline_levels(values: &[f64]) -> Vec<u8> {
    if values.len() < 2 {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if !range.is_finite() || range <= f64::EPSILON {
        return vec![0; values.len()];
    }

    values
        .iter()
        .map(|&v| {
            let normalized = ((v - min) / range * 7.0).round() as u8;
            normalized.min(7)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_trend_ends_with_current() {
        let mut rng = StdRng::seed_from_u64(1);
        let series = synthetic_trend(42.5, 5.0, &mut rng);
        assert_eq!(series.len(), TREND_POINTS + 1);
        assert_eq!(*series.last().unwrap(), 42.5);
    }

    #[test]
    fn test_trend_steps_are_bounded() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..100 {
            let series = synthetic_trend(97.0, 1.0, &mut rng);
            for pair in series.windows(2) {
                assert!((pair[1] - pair[0]).abs() <= 0.5 + 1e-9);
            }
        }
    }

    #[test]
    fn test_sparkline_levels_span_full_range() {
        let levels = sparkline_levels(&[1.0, 2.0, 3.0, 8.0]);
        assert_eq!(levels.first(), Some(&0));
        assert_eq!(levels.last(), Some(&7));
        assert!(levels.iter().all(|&l| l <= 7));
    }

    #[test]
    fn test_sparkline_levels_flat_and_short() {
        assert_eq!(sparkline_levels(&[5.0, 5.0, 5.0]), vec![0, 0, 0]);
        assert!(sparkline_levels(&[5.0]).is_empty());
    }
}
