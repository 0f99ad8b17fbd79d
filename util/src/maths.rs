//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Map a value from one range into another.
pub fn lin_map<T>(source_range: (T, T), target_range: (T, T), value: T) -> T
where
    T: Float,
{
    target_range.0
        + ((value - source_range.0) * (target_range.1 - target_range.0)
            / (source_range.1 - source_range.0))
}

/// Clamp a value into the range [0, 1].
pub fn clamp01<T>(value: T) -> T
where
    T: Float,
{
    let zero = T::from(0).unwrap();
    let one = T::from(1).unwrap();

    if value < zero {
        zero
    } else if value > one {
        one
    } else {
        value
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_lin_map() {
        assert_eq!(lin_map((0f64, 1f64), (0f64, 10f64), 0.5), 5.0);
        assert_eq!(lin_map((0f64, 1f64), (2f64, 4f64), 0.0), 2.0);
        assert_eq!(lin_map((0f64, 1f64), (2f64, 4f64), 1.0), 4.0);
        assert_eq!(lin_map((-1f64, 1f64), (0f64, 1f64), 0.0), 0.5);
    }

    #[test]
    fn test_clamp01() {
        assert_eq!(clamp01(-0.5f64), 0.0);
        assert_eq!(clamp01(0.25f64), 0.25);
        assert_eq!(clamp01(1.5f64), 1.0);
    }
}
