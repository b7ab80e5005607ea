//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Return true if the two values are within `abs_tol` of each other.
pub fn is_close<T>(a: T, b: T, abs_tol: T) -> bool
where
    T: Float
{
    (a - b).abs() <= abs_tol
}

/// Clamp a value into the range `[min, max]`.
pub fn clamp<T>(value: &T, min: &T, max: &T) -> T 
where
    T: Float
{
    let mut ret = *value;

    if ret > *max {
        ret = *max
    }
    if ret < *min {
        ret = *min
    }

    ret
}

/// Sign of the value, treating zero (of either sign) as positive.
pub fn sign<T>(value: T) -> T
where
    T: Float
{
    if value < T::zero() {
        -T::one()
    }
    else {
        T::one()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_is_close() {
        assert!(is_close(1.0f64, 1.0 + 1e-10, 1e-9));
        assert!(!is_close(1.0f64, 1.0 + 1e-8, 1e-9));
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(&2.0f64, &-1.0, &1.0), 1.0);
        assert_eq!(clamp(&-2.0f64, &-1.0, &1.0), -1.0);
        assert_eq!(clamp(&0.5f64, &-1.0, &1.0), 0.5);
    }

    #[test]
    fn test_sign() {
        assert_eq!(sign(-0.1f64), -1.0);
        assert_eq!(sign(0.0f64), 1.0);
        assert_eq!(sign(-0.0f64), 1.0);
        assert_eq!(sign(3.0f64), 1.0);
    }
}
