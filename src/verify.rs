//! Output comparison for cross-checking strategies

/// Relative difference of two values, 0 when they are equal
///
/// Below magnitude 1 the difference is taken as absolute so that values
/// near zero do not blow the ratio up. A NaN or infinity on either side
/// that is not matched bit for bit on the other is infinitely far off.
pub fn relative_error(expected: f64, actual: f64) -> f64 {
    if expected.to_bits() == actual.to_bits() {
        return 0.0;
    }
    let diff = (expected - actual).abs();
    if !diff.is_finite() {
        return f64::INFINITY;
    }
    if diff == 0.0 {
        return 0.0;
    }
    diff / expected.abs().max(actual.abs()).max(1.0)
}

/// Largest element-wise [`relative_error`], or infinity on a length mismatch
pub fn max_relative_error(expected: &[f64], actual: &[f64]) -> f64 {
    if expected.len() != actual.len() {
        return f64::INFINITY;
    }
    expected
        .iter()
        .zip(actual)
        .map(|(&e, &a)| relative_error(e, a))
        .fold(0.0, f64::max)
}

/// Index of the first element whose bit pattern differs
///
/// A length mismatch reports the shorter length.
pub fn first_bitwise_mismatch(a: &[f64], b: &[f64]) -> Option<usize> {
    let mismatch = a
        .iter()
        .zip(b)
        .position(|(x, y)| x.to_bits() != y.to_bits());
    match mismatch {
        Some(i) => Some(i),
        None if a.len() != b.len() => Some(a.len().min(b.len())),
        None => None,
    }
}

/// True when both slices hold identical bit patterns
pub fn bitwise_equal(a: &[f64], b: &[f64]) -> bool {
    first_bitwise_mismatch(a, b).is_none()
}
