//! Shared arithmetic helpers for the vector routines.

/// Dot product over the common prefix of both slices.
pub(crate) fn dot(left: &[f64], right: &[f64]) -> f64 {
    left.iter().zip(right).map(|(&l, &r)| l * r).sum()
}

/// Euclidean norm.
pub(crate) fn norm(values: &[f64]) -> f64 {
    dot(values, values).sqrt()
}

/// Returns `values` scaled to unit length.
///
/// A zero vector yields non-finite components; callers validate magnitudes
/// before normalising user input.
pub(crate) fn normalize(values: &[f64]) -> Vec<f64> {
    let magnitude = norm(values);
    values.iter().map(|&value| value / magnitude).collect()
}

/// Scales `values` to unit length in place.
pub(crate) fn normalize_in_place(values: &mut [f64]) {
    let magnitude = norm(values);
    for value in values.iter_mut() {
        *value /= magnitude;
    }
}

/// Returns `left + scale * right`, element-wise.
pub(crate) fn add_scaled(left: &[f64], scale: f64, right: &[f64]) -> Vec<f64> {
    left.iter()
        .zip(right)
        .map(|(&l, &r)| scale.mul_add(r, l))
        .collect()
}
