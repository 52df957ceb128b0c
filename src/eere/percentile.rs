//! Percentile threshold used to pick the targeted top-load hours.

/// Linear-interpolation percentile of `values` at fraction `p` (0.0–1.0).
///
/// Sorts ascending, computes the rank `p * (n - 1)` and interpolates
/// between the two neighbouring order statistics. `p` is clamped to
/// [0, 1]. Returns `None` for an empty slice.
///
/// # Examples
///
/// ```
/// use avert::eere::percentile::percentile;
///
/// assert_eq!(percentile(&[1.0, 2.0, 3.0, 4.0, 5.0], 0.5), Some(3.0));
/// assert_eq!(percentile(&[10.0, 20.0], 0.25), Some(12.5));
/// ```
pub fn percentile(values: &[f64], p: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}
