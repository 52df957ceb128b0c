//! Severity scoring for hourly limit exceedances.

/// Severity scale for the region-specific soft limit.
pub const SOFT_SCALE: f64 = 15.0;
/// Severity scale for the fixed hard limit.
pub const HARD_SCALE: f64 = 30.0;
/// Hard limit as a percentage of hourly load.
pub const HARD_LIMIT_PERCENT: f64 = 30.0;

/// Scores how far `calculated` exceeds `limit`, both compared by magnitude.
///
/// Returns `0.0` when `|calculated| <= |limit|`; otherwise
/// `(|calculated| / |limit| - 1) * scale + scale`, so any exceedance scores
/// at least `scale` and soft/hard scores stay comparable.
///
/// `limit` must be non-zero. Callers guarantee this by rejecting zero-load
/// hours before scoring.
///
/// # Examples
///
/// ```
/// use avert::eere::exceedance::exceedance;
///
/// assert_eq!(exceedance(-10.0, -15.0, 15.0), 0.0);
/// assert_eq!(exceedance(-30.0, -15.0, 15.0), 30.0);
/// ```
pub fn exceedance(calculated: f64, limit: f64, scale: f64) -> f64 {
    let calculated = calculated.abs();
    let limit = limit.abs();
    if calculated <= limit {
        return 0.0;
    }
    (calculated / limit - 1.0) * scale + scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn within_limit_scores_zero() {
        assert_eq!(exceedance(-10.0, -15.0, SOFT_SCALE), 0.0);
        assert_eq!(exceedance(15.0, -15.0, SOFT_SCALE), 0.0);
        assert_eq!(exceedance(0.0, -15.0, HARD_SCALE), 0.0);
    }

    #[test]
    fn any_exceedance_scores_at_least_scale() {
        let s = exceedance(-15.0001, -15.0, SOFT_SCALE);
        assert!(s > SOFT_SCALE);
        assert!(s < SOFT_SCALE + 0.01);
    }

    #[test]
    fn severity_grows_with_overshoot() {
        // 20 against 15: (20/15 - 1) * 15 + 15 = 20
        assert!((exceedance(-20.0, -15.0, SOFT_SCALE) - 20.0).abs() < 1e-9);
        // 60 against 30 on the hard scale: (2 - 1) * 30 + 30 = 60
        assert!((exceedance(-60.0, -30.0, HARD_SCALE) - 60.0).abs() < 1e-9);
        assert!(exceedance(-25.0, -15.0, SOFT_SCALE) > exceedance(-20.0, -15.0, SOFT_SCALE));
    }

    #[test]
    fn sign_is_ignored() {
        assert_eq!(
            exceedance(20.0, 15.0, SOFT_SCALE),
            exceedance(-20.0, -15.0, SOFT_SCALE)
        );
    }
}
