//! Closed-form performance indicators for a gain vector.
//!
//! Each surface pole pair `(k, lambda)` implies a second-order response with
//! damping ratio `zeta = lambda / (2 * sqrt(k))`. The overshoot and settling
//! estimates below are the standard second-order-system approximations of
//! that response. They are deliberate simplifications used to score
//! candidates during tuning, not exact predictions of the physical plant.

use std::f64::consts::PI;

/// Floor applied to `k` before the square root.
pub const GAIN_EPS: f64 = 1e-12;

/// Damping ratio of one surface pole pair: `lambda / (2 * sqrt(k))`.
///
/// `k` is floored at [`GAIN_EPS`] so the result is finite and real for any
/// input in the search bounds.
pub fn damping_ratio(k: f64, lam: f64) -> f64 {
    lam / (2.0 * k.max(GAIN_EPS).sqrt())
}

/// Estimated percent overshoot of a second-order response with damping
/// ratio `zeta`.
///
/// Returns 0 for critically/over-damped (`zeta >= 1`), 100 for undamped or
/// unstable (`zeta <= 0`), and `100 * exp(-zeta * pi / sqrt(1 - zeta^2))`
/// in between.
pub fn estimated_overshoot(zeta: f64) -> f64 {
    if zeta >= 1.0 {
        0.0
    } else if zeta <= 0.0 {
        100.0
    } else {
        100.0 * (-zeta * PI / (1.0 - zeta * zeta).sqrt()).exp()
    }
}

/// Estimated 2% settling time: `4 / (zeta * sqrt(k * lambda))`.
///
/// Returns `+inf` for `zeta <= 0`.
pub fn estimated_settling_time(k: f64, lam: f64, zeta: f64) -> f64 {
    if zeta <= 0.0 {
        f64::INFINITY
    } else {
        4.0 / (zeta * (k * lam).sqrt())
    }
}

/// Robustness margin relative to a target damping ratio:
/// `1 - |zeta - target| / target`.
///
/// Not floored at zero: far-off candidates earn a negative margin so the
/// objective can keep ranking them.
pub fn robustness_margin(zeta: f64, target: f64) -> f64 {
    1.0 - (zeta - target).abs() / target
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damping_ratio_reference_values() {
        // zeta = 4.85 / (2 * sqrt(12)) and 3.43 / (2 * sqrt(6)), both ~0.700
        assert!((damping_ratio(12.0, 4.85) - 0.700).abs() < 1e-3);
        assert!((damping_ratio(6.0, 3.43) - 0.700).abs() < 1e-3);
    }

    #[test]
    fn damping_ratio_floors_small_k() {
        let zeta = damping_ratio(0.0, 1.0);
        assert!(zeta.is_finite());
        assert!(zeta > 0.0);
    }

    #[test]
    fn overshoot_reference_value() {
        // 100 * exp(-0.7 * pi / sqrt(1 - 0.49)) ~ 4.6 percent
        let os = estimated_overshoot(0.7);
        assert!((os - 4.6).abs() < 0.05, "overshoot {os}");
    }

    #[test]
    fn overshoot_boundary_cases() {
        assert_eq!(estimated_overshoot(1.0), 0.0);
        assert_eq!(estimated_overshoot(1.5), 0.0);
        assert_eq!(estimated_overshoot(0.0), 100.0);
        assert_eq!(estimated_overshoot(-0.3), 100.0);
    }

    #[test]
    fn overshoot_decreases_with_damping() {
        assert!(estimated_overshoot(0.3) > estimated_overshoot(0.5));
        assert!(estimated_overshoot(0.5) > estimated_overshoot(0.9));
    }

    #[test]
    fn settling_time_cases() {
        assert!(estimated_settling_time(12.0, 4.85, 0.7).is_finite());
        assert_eq!(estimated_settling_time(12.0, 4.85, 0.0), f64::INFINITY);
        assert_eq!(estimated_settling_time(12.0, 4.85, -1.0), f64::INFINITY);
    }

    #[test]
    fn robustness_margin_allows_negative() {
        assert!((robustness_margin(0.7, 0.7) - 1.0).abs() < 1e-12);
        assert!(robustness_margin(2.0, 0.7) < 0.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn damping_ratio_non_negative_and_finite(
                k in 0.0_f64..1e6,
                lam in 0.0_f64..1e6,
            ) {
                let zeta = damping_ratio(k, lam);
                prop_assert!(zeta >= 0.0);
                prop_assert!(zeta.is_finite());
            }

            #[test]
            fn overshoot_is_a_percentage(zeta in -10.0_f64..10.0) {
                let os = estimated_overshoot(zeta);
                prop_assert!((0.0..=100.0).contains(&os));
            }
        }
    }
}
