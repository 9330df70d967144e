//! Multi-objective cost for a candidate gain vector.
//!
//! The cost decomposes into a damping-constraint penalty and a weighted
//! performance term. Constraint handling is soft: candidates outside the
//! damping band pay a quadratic penalty but remain comparable, so the swarm
//! can travel through infeasible regions instead of stalling at their edge.

use sf_smc::VariantKind;

use crate::perf::{
    damping_ratio, estimated_overshoot, estimated_settling_time, robustness_margin,
};

/// Cap on the settling-time term, so the total cost stays finite even for
/// undamped candidates inside the bounds.
pub const SETTLING_CAP: f64 = 1e3;

/// Externally supplied objective weights.
#[derive(Debug, Clone, PartialEq)]
pub struct CostWeights {
    /// Weight on the worst-pair estimated overshoot.
    pub overshoot: f64,
    /// Weight on the worst-pair estimated settling time.
    pub settling: f64,
    /// Weight on the summed algorithmic gains (actuator effort proxy).
    pub effort: f64,
    /// Weight on the robustness margin (rewarded, hence subtracted).
    pub robustness: f64,
    /// Weight on the quadratic damping-band penalty.
    pub damping_penalty: f64,
    /// Target damping ratio for every surface pole pair.
    pub zeta_target: f64,
    /// Half-width of the acceptable damping band.
    pub zeta_tol: f64,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            overshoot: 1.0,
            settling: 1.0,
            effort: 0.1,
            robustness: 1.0,
            damping_penalty: 100.0,
            zeta_target: 0.7,
            zeta_tol: 0.1,
        }
    }
}

/// Quadratic penalty for surface pole pairs whose damping ratio leaves the
/// band `[zeta_target - zeta_tol, zeta_target + zeta_tol]`.
pub fn damping_penalty(kind: VariantKind, gains: &[f64], weights: &CostWeights) -> f64 {
    let lo = weights.zeta_target - weights.zeta_tol;
    let hi = weights.zeta_target + weights.zeta_tol;

    kind.surface_pairs(gains)
        .iter()
        .map(|&(k, lam)| {
            let zeta = damping_ratio(k, lam);
            let dist = if zeta < lo {
                lo - zeta
            } else if zeta > hi {
                zeta - hi
            } else {
                0.0
            };
            weights.damping_penalty * dist * dist
        })
        .sum()
}

/// Total objective value for one candidate.
///
/// Always finite for any candidate inside the search bounds; constraint
/// violation raises cost but never invalidates a particle.
pub fn cost(kind: VariantKind, gains: &[f64], weights: &CostWeights) -> f64 {
    let mut max_overshoot: f64 = 0.0;
    let mut max_settling: f64 = 0.0;
    let mut min_margin = f64::INFINITY;

    for (k, lam) in kind.surface_pairs(gains) {
        let zeta = damping_ratio(k, lam);
        max_overshoot = max_overshoot.max(estimated_overshoot(zeta));
        max_settling = max_settling.max(estimated_settling_time(k, lam, zeta).min(SETTLING_CAP));
        min_margin = min_margin.min(robustness_margin(zeta, weights.zeta_target));
    }

    let effort: f64 = kind.algorithmic_gains(gains).iter().sum();

    weights.overshoot * max_overshoot
        + weights.settling * max_settling
        + weights.effort * effort
        - weights.robustness * 10.0 * min_margin
        + damping_penalty(kind, gains, weights)
}
