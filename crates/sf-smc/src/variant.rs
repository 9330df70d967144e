//! Variant names, gain arities, and gain-vector layout.
//!
//! The gain vector is a flat ordered list of reals whose length and entry
//! roles depend on the variant. This module is the single source of truth
//! for that layout; the builder checks arity against it and the tuner uses
//! it to find the surface pole pairs and the algorithmic gains.

use serde::{Deserialize, Serialize};

/// Tag for the four control-law variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariantKind {
    /// `classical_smc`: gains `[k1, k2, lam1, lam2, K, phi]`.
    Classical,
    /// `sta_smc`: gains `[K1, K2, k1, k2, lam1, lam2]`.
    SuperTwisting,
    /// `adaptive_smc`: gains `[k1, k2, lam1, lam2, gamma]`.
    Adaptive,
    /// `hybrid_adaptive_sta_smc`: gains `[k1_init, k2_init, lam1, lam2]`.
    HybridAdaptiveSta,
}

impl VariantKind {
    /// Every variant, in declaration order.
    pub const ALL: [VariantKind; 4] = [
        VariantKind::Classical,
        VariantKind::SuperTwisting,
        VariantKind::Adaptive,
        VariantKind::HybridAdaptiveSta,
    ];

    /// Parse a variant name as it appears in configuration requests.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "classical_smc" => Some(VariantKind::Classical),
            "sta_smc" => Some(VariantKind::SuperTwisting),
            "adaptive_smc" => Some(VariantKind::Adaptive),
            "hybrid_adaptive_sta_smc" => Some(VariantKind::HybridAdaptiveSta),
            _ => None,
        }
    }

    /// Canonical configuration name.
    pub fn as_str(&self) -> &'static str {
        match self {
            VariantKind::Classical => "classical_smc",
            VariantKind::SuperTwisting => "sta_smc",
            VariantKind::Adaptive => "adaptive_smc",
            VariantKind::HybridAdaptiveSta => "hybrid_adaptive_sta_smc",
        }
    }

    /// Fixed gain-vector arity for this variant.
    pub fn gain_count(&self) -> usize {
        match self {
            VariantKind::Classical => 6,
            VariantKind::SuperTwisting => 6,
            VariantKind::Adaptive => 5,
            VariantKind::HybridAdaptiveSta => 4,
        }
    }

    /// Human-readable entry roles, in order.
    pub fn describe_gains(&self) -> &'static str {
        match self {
            VariantKind::Classical => "[k1, k2, lam1, lam2, K, phi]",
            VariantKind::SuperTwisting => "[K1, K2, k1, k2, lam1, lam2]",
            VariantKind::Adaptive => "[k1, k2, lam1, lam2, gamma]",
            VariantKind::HybridAdaptiveSta => "[k1_init, k2_init, lam1, lam2]",
        }
    }

    /// The two `(k, lambda)` surface pole pairs of a gain vector.
    ///
    /// The slice must have this variant's arity.
    pub fn surface_pairs(&self, gains: &[f64]) -> [(f64, f64); 2] {
        debug_assert_eq!(gains.len(), self.gain_count());
        match self {
            VariantKind::Classical | VariantKind::Adaptive | VariantKind::HybridAdaptiveSta => {
                [(gains[0], gains[2]), (gains[1], gains[3])]
            }
            VariantKind::SuperTwisting => [(gains[2], gains[4]), (gains[3], gains[5])],
        }
    }

    /// The algorithmic-gain entries of a gain vector (switching, twisting,
    /// or adaptation gains, depending on variant).
    pub fn algorithmic_gains<'a>(&self, gains: &'a [f64]) -> &'a [f64] {
        debug_assert_eq!(gains.len(), self.gain_count());
        match self {
            VariantKind::Classical => &gains[4..5],
            VariantKind::SuperTwisting => &gains[0..2],
            VariantKind::Adaptive => &gains[4..5],
            VariantKind::HybridAdaptiveSta => &gains[0..2],
        }
    }

    /// Discontinuous-gain dominance `K1 > K2` where it applies.
    ///
    /// Always true for variants without a twisting gain pair. Violations are
    /// a soft constraint: flagged at build time, penalized by the tuner,
    /// never rejected.
    pub fn gain_dominance_ok(&self, gains: &[f64]) -> bool {
        debug_assert_eq!(gains.len(), self.gain_count());
        match self {
            VariantKind::SuperTwisting | VariantKind::HybridAdaptiveSta => gains[0] > gains[1],
            VariantKind::Classical | VariantKind::Adaptive => true,
        }
    }
}

impl std::fmt::Display for VariantKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_all_names() {
        for kind in VariantKind::ALL {
            assert_eq!(VariantKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(VariantKind::parse("pid"), None);
    }

    #[test]
    fn arities_are_fixed() {
        assert_eq!(VariantKind::Classical.gain_count(), 6);
        assert_eq!(VariantKind::SuperTwisting.gain_count(), 6);
        assert_eq!(VariantKind::Adaptive.gain_count(), 5);
        assert_eq!(VariantKind::HybridAdaptiveSta.gain_count(), 4);
    }

    #[test]
    fn sta_surface_pairs_skip_algorithmic_gains() {
        let gains = [8.0, 5.0, 12.0, 6.0, 4.85, 3.43];
        let pairs = VariantKind::SuperTwisting.surface_pairs(&gains);
        assert_eq!(pairs, [(12.0, 4.85), (6.0, 3.43)]);
        assert_eq!(VariantKind::SuperTwisting.algorithmic_gains(&gains), &[8.0, 5.0]);
    }

    #[test]
    fn dominance_only_binds_twisting_variants() {
        assert!(VariantKind::SuperTwisting.gain_dominance_ok(&[8.0, 5.0, 1.0, 1.0, 1.0, 1.0]));
        assert!(!VariantKind::SuperTwisting.gain_dominance_ok(&[5.0, 8.0, 1.0, 1.0, 1.0, 1.0]));
        assert!(!VariantKind::HybridAdaptiveSta.gain_dominance_ok(&[3.0, 6.0, 1.0, 1.0]));
        assert!(VariantKind::Classical.gain_dominance_ok(&[1.0; 6]));
    }
}
