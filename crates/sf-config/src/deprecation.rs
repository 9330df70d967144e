//! Per-variant parameter deprecation tables.
//!
//! Each table entry maps an old parameter key to its replacement (if it was
//! renamed) or to nothing (if the key is invalid for the variant). Tables
//! are immutable compile-time data; the builder consults them while
//! migrating a request and emits one event per affected key.

use serde::Serialize;
use sf_smc::VariantKind;

/// Severity of a deprecation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeprecationSeverity {
    /// The key was understood and migrated.
    Warning,
    /// The key was invalid for this variant and dropped.
    Error,
}

/// What the migration did with the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeprecationAction {
    /// Value copied to the new key; old key dropped.
    Renamed(&'static str),
    /// Key dropped; the variant default applies.
    Dropped,
}

/// One deprecation-table record.
#[derive(Debug, Clone, Copy)]
pub struct Deprecation {
    /// Old parameter key.
    pub old: &'static str,
    /// New key, or `None` when the key has no counterpart.
    pub replacement: Option<&'static str>,
    /// Human-readable remediation note.
    pub note: &'static str,
}

/// Event emitted while migrating one request.
#[derive(Debug, Clone, Serialize)]
pub struct DeprecationEvent {
    /// The offending key as it appeared in the request.
    pub key: String,
    pub action: DeprecationAction,
    pub severity: DeprecationSeverity,
    /// Ready-to-log message.
    pub message: String,
}

const COMMON: &[Deprecation] = &[
    Deprecation {
        old: "epsilon",
        replacement: Some("boundary_layer"),
        note: "the boundary-layer width parameter was renamed",
    },
    Deprecation {
        old: "saturation_limit",
        replacement: Some("max_force"),
        note: "the actuator limit parameter was renamed",
    },
];

const CLASSICAL: &[Deprecation] = &[
    Deprecation {
        old: "boundary_layer",
        replacement: None,
        note: "classical_smc takes the boundary-layer width as the sixth gain entry",
    },
    Deprecation {
        old: "epsilon",
        replacement: None,
        note: "classical_smc takes the boundary-layer width as the sixth gain entry",
    },
    Deprecation {
        old: "gamma",
        replacement: None,
        note: "classical_smc has no adaptation law",
    },
    Deprecation {
        old: "dead_zone",
        replacement: None,
        note: "classical_smc has no adaptation dead zone",
    },
];

const SUPER_TWISTING: &[Deprecation] = &[Deprecation {
    old: "gamma",
    replacement: None,
    note: "sta_smc has no adaptation law",
}];

const ADAPTIVE: &[Deprecation] = &[
    Deprecation {
        old: "dead_band",
        replacement: Some("dead_zone"),
        note: "the adaptation dead-zone parameter was renamed",
    },
    Deprecation {
        old: "gamma",
        replacement: None,
        note: "adaptive_smc takes gamma as the fifth gain entry, not a parameter",
    },
];

const HYBRID: &[Deprecation] = &[
    Deprecation {
        old: "switch_threshold",
        replacement: Some("sigma_threshold"),
        note: "the mode-switch threshold parameter was renamed",
    },
    Deprecation {
        old: "gamma",
        replacement: None,
        note: "hybrid_adaptive_sta_smc adapts its twisting gains, not a switching gain",
    },
];

/// Deprecation table for one variant (common entries first).
pub fn table(kind: VariantKind) -> impl Iterator<Item = &'static Deprecation> {
    let specific = match kind {
        VariantKind::Classical => CLASSICAL,
        VariantKind::SuperTwisting => SUPER_TWISTING,
        VariantKind::Adaptive => ADAPTIVE,
        VariantKind::HybridAdaptiveSta => HYBRID,
    };
    // Variant entries shadow common ones for the same key
    specific.iter().chain(COMMON.iter())
}

/// Parameter keys the variant accepts as-is.
pub fn accepted_params(kind: VariantKind) -> &'static [&'static str] {
    match kind {
        VariantKind::Classical => &["max_force", "surface_feedback"],
        VariantKind::SuperTwisting => &["max_force", "boundary_layer"],
        VariantKind::Adaptive => &[
            "max_force",
            "boundary_layer",
            "dead_zone",
            "k_min",
            "k_max",
            "k_init",
            "leak",
            "surface_feedback",
        ],
        VariantKind::HybridAdaptiveSta => &[
            "max_force",
            "boundary_layer",
            "adapt_rate",
            "k1_max",
            "k2_max",
            "k1_reaching",
            "k2_reaching",
            "sigma_threshold",
            "hysteresis",
            "u_int_limit",
        ],
    }
}

/// Find the table record for a key, if any.
pub fn lookup(kind: VariantKind, key: &str) -> Option<&'static Deprecation> {
    table(kind).find(|d| d.old == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_inherits_common_renames() {
        for kind in VariantKind::ALL {
            let rec = lookup(kind, "saturation_limit").unwrap();
            assert_eq!(rec.replacement, Some("max_force"));
        }
    }

    #[test]
    fn variant_entry_shadows_common_one() {
        // Classical redefines "boundary_layer"-adjacent keys; its own
        // "epsilon" lookup must still resolve, but a specific record wins
        // when both exist for one key.
        let rec = lookup(VariantKind::Classical, "boundary_layer").unwrap();
        assert_eq!(rec.replacement, None);
    }

    #[test]
    fn replacements_point_at_accepted_keys() {
        for kind in VariantKind::ALL {
            for rec in table(kind) {
                if let Some(new_key) = rec.replacement {
                    // Classical routes "epsilon" into its gain vector, so its
                    // rename target is allowed to be absent from the params
                    if kind == VariantKind::Classical && new_key == "boundary_layer" {
                        continue;
                    }
                    assert!(
                        accepted_params(kind).contains(&new_key),
                        "{kind}: rename target {new_key} is not accepted"
                    );
                }
            }
        }
    }
}
