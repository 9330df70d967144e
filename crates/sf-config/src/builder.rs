//! Controller builder and parameter migration.

use sf_smc::{
    AdaptiveSmc, ClassicalSmc, Controller, HybridAdaptiveStaSmc, SmcLaw, SuperTwistingSmc,
    SurfaceGains, VariantKind,
};

use crate::deprecation::{
    accepted_params, lookup, table, DeprecationAction, DeprecationEvent, DeprecationSeverity,
};
use crate::error::ConfigError;
use crate::params::{get_or, ParamMap};

/// Default actuator limit (newtons) when the request does not set one.
pub const DEFAULT_MAX_FORCE: f64 = 150.0;
/// Default boundary-layer width when the request does not set one.
pub const DEFAULT_BOUNDARY_LAYER: f64 = 0.05;

/// One controller instantiation request: variant name, flat gain vector,
/// flat parameter map.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub variant: String,
    pub gains: Vec<f64>,
    pub params: ParamMap,
}

impl BuildRequest {
    pub fn new(variant: impl Into<String>, gains: Vec<f64>) -> Self {
        Self {
            variant: variant.into(),
            gains,
            params: ParamMap::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: f64) -> Self {
        self.params.insert(key.into(), value);
        self
    }
}

/// Result of a successful build.
#[derive(Debug)]
pub struct BuildOutput {
    /// The configured controller, state initialized.
    pub controller: Controller,
    /// One event per migrated or dropped parameter key.
    pub deprecations: Vec<DeprecationEvent>,
    /// Soft-constraint violations (flagged, not rejected).
    pub warnings: Vec<String>,
    /// The parameter map actually used, after migration.
    pub effective_params: ParamMap,
}

/// Explicit builder object; instantiate one and pass it around.
#[derive(Debug, Default, Clone)]
pub struct ControllerBuilder;

impl ControllerBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build a configured controller from a raw request.
    ///
    /// Unknown or deprecated parameter keys never fail the build; they are
    /// migrated or dropped with an event. Arity and variant-name problems
    /// are fatal to this call only.
    pub fn build(&self, request: &BuildRequest) -> Result<BuildOutput, ConfigError> {
        let kind =
            VariantKind::parse(&request.variant).ok_or_else(|| ConfigError::UnknownVariant {
                name: request.variant.clone(),
            })?;

        let expected = kind.gain_count();
        if request.gains.len() != expected {
            return Err(ConfigError::WrongArity {
                variant: kind.as_str(),
                expected,
                got: request.gains.len(),
            });
        }

        let (effective_params, deprecations) = migrate_params(kind, &request.params);

        let mut warnings = Vec::new();
        if !kind.gain_dominance_ok(&request.gains) {
            warnings.push(format!(
                "{}: first algorithmic gain must dominate the second (K1 > K2) \
                 for finite-time convergence; got K1={}, K2={}",
                kind, request.gains[0], request.gains[1]
            ));
        }

        let law = build_law(kind, &request.gains, &effective_params)?;

        Ok(BuildOutput {
            controller: Controller::new(law),
            deprecations,
            warnings,
            effective_params,
        })
    }

    /// Ordered human-readable remediation strings for a variant's deprecated
    /// parameter keys. Purely informational; consistent with `build`.
    pub fn migration_guide(&self, kind: VariantKind) -> Vec<String> {
        table(kind)
            .map(|rec| match rec.replacement {
                Some(new_key) => format!("rename `{}` to `{}`: {}", rec.old, new_key, rec.note),
                None => format!("remove `{}`: {}", rec.old, rec.note),
            })
            .collect()
    }
}

/// Split a raw map into the accepted effective map plus deprecation events.
fn migrate_params(kind: VariantKind, raw: &ParamMap) -> (ParamMap, Vec<DeprecationEvent>) {
    let accepted = accepted_params(kind);
    let mut effective = ParamMap::new();
    let mut events = Vec::new();

    for (key, value) in raw {
        if accepted.contains(&key.as_str()) {
            effective.insert(key.clone(), *value);
            continue;
        }

        match lookup(kind, key) {
            Some(rec) => match rec.replacement {
                Some(new_key) => {
                    // An explicit value under the new name wins over the
                    // migrated one
                    if !raw.contains_key(new_key) {
                        effective.insert(new_key.to_string(), *value);
                    }
                    events.push(DeprecationEvent {
                        key: key.clone(),
                        action: DeprecationAction::Renamed(new_key),
                        severity: DeprecationSeverity::Warning,
                        message: format!("`{}` renamed to `{}`: {}", key, new_key, rec.note),
                    });
                }
                None => {
                    events.push(DeprecationEvent {
                        key: key.clone(),
                        action: DeprecationAction::Dropped,
                        severity: DeprecationSeverity::Error,
                        message: format!("`{}` dropped: {}", key, rec.note),
                    });
                }
            },
            None => {
                events.push(DeprecationEvent {
                    key: key.clone(),
                    action: DeprecationAction::Dropped,
                    severity: DeprecationSeverity::Error,
                    message: format!("`{}` is not a {} parameter; dropped", key, kind),
                });
            }
        }
    }

    (effective, events)
}

fn build_law(kind: VariantKind, gains: &[f64], params: &ParamMap) -> Result<SmcLaw, ConfigError> {
    let max_force = get_or(params, "max_force", DEFAULT_MAX_FORCE);
    let boundary_layer = get_or(params, "boundary_layer", DEFAULT_BOUNDARY_LAYER);

    let law = match kind {
        VariantKind::Classical => {
            let surface = SurfaceGains::new(gains[0], gains[1], gains[2], gains[3])?;
            let law = ClassicalSmc::new(surface, gains[4], gains[5], max_force)?
                .with_surface_feedback(get_or(params, "surface_feedback", 1.0));
            SmcLaw::Classical(law)
        }
        VariantKind::SuperTwisting => {
            let surface = SurfaceGains::new(gains[2], gains[3], gains[4], gains[5])?;
            let law =
                SuperTwistingSmc::new(gains[0], gains[1], surface, boundary_layer, max_force)?;
            SmcLaw::SuperTwisting(law)
        }
        VariantKind::Adaptive => {
            let surface = SurfaceGains::new(gains[0], gains[1], gains[2], gains[3])?;
            let law = AdaptiveSmc::new(surface, gains[4], boundary_layer, max_force)?
                .with_dead_zone(get_or(params, "dead_zone", 0.0))
                .with_gain_range(
                    get_or(params, "k_min", 0.0),
                    get_or(params, "k_max", 1e3),
                    get_or(params, "k_init", 0.0),
                )
                .with_leak(get_or(params, "leak", 0.0))
                .with_surface_feedback(get_or(params, "surface_feedback", 1.0));
            SmcLaw::Adaptive(law)
        }
        VariantKind::HybridAdaptiveSta => {
            let law = HybridAdaptiveStaSmc::new(
                gains[0],
                gains[1],
                gains[2],
                gains[3],
                boundary_layer,
                max_force,
            )?
            .with_reaching_gains(
                get_or(params, "k1_reaching", 2.0 * gains[0]),
                get_or(params, "k2_reaching", 2.0 * gains[1]),
            )
            .with_adaptation(
                get_or(params, "adapt_rate", 0.5),
                get_or(params, "k1_max", 100.0),
                get_or(params, "k2_max", 100.0),
            )
            .with_mode_band(
                get_or(params, "sigma_threshold", 0.5),
                get_or(params, "hysteresis", 0.1),
            )?
            .with_integral_limit(get_or(params, "u_int_limit", max_force));
            SmcLaw::HybridAdaptiveSta(law)
        }
    };
    Ok(law)
}
