//! Variant dispatch and the stateful advance contract.
//!
//! [`Controller`] owns one law configuration and its matching internal state
//! behind a closed pair of tagged enums. Dispatch is a `match` on the tag;
//! there is no trait object and no allocation on the per-step path.
//!
//! # Fail-safe hold
//!
//! `advance` never returns an error. If any input is non-finite the previous
//! control force is returned unchanged, the internal state is left
//! unmodified, and the step is marked [`StepStatus::HeldNonFinite`]. Logging
//! the fault is the caller's job; the hot path stays silent.

use serde::{Deserialize, Serialize};
use sf_core::PlantState;

use crate::adaptive::{AdaptiveSmc, AdaptiveState};
use crate::classical::ClassicalSmc;
use crate::hybrid::{HybridAdaptiveStaSmc, HybridState};
use crate::super_twisting::{StaState, SuperTwistingSmc};
use crate::variant::VariantKind;

/// Closed set of control-law variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SmcLaw {
    Classical(ClassicalSmc),
    SuperTwisting(SuperTwistingSmc),
    Adaptive(AdaptiveSmc),
    HybridAdaptiveSta(HybridAdaptiveStaSmc),
}

impl SmcLaw {
    /// Variant tag of this law.
    pub fn kind(&self) -> VariantKind {
        match self {
            SmcLaw::Classical(_) => VariantKind::Classical,
            SmcLaw::SuperTwisting(_) => VariantKind::SuperTwisting,
            SmcLaw::Adaptive(_) => VariantKind::Adaptive,
            SmcLaw::HybridAdaptiveSta(_) => VariantKind::HybridAdaptiveSta,
        }
    }

    /// Actuator limit of this law.
    pub fn max_force(&self) -> f64 {
        match self {
            SmcLaw::Classical(l) => l.max_force,
            SmcLaw::SuperTwisting(l) => l.max_force,
            SmcLaw::Adaptive(l) => l.max_force,
            SmcLaw::HybridAdaptiveSta(l) => l.max_force,
        }
    }
}

/// Per-variant internal state payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SmcState {
    /// Classical SMC carries no state.
    Classical,
    SuperTwisting(StaState),
    Adaptive(AdaptiveState),
    HybridAdaptiveSta(HybridState),
}

/// Outcome flag of a single control step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepStatus {
    /// Law evaluated normally.
    Nominal,
    /// A non-finite input was seen; the previous force was held.
    HeldNonFinite,
}

/// Result of one control step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// Saturated control force (newtons).
    pub force: f64,
    /// Nominal, or fail-safe hold.
    pub status: StepStatus,
}

/// A configured control law plus its exclusive internal state.
///
/// One controller instance serves one trajectory; instances are independent
/// and can run in parallel, each owned by its own control loop.
#[derive(Debug, Clone, PartialEq)]
pub struct Controller {
    law: SmcLaw,
    state: SmcState,
    last_force: f64,
}

impl Controller {
    /// Instantiate a controller with the documented initial state for its
    /// variant (all zeros, except where the law overrides it).
    pub fn new(law: SmcLaw) -> Self {
        let state = match &law {
            SmcLaw::Classical(_) => SmcState::Classical,
            SmcLaw::SuperTwisting(_) => SmcState::SuperTwisting(StaState::default()),
            SmcLaw::Adaptive(l) => SmcState::Adaptive(l.initial_state()),
            SmcLaw::HybridAdaptiveSta(l) => SmcState::HybridAdaptiveSta(l.initial_state()),
        };
        Self {
            law,
            state,
            last_force: 0.0,
        }
    }

    pub fn law(&self) -> &SmcLaw {
        &self.law
    }

    pub fn state(&self) -> &SmcState {
        &self.state
    }

    /// Force returned by the most recent `advance` (zero before the first).
    pub fn last_force(&self) -> f64 {
        self.last_force
    }

    pub fn kind(&self) -> VariantKind {
        self.law.kind()
    }

    /// Advance one control step: compute the saturated force and mutate the
    /// internal state exactly once.
    ///
    /// Inputs with non-finite components (or a non-finite/negative `dt`)
    /// trigger the fail-safe hold instead of propagating NaN into the plant.
    pub fn advance(&mut self, plant: &PlantState, dt: f64) -> Step {
        if !plant.is_finite() || !dt.is_finite() || dt < 0.0 {
            return Step {
                force: self.last_force,
                status: StepStatus::HeldNonFinite,
            };
        }

        let (next_state, force) = match (&self.law, &self.state) {
            (SmcLaw::Classical(l), SmcState::Classical) => {
                (SmcState::Classical, l.update(plant))
            }
            (SmcLaw::SuperTwisting(l), SmcState::SuperTwisting(s)) => {
                let (next, force) = l.update(s, plant, dt);
                (SmcState::SuperTwisting(next), force)
            }
            (SmcLaw::Adaptive(l), SmcState::Adaptive(s)) => {
                let (next, force) = l.update(s, plant, dt);
                (SmcState::Adaptive(next), force)
            }
            (SmcLaw::HybridAdaptiveSta(l), SmcState::HybridAdaptiveSta(s)) => {
                let (next, force) = l.update(s, plant, dt);
                (SmcState::HybridAdaptiveSta(next), force)
            }
            _ => unreachable!("law/state pairing is fixed at construction"),
        };

        self.state = next_state;
        self.last_force = force;
        Step {
            force,
            status: StepStatus::Nominal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::SurfaceGains;

    fn sta_controller() -> Controller {
        let surface = SurfaceGains::new(12.0, 6.0, 4.85, 3.43).unwrap();
        let law = SuperTwistingSmc::new(8.0, 5.0, surface, 0.05, 150.0).unwrap();
        Controller::new(SmcLaw::SuperTwisting(law))
    }

    #[test]
    fn nominal_step_updates_state_and_force() {
        let mut c = sta_controller();
        let plant = PlantState::new(0.0, 0.1, -0.05, 0.0, 0.2, 0.0);
        let step = c.advance(&plant, 0.01);
        assert_eq!(step.status, StepStatus::Nominal);
        assert_eq!(step.force, c.last_force());
        match c.state() {
            SmcState::SuperTwisting(s) => assert_ne!(s.sigma_prev, 0.0),
            _ => panic!("wrong state payload"),
        }
    }

    #[test]
    fn non_finite_plant_holds_previous_force() {
        let mut c = sta_controller();
        let good = PlantState::new(0.0, 0.1, -0.05, 0.0, 0.2, 0.0);
        let step1 = c.advance(&good, 0.01);
        let state_before = *c.state();

        let bad = PlantState::new(0.0, f64::NAN, 0.0, 0.0, 0.0, 0.0);
        let step2 = c.advance(&bad, 0.01);
        assert_eq!(step2.status, StepStatus::HeldNonFinite);
        assert_eq!(step2.force, step1.force);
        assert_eq!(*c.state(), state_before);
    }

    #[test]
    fn non_finite_dt_holds_previous_force() {
        let mut c = sta_controller();
        let plant = PlantState::new(0.0, 0.1, 0.0, 0.0, 0.0, 0.0);
        c.advance(&plant, 0.01);
        let held = c.advance(&plant, f64::NAN);
        assert_eq!(held.status, StepStatus::HeldNonFinite);
        let held = c.advance(&plant, -0.01);
        assert_eq!(held.status, StepStatus::HeldNonFinite);
    }

    #[test]
    fn hold_before_first_step_returns_zero() {
        let mut c = sta_controller();
        let bad = PlantState::new(f64::INFINITY, 0.0, 0.0, 0.0, 0.0, 0.0);
        let step = c.advance(&bad, 0.01);
        assert_eq!(step.force, 0.0);
        assert_eq!(step.status, StepStatus::HeldNonFinite);
    }

    #[test]
    fn classical_controller_is_stateless() {
        let surface = SurfaceGains::new(5.0, 3.0, 2.0, 1.5).unwrap();
        let law = ClassicalSmc::new(surface, 20.0, 0.05, 150.0).unwrap();
        let mut c = Controller::new(SmcLaw::Classical(law));
        let plant = PlantState::new(0.0, 0.1, 0.0, 0.0, 0.0, 0.0);
        let f1 = c.advance(&plant, 0.01).force;
        let f2 = c.advance(&plant, 0.01).force;
        assert_eq!(f1, f2);
        assert_eq!(*c.state(), SmcState::Classical);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn force_never_exceeds_limit(
                theta1 in -3.0_f64..3.0,
                theta2 in -3.0_f64..3.0,
                theta1_dot in -10.0_f64..10.0,
                theta2_dot in -10.0_f64..10.0,
                k in 1.0_f64..30.0,
                lam in 0.1_f64..10.0,
                switch_gain in 0.0_f64..100.0,
            ) {
                let surface = SurfaceGains::new(k, k, lam, lam).unwrap();
                let plant = PlantState::new(0.0, theta1, theta2, 0.0, theta1_dot, theta2_dot);

                let classical = ClassicalSmc::new(surface, switch_gain, 0.05, 150.0).unwrap();
                let mut c = Controller::new(SmcLaw::Classical(classical));
                prop_assert!(c.advance(&plant, 1e-3).force.abs() <= 150.0);

                let sta = SuperTwistingSmc::new(8.0, 5.0, surface, 0.05, 150.0).unwrap();
                let mut c = Controller::new(SmcLaw::SuperTwisting(sta));
                for _ in 0..20 {
                    prop_assert!(c.advance(&plant, 1e-3).force.abs() <= 150.0);
                }
            }

            #[test]
            fn sta_zero_dt_force_is_stable(
                alg1 in 1.0_f64..50.0,
                alg2 in 0.5_f64..30.0,
                k in 1.0_f64..30.0,
                lam in 0.1_f64..10.0,
                theta1 in -1.0_f64..1.0,
            ) {
                let surface = SurfaceGains::new(k, k, lam, lam).unwrap();
                let sta = SuperTwistingSmc::new(alg1, alg2, surface, 0.05, 150.0).unwrap();
                let mut c = Controller::new(SmcLaw::SuperTwisting(sta));
                let plant = PlantState::new(0.0, theta1, 0.0, 0.0, 0.0, 0.0);

                let f1 = c.advance(&plant, 0.0).force;
                let f2 = c.advance(&plant, 0.0).force;
                prop_assert_eq!(f1, f2);
            }
        }
    }
}
