//! Constrained particle-swarm optimizer over the gain space.
//!
//! Each iteration has two phases separated by a barrier:
//!
//! 1. **Evaluate**: every particle's objective is a pure function of its
//!    position, so evaluation fans out across the rayon pool. The global
//!    best is read-only during this phase.
//! 2. **Update**: a single thread folds the evaluations into personal and
//!    global bests, then positions/velocities are updated in parallel
//!    against the now-fixed global best.
//!
//! Random draws are reproducible: the base seed drives initialization, and
//! each (iteration, particle) update draws from its own sub-RNG derived from
//! the base seed, so the parallel schedule cannot perturb the result.
//!
//! The optimizer runs its fixed iteration budget to completion; there is no
//! early-stopping rule. Callers wanting stagnation detection can build it on
//! the per-iteration history in [`TuneResult`].

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use sf_smc::VariantKind;

use crate::error::TuneError;
use crate::objective::{cost, CostWeights};

/// Fraction of each bound's range used for initial velocity sampling.
const INIT_VELOCITY_SPAN: f64 = 0.1;

/// Per-gain search bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct GainBounds {
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl GainBounds {
    /// Create validated bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if the vectors differ in length, contain non-finite
    /// entries, or any lower bound is not strictly below its upper bound.
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Result<Self, TuneError> {
        if lower.len() != upper.len() {
            return Err(TuneError::BoundsMismatch {
                expected: lower.len(),
                got: upper.len(),
            });
        }
        for (lo, hi) in lower.iter().zip(&upper) {
            if !lo.is_finite() || !hi.is_finite() {
                return Err(TuneError::InvalidArg {
                    what: "bounds must be finite",
                });
            }
            if lo >= hi {
                return Err(TuneError::InvalidArg {
                    what: "each lower bound must be strictly below its upper bound",
                });
            }
        }
        Ok(Self { lower, upper })
    }

    /// Reference search bounds for a variant's gain layout.
    pub fn for_variant(kind: VariantKind) -> Self {
        let (lower, upper) = match kind {
            VariantKind::Classical => (
                vec![1.0, 1.0, 0.5, 0.5, 1.0, 0.01],
                vec![30.0, 30.0, 10.0, 10.0, 100.0, 1.0],
            ),
            VariantKind::SuperTwisting => (
                vec![2.0, 1.0, 1.0, 1.0, 0.5, 0.5],
                vec![50.0, 30.0, 30.0, 30.0, 10.0, 10.0],
            ),
            VariantKind::Adaptive => (
                vec![1.0, 1.0, 0.5, 0.5, 0.1],
                vec![30.0, 30.0, 10.0, 10.0, 10.0],
            ),
            VariantKind::HybridAdaptiveSta => {
                (vec![1.0, 0.5, 0.5, 0.5], vec![30.0, 20.0, 10.0, 10.0])
            }
        };
        Self { lower, upper }
    }

    pub fn dim(&self) -> usize {
        self.lower.len()
    }
}

/// Swarm configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PsoConfig {
    /// Number of particles.
    pub n_particles: usize,
    /// Fixed iteration budget.
    pub n_iterations: usize,
    /// Inertia weight w.
    pub inertia: f64,
    /// Cognitive acceleration c1 (pull toward the personal best).
    pub cognitive: f64,
    /// Social acceleration c2 (pull toward the global best).
    pub social: f64,
    /// Base seed; fully determines the run.
    pub seed: u64,
}

impl Default for PsoConfig {
    fn default() -> Self {
        Self {
            n_particles: 30,
            n_iterations: 100,
            inertia: 0.7,
            cognitive: 1.5,
            social: 1.5,
            seed: 0,
        }
    }
}

/// One swarm member.
#[derive(Debug, Clone)]
struct Particle {
    position: Vec<f64>,
    velocity: Vec<f64>,
    best_position: Vec<f64>,
    best_cost: f64,
}

/// Optimizer output: the swarm's global best and its trace.
#[derive(Debug, Clone)]
pub struct TuneResult {
    /// Best gain vector found.
    pub best_gains: Vec<f64>,
    /// Its objective value.
    pub best_cost: f64,
    /// Global best cost after each iteration; non-increasing.
    pub history: Vec<f64>,
}

/// Run a constrained PSO search over the variant's gain space.
pub fn tune(
    kind: VariantKind,
    bounds: &GainBounds,
    config: &PsoConfig,
    weights: &CostWeights,
) -> Result<TuneResult, TuneError> {
    if bounds.dim() != kind.gain_count() {
        return Err(TuneError::BoundsMismatch {
            expected: kind.gain_count(),
            got: bounds.dim(),
        });
    }
    if config.n_particles == 0 {
        return Err(TuneError::InvalidArg {
            what: "n_particles must be at least 1",
        });
    }
    if config.n_iterations == 0 {
        return Err(TuneError::InvalidArg {
            what: "n_iterations must be at least 1",
        });
    }

    let dim = bounds.dim();
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    let mut particles: Vec<Particle> = (0..config.n_particles)
        .map(|_| {
            let position: Vec<f64> = (0..dim)
                .map(|d| rng.gen_range(bounds.lower[d]..=bounds.upper[d]))
                .collect();
            let velocity: Vec<f64> = (0..dim)
                .map(|d| {
                    let span = INIT_VELOCITY_SPAN * (bounds.upper[d] - bounds.lower[d]);
                    rng.gen_range(-span..=span)
                })
                .collect();
            Particle {
                best_position: position.clone(),
                position,
                velocity,
                best_cost: f64::INFINITY,
            }
        })
        .collect();

    // Global best is undefined until the first evaluation; the infinite
    // sentinel cost guarantees the first sweep replaces it.
    let mut global_best_position = particles[0].position.clone();
    let mut global_best_cost = f64::INFINITY;
    let mut history = Vec::with_capacity(config.n_iterations);

    for iteration in 0..config.n_iterations {
        // Evaluate phase: pure per-particle objective, parallel
        let costs: Vec<f64> = particles
            .par_iter()
            .map(|p| cost(kind, &p.position, weights))
            .collect();

        // Best-update phase: single thread owns both best records
        for (particle, &c) in particles.iter_mut().zip(&costs) {
            if c < particle.best_cost {
                particle.best_cost = c;
                particle.best_position.clone_from(&particle.position);
            }
            if c < global_best_cost {
                global_best_cost = c;
                global_best_position.clone_from(&particle.position);
            }
        }
        history.push(global_best_cost);
        tracing::debug!(iteration, best_cost = global_best_cost, "swarm iteration");

        // Update phase: global best is fixed for the rest of the iteration
        let n_particles = config.n_particles;
        let global = &global_best_position;
        particles.par_iter_mut().enumerate().for_each(|(i, p)| {
            let sub_seed = config
                .seed
                .wrapping_add((iteration * n_particles + i) as u64 + 1);
            let mut rng = ChaCha8Rng::seed_from_u64(sub_seed);

            for d in 0..dim {
                let r1: f64 = rng.gen_range(0.0..1.0);
                let r2: f64 = rng.gen_range(0.0..1.0);
                p.velocity[d] = config.inertia * p.velocity[d]
                    + config.cognitive * r1 * (p.best_position[d] - p.position[d])
                    + config.social * r2 * (global[d] - p.position[d]);
                p.position[d] += p.velocity[d];

                // Clamp at the wall and kill the velocity component so the
                // particle does not keep accelerating into the bound
                if p.position[d] < bounds.lower[d] {
                    p.position[d] = bounds.lower[d];
                    p.velocity[d] = 0.0;
                } else if p.position[d] > bounds.upper[d] {
                    p.position[d] = bounds.upper[d];
                    p.velocity[d] = 0.0;
                }
            }
        });
    }

    Ok(TuneResult {
        best_gains: global_best_position,
        best_cost: global_best_cost,
        history,
    })
}
