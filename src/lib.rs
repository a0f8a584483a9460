#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Reference-vector-guided evolutionary multi-objective optimization.
//!
//! `rvopt` evolves a population of real-valued candidate solutions against a
//! user-supplied objective function with several objectives, all minimized by
//! convention. Selection is guided by a structured set of reference vectors
//! on the unit simplex (the RVEA scheme): each candidate is associated with
//! the reference direction of smallest angle, and survivors are chosen by an
//! angle-penalized distance that trades convergence against diversity. The
//! quality of the resulting non-dominated front is scored with an exact
//! hypervolume indicator.
//!
//! # Getting started
//!
//! ```
//! use std::sync::Arc;
//!
//! use rvopt::prelude::*;
//!
//! /// Bi-objective: minimize (x², (x−1)²) over one variable in [0, 1].
//! struct Quadratics;
//!
//! impl ObjectiveFunction for Quadratics {
//!     fn name(&self) -> &str {
//!         "quadratics"
//!     }
//!
//!     fn num_variables(&self) -> usize {
//!         1
//!     }
//!
//!     fn num_objectives(&self) -> usize {
//!         2
//!     }
//!
//!     fn variable_bounds(&self) -> (Vec<f64>, Vec<f64>) {
//!         (vec![0.0], vec![1.0])
//!     }
//!
//!     fn evaluate(&self, decision: &[f64]) -> rvopt::Result<Vec<f64>> {
//!         let x = decision[0];
//!         Ok(vec![x * x, (x - 1.0) * (x - 1.0)])
//!     }
//! }
//!
//! let config = RunConfiguration::builder()
//!     .problem_name("quadratics")
//!     .num_variables(1)
//!     .num_objectives(2)
//!     .lattice_resolution(4)
//!     .max_generations(20)
//!     .random_seed(42)
//!     .build()?;
//!
//! let engine = EvolutionEngine::new(config, Arc::new(Quadratics))?;
//! let mut reference_vectors = ReferenceVectorSet::new(2, 4)?;
//! let mut population = engine.initialize_population()?;
//! engine.evolve(&mut population, &mut reference_vectors)?;
//!
//! let front = population.non_dominated();
//! assert!(!front.is_empty());
//! # Ok::<(), rvopt::Error>(())
//! ```
//!
//! # Core concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`ObjectiveFunction`] | The problem: maps a decision vector to an objective vector. |
//! | [`Population`] | Ordered candidate solutions with lazily cached objective values. |
//! | [`ReferenceVectorSet`] | Das-Dennis simplex-lattice directions guiding selection. |
//! | [`EvolutionEngine`] | Runs generations of variation and reference-vector selection. |
//! | [`RunConfiguration`] | Caller-supplied run parameters, validated up front. |
//! | [`pareto`] | Pareto dominance and the non-dominated filter. |
//! | [`hypervolume`] | Exact hypervolume indicator over a non-dominated front. |
//!
//! # Reproducibility
//!
//! All randomness lives in a single seeded source owned by the
//! [`EvolutionEngine`]. Two runs with the same configuration and seed
//! produce bit-identical populations. Parallel evaluation (feature
//! `parallel`) reassembles results in generation order, so it never
//! perturbs the evolved trajectory.
//!
//! # Feature flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `serde` | `Serialize`/`Deserialize` on public data types | off |
//! | `tracing` | Log events via [`tracing`](https://docs.rs/tracing) at key evolution points | off |
//! | `parallel` | Objective evaluation across a rayon worker pool | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

mod config;
mod engine;
mod error;
pub mod hypervolume;
pub mod pareto;
mod population;
mod problem;
mod reference;
mod rng_util;
mod variation;

pub use config::{RunConfiguration, RunConfigurationBuilder};
pub use engine::EvolutionEngine;
pub use error::{Error, Result};
pub use population::{Individual, Population};
pub use problem::ObjectiveFunction;
pub use reference::ReferenceVectorSet;

/// Convenient wildcard import for the most common types.
///
/// ```
/// use rvopt::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{RunConfiguration, RunConfigurationBuilder};
    pub use crate::engine::EvolutionEngine;
    pub use crate::error::{Error, Result};
    pub use crate::hypervolume::{hypervolume, hypervolume_scalar_ref};
    pub use crate::pareto::{dominates, non_dominated_indices};
    pub use crate::population::{Individual, Population};
    pub use crate::problem::ObjectiveFunction;
    pub use crate::reference::ReferenceVectorSet;
}
