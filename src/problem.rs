//! The [`ObjectiveFunction`] trait defines what gets optimized.
//!
//! An objective function maps a decision vector (one real number per
//! decision variable, within declared bounds) to an objective vector. Every
//! objective component is **minimized** by convention. The function must be
//! pure: the same decision vector always yields the same objective vector.
//!
//! Benchmark suites and domain problems implement this trait and hand an
//! `Arc<dyn ObjectiveFunction>` to the engine:
//!
//! ```
//! use rvopt::ObjectiveFunction;
//!
//! /// Minimize distance to (0.25, 0.75) along two competing axes.
//! struct TwoAxes;
//!
//! impl ObjectiveFunction for TwoAxes {
//!     fn name(&self) -> &str {
//!         "two-axes"
//!     }
//!
//!     fn num_variables(&self) -> usize {
//!         2
//!     }
//!
//!     fn num_objectives(&self) -> usize {
//!         2
//!     }
//!
//!     fn variable_bounds(&self) -> (Vec<f64>, Vec<f64>) {
//!         (vec![0.0; 2], vec![1.0; 2])
//!     }
//!
//!     fn evaluate(&self, decision: &[f64]) -> rvopt::Result<Vec<f64>> {
//!         Ok(vec![
//!             (decision[0] - 0.25).abs(),
//!             (decision[1] - 0.75).abs(),
//!         ])
//!     }
//! }
//! ```

use crate::error::Result;

/// A pluggable multi-objective problem.
///
/// Implementations declare their dimensions up front so the run
/// configuration can be validated before any evaluation happens, and
/// provide [`evaluate`](ObjectiveFunction::evaluate) as the single
/// computational capability.
///
/// # Thread safety
///
/// `Send + Sync` is required so evaluation can be distributed across a
/// worker pool (feature `parallel`) without further bounds.
pub trait ObjectiveFunction: Send + Sync {
    /// A human-readable problem name, used in error reporting.
    fn name(&self) -> &str;

    /// The number of decision variables.
    fn num_variables(&self) -> usize;

    /// The number of objectives. Must be at least 2.
    fn num_objectives(&self) -> usize;

    /// The number of constraints. Constraint handling is not part of this
    /// core; the declaration exists so configurations can be cross-checked.
    fn num_constraints(&self) -> usize {
        0
    }

    /// Per-variable lower and upper decision-space limits.
    ///
    /// Both vectors must have [`num_variables`](ObjectiveFunction::num_variables)
    /// entries with `low[i] <= high[i]`.
    fn variable_bounds(&self) -> (Vec<f64>, Vec<f64>);

    /// Map a decision vector to an objective vector.
    ///
    /// Must be total over the declared bounds and return exactly
    /// [`num_objectives`](ObjectiveFunction::num_objectives) values, each
    /// minimized by convention.
    ///
    /// # Errors
    ///
    /// Implementations may fail (e.g., an external resource timeout). A
    /// failed evaluation is retried once by the caller; a second failure
    /// aborts the run with [`Error::Evaluation`](crate::Error::Evaluation).
    fn evaluate(&self, decision: &[f64]) -> Result<Vec<f64>>;
}
