//! Candidate solutions and the population that owns them.
//!
//! An [`Individual`] pairs a decision vector with a lazily computed,
//! cached objective vector. A [`Population`] owns an ordered sequence of
//! individuals for one problem instance and supports initialization,
//! evaluation, and wholesale replacement — the three operations the
//! evolution engine needs per generation.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::pareto;
use crate::problem::ObjectiveFunction;
use crate::rng_util;

/// One candidate solution: a decision vector plus its cached objective
/// vector.
///
/// The objective vector is computed lazily and cached; caching it is the
/// only permitted mutation after creation.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Individual {
    decision: Vec<f64>,
    objectives: Option<Vec<f64>>,
}

impl Individual {
    /// Creates an unevaluated individual from a decision vector.
    #[must_use]
    pub fn new(decision: Vec<f64>) -> Self {
        Self {
            decision,
            objectives: None,
        }
    }

    /// The decision vector.
    #[must_use]
    pub fn decision(&self) -> &[f64] {
        &self.decision
    }

    /// The cached objective vector, if this individual has been evaluated.
    #[must_use]
    pub fn objectives(&self) -> Option<&[f64]> {
        self.objectives.as_deref()
    }

    /// Returns `true` once the objective vector has been cached.
    #[must_use]
    pub fn is_evaluated(&self) -> bool {
        self.objectives.is_some()
    }

    /// Returns `true` if the cached objective vector exists and every
    /// component is finite.
    #[must_use]
    pub(crate) fn has_finite_objectives(&self) -> bool {
        self.objectives
            .as_ref()
            .is_some_and(|values| values.iter().all(|v| v.is_finite()))
    }

    pub(crate) fn set_objectives(&mut self, values: Vec<f64>) {
        self.objectives = Some(values);
    }
}

/// An ordered set of candidate solutions for one problem instance.
///
/// Created once per run, mutated in place each generation by the
/// [`EvolutionEngine`](crate::EvolutionEngine), and dropped at the end of
/// the run. The population size stays fixed per generation unless the
/// engine explicitly replaces its members.
pub struct Population {
    individuals: Vec<Individual>,
    problem: Arc<dyn ObjectiveFunction>,
}

impl std::fmt::Debug for Population {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Population")
            .field("individuals", &self.individuals)
            .finish_non_exhaustive()
    }
}

impl Population {
    /// Creates a population from pre-built individuals.
    #[must_use]
    pub fn new(problem: Arc<dyn ObjectiveFunction>, individuals: Vec<Individual>) -> Self {
        Self {
            individuals,
            problem,
        }
    }

    /// Creates a population of `size` random individuals drawn uniformly
    /// within the problem's variable bounds.
    ///
    /// The random source is injected so that a run's reproducibility is
    /// controlled by a single owner — typically the engine's seeded rng.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBounds`] if any variable's lower bound
    /// exceeds its upper bound.
    pub fn random(
        problem: Arc<dyn ObjectiveFunction>,
        size: usize,
        rng: &mut fastrand::Rng,
    ) -> Result<Self> {
        let (lower, upper) = problem.variable_bounds();
        validate_bounds(&lower, &upper)?;

        let individuals = (0..size)
            .map(|_| {
                let decision = lower
                    .iter()
                    .zip(&upper)
                    .map(|(&low, &high)| rng_util::f64_range(rng, low, high))
                    .collect();
                Individual::new(decision)
            })
            .collect();

        Ok(Self {
            individuals,
            problem,
        })
    }

    /// The number of individuals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Returns `true` if the population has no individuals.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// The individuals, in insertion order.
    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// The problem this population is evolved against.
    #[must_use]
    pub fn problem(&self) -> &Arc<dyn ObjectiveFunction> {
        &self.problem
    }

    /// Evaluates every individual that does not yet have a cached
    /// objective vector.
    ///
    /// With the `parallel` feature, evaluation is distributed across a
    /// rayon worker pool; results are reassembled in insertion order so
    /// downstream selection is unaffected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ObjectiveDimensionMismatch`] if the objective
    /// function returns a wrong-length vector, or the underlying error if
    /// an evaluation fails twice.
    pub fn evaluate(&mut self) -> Result<()> {
        let problem = Arc::clone(&self.problem);
        evaluate_all(problem.as_ref(), &mut self.individuals)
    }

    /// Return the Pareto-non-dominated subset of the evaluated
    /// individuals, in first-seen order.
    ///
    /// Unevaluated individuals are skipped. The result has set semantics:
    /// input order does not affect which individuals are returned.
    #[must_use]
    pub fn non_dominated(&self) -> Vec<&Individual> {
        let evaluated: Vec<&Individual> = self
            .individuals
            .iter()
            .filter(|ind| ind.is_evaluated())
            .collect();
        let values: Vec<Vec<f64>> = evaluated
            .iter()
            .map(|ind| ind.objectives().unwrap_or_default().to_vec())
            .collect();

        pareto::non_dominated_indices(&values)
            .into_iter()
            .map(|i| evaluated[i])
            .collect()
    }

    /// The objective vectors of the non-dominated front, in first-seen
    /// order.
    #[must_use]
    pub fn non_dominated_values(&self) -> Vec<Vec<f64>> {
        self.non_dominated()
            .into_iter()
            .filter_map(|ind| ind.objectives().map(<[f64]>::to_vec))
            .collect()
    }

    pub(crate) fn take_individuals(&mut self) -> Vec<Individual> {
        core::mem::take(&mut self.individuals)
    }

    pub(crate) fn replace(&mut self, individuals: Vec<Individual>) {
        self.individuals = individuals;
    }
}

pub(crate) fn validate_bounds(lower: &[f64], upper: &[f64]) -> Result<()> {
    for (index, (&low, &high)) in lower.iter().zip(upper).enumerate() {
        if low > high {
            return Err(Error::InvalidBounds { index, low, high });
        }
    }
    Ok(())
}

/// Evaluate one decision vector, retrying once on a transient failure and
/// checking the returned dimension.
fn evaluate_decision(problem: &dyn ObjectiveFunction, decision: &[f64]) -> Result<Vec<f64>> {
    let values = match problem.evaluate(decision) {
        Ok(values) => values,
        // One retry: a transient failure (e.g. external resource timeout)
        // may clear; a second failure is fatal.
        Err(_) => problem.evaluate(decision)?,
    };

    if values.len() != problem.num_objectives() {
        return Err(Error::ObjectiveDimensionMismatch {
            expected: problem.num_objectives(),
            got: values.len(),
        });
    }
    Ok(values)
}

/// Evaluate every unevaluated individual in `individuals`, caching the
/// objective vectors in place.
///
/// Evaluation order never affects the caller: results are written back in
/// the individuals' original order regardless of how the work is scheduled.
pub(crate) fn evaluate_all(
    problem: &dyn ObjectiveFunction,
    individuals: &mut [Individual],
) -> Result<()> {
    let pending: Vec<usize> = individuals
        .iter()
        .enumerate()
        .filter(|(_, ind)| !ind.is_evaluated())
        .map(|(i, _)| i)
        .collect();

    #[cfg(feature = "parallel")]
    let results: Vec<Result<Vec<f64>>> = {
        use rayon::prelude::*;

        let snapshot: &[Individual] = individuals;
        pending
            .par_iter()
            .map(|&i| evaluate_decision(problem, snapshot[i].decision()))
            .collect()
    };

    #[cfg(not(feature = "parallel"))]
    let results: Vec<Result<Vec<f64>>> = pending
        .iter()
        .map(|&i| evaluate_decision(problem, individuals[i].decision()))
        .collect();

    for (&i, result) in pending.iter().zip(results) {
        individuals[i].set_objectives(result?);
    }
    Ok(())
}
