//! Run configuration, validated before anything random happens.
//!
//! A [`RunConfiguration`] carries everything a run needs beyond the problem
//! itself: dimensions for cross-checking, the reference-vector lattice
//! resolution, population size, generation budget, seed, and the variation
//! and selection parameters. There is no process-wide state anywhere in
//! the crate — the configuration is passed by value into the engine.
//!
//! The central convention: `population_size` must equal the simplex-lattice
//! cardinality `C(h + m - 1, m - 1)`. A mismatch fails fast with
//! [`Error::ReferenceVectorCountMismatch`] instead of being silently
//! corrected.

use crate::error::{Error, Result};
use crate::problem::ObjectiveFunction;
use crate::reference::ReferenceVectorSet;

/// Parameters of one optimization run.
///
/// Build with [`RunConfiguration::builder`]; [`build`](RunConfigurationBuilder::build)
/// validates internal consistency, and the engine cross-checks the
/// configuration against the problem's declarations at construction.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfiguration {
    /// The expected problem name.
    pub problem_name: String,
    /// The expected number of decision variables.
    pub num_variables: usize,
    /// The expected number of objectives.
    pub num_objectives: usize,
    /// The expected number of constraints.
    pub num_constraints: usize,
    /// Das-Dennis lattice resolution (H).
    pub lattice_resolution: usize,
    /// Population size; must equal the lattice cardinality.
    pub population_size: usize,
    /// Exact number of generations to run.
    pub max_generations: usize,
    /// Seed for the engine-owned random source. `None` seeds from entropy.
    pub random_seed: Option<u64>,
    /// Whole-vector SBX crossover probability.
    pub crossover_prob: f64,
    /// SBX distribution index.
    pub crossover_eta: f64,
    /// Polynomial mutation distribution index.
    pub mutation_eta: f64,
    /// Exponent of the angle-penalized distance's progress term.
    pub alpha: f64,
    /// Generations between reference-vector adaptations. `None` derives
    /// one adaptation per tenth of the run.
    pub adaptation_frequency: Option<usize>,
}

impl RunConfiguration {
    /// Creates a builder for a [`RunConfiguration`].
    #[must_use]
    pub fn builder() -> RunConfigurationBuilder {
        RunConfigurationBuilder::default()
    }

    /// The effective adaptation cadence in generations.
    #[must_use]
    pub(crate) fn adaptation_cadence(&self) -> usize {
        self.adaptation_frequency
            .unwrap_or_else(|| self.max_generations.div_ceil(10))
            .max(1)
    }

    /// Cross-checks this configuration against a problem's declarations.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProblemMismatch`] naming the first field that
    /// disagrees with the problem.
    pub fn validate_for(&self, problem: &dyn ObjectiveFunction) -> Result<()> {
        let checks = [
            ("num_variables", self.num_variables, problem.num_variables()),
            (
                "num_objectives",
                self.num_objectives,
                problem.num_objectives(),
            ),
            (
                "num_constraints",
                self.num_constraints,
                problem.num_constraints(),
            ),
        ];
        for (field, configured, declared) in checks {
            if configured != declared {
                return Err(Error::ProblemMismatch {
                    name: problem.name().to_string(),
                    field,
                    configured,
                    declared,
                });
            }
        }
        Ok(())
    }
}

/// Builder for [`RunConfiguration`].
#[derive(Debug, Clone, Default)]
pub struct RunConfigurationBuilder {
    problem_name: Option<String>,
    num_variables: Option<usize>,
    num_objectives: Option<usize>,
    num_constraints: usize,
    lattice_resolution: Option<usize>,
    population_size: Option<usize>,
    max_generations: Option<usize>,
    random_seed: Option<u64>,
    crossover_prob: Option<f64>,
    crossover_eta: Option<f64>,
    mutation_eta: Option<f64>,
    alpha: Option<f64>,
    adaptation_frequency: Option<usize>,
}

impl RunConfigurationBuilder {
    /// Sets the expected problem name.
    #[must_use]
    pub fn problem_name(mut self, name: impl Into<String>) -> Self {
        self.problem_name = Some(name.into());
        self
    }

    /// Sets the expected number of decision variables.
    #[must_use]
    pub fn num_variables(mut self, n: usize) -> Self {
        self.num_variables = Some(n);
        self
    }

    /// Sets the expected number of objectives.
    #[must_use]
    pub fn num_objectives(mut self, m: usize) -> Self {
        self.num_objectives = Some(m);
        self
    }

    /// Sets the expected number of constraints. Default: 0.
    #[must_use]
    pub fn num_constraints(mut self, c: usize) -> Self {
        self.num_constraints = c;
        self
    }

    /// Sets the Das-Dennis lattice resolution (H).
    #[must_use]
    pub fn lattice_resolution(mut self, h: usize) -> Self {
        self.lattice_resolution = Some(h);
        self
    }

    /// Sets the population size. If unset, defaults to the lattice
    /// cardinality; if set, it must equal the cardinality exactly.
    #[must_use]
    pub fn population_size(mut self, size: usize) -> Self {
        self.population_size = Some(size);
        self
    }

    /// Sets the number of generations to run.
    #[must_use]
    pub fn max_generations(mut self, generations: usize) -> Self {
        self.max_generations = Some(generations);
        self
    }

    /// Sets the random seed for reproducibility.
    #[must_use]
    pub fn random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets the whole-vector SBX crossover probability. Default: 1.0.
    #[must_use]
    pub fn crossover_prob(mut self, prob: f64) -> Self {
        self.crossover_prob = Some(prob);
        self
    }

    /// Sets the SBX distribution index. Default: 30.0.
    #[must_use]
    pub fn crossover_eta(mut self, eta: f64) -> Self {
        self.crossover_eta = Some(eta);
        self
    }

    /// Sets the polynomial mutation distribution index. Default: 20.0.
    #[must_use]
    pub fn mutation_eta(mut self, eta: f64) -> Self {
        self.mutation_eta = Some(eta);
        self
    }

    /// Sets the angle-penalty progress exponent. Default: 2.0.
    #[must_use]
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    /// Sets the adaptation cadence in generations. If unset, the
    /// reference vectors adapt once per tenth of the run.
    #[must_use]
    pub fn adaptation_frequency(mut self, generations: usize) -> Self {
        self.adaptation_frequency = Some(generations);
        self
    }

    /// Builds the validated [`RunConfiguration`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidObjectiveCount`],
    /// [`Error::InvalidLatticeResolution`],
    /// [`Error::InvalidMaxGenerations`], or
    /// [`Error::ReferenceVectorCountMismatch`] when the population size
    /// does not equal the lattice cardinality.
    pub fn build(self) -> Result<RunConfiguration> {
        let num_objectives = self.num_objectives.unwrap_or(0);
        if num_objectives < 2 {
            return Err(Error::InvalidObjectiveCount(num_objectives));
        }

        let lattice_resolution = self.lattice_resolution.unwrap_or(0);
        if lattice_resolution < 1 {
            return Err(Error::InvalidLatticeResolution(lattice_resolution));
        }

        let max_generations = self.max_generations.unwrap_or(0);
        if max_generations < 1 {
            return Err(Error::InvalidMaxGenerations(max_generations));
        }

        let cardinality = ReferenceVectorSet::cardinality(num_objectives, lattice_resolution);
        let population_size = self.population_size.unwrap_or(cardinality);
        if population_size != cardinality {
            return Err(Error::ReferenceVectorCountMismatch {
                reference_vectors: cardinality,
                population_size,
            });
        }

        Ok(RunConfiguration {
            problem_name: self.problem_name.unwrap_or_default(),
            num_variables: self.num_variables.unwrap_or(0),
            num_objectives,
            num_constraints: self.num_constraints,
            lattice_resolution,
            population_size,
            max_generations,
            random_seed: self.random_seed,
            crossover_prob: self.crossover_prob.unwrap_or(1.0),
            crossover_eta: self.crossover_eta.unwrap_or(30.0),
            mutation_eta: self.mutation_eta.unwrap_or(20.0),
            alpha: self.alpha.unwrap_or(2.0),
            adaptation_frequency: self.adaptation_frequency,
        })
    }
}
