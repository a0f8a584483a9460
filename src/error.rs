#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when the simplex-lattice cardinality does not equal the
    /// configured population size.
    #[error(
        "reference vector count mismatch: lattice yields {reference_vectors} vectors but population size is {population_size}"
    )]
    ReferenceVectorCountMismatch {
        /// The number of reference vectors produced by the lattice.
        reference_vectors: usize,
        /// The configured population size.
        population_size: usize,
    },

    /// Returned when fewer than two objectives are requested.
    #[error("invalid objective count: {0} (at least 2 objectives required)")]
    InvalidObjectiveCount(usize),

    /// Returned when the lattice resolution is zero.
    #[error("invalid lattice resolution: {0} (must be at least 1)")]
    InvalidLatticeResolution(usize),

    /// Returned when a decision variable's lower bound exceeds its upper bound.
    #[error("invalid bounds for variable {index}: low ({low}) must be less than or equal to high ({high})")]
    InvalidBounds {
        /// The index of the offending decision variable.
        index: usize,
        /// The lower bound value.
        low: f64,
        /// The upper bound value.
        high: f64,
    },

    /// Returned when the generation budget is zero.
    #[error("invalid max generations: {0} (must be at least 1)")]
    InvalidMaxGenerations(usize),

    /// Returned when a configuration field disagrees with what the problem
    /// declares.
    #[error(
        "configuration does not match problem '{name}': {field} is {configured} but the problem declares {declared}"
    )]
    ProblemMismatch {
        /// The problem's declared name.
        name: String,
        /// The configuration field in disagreement.
        field: &'static str,
        /// The configured value.
        configured: usize,
        /// The value the problem declares.
        declared: usize,
    },

    /// Returned when a generation's merged pool cannot fill the target
    /// population size with finite-valued individuals.
    #[error("insufficient population: needed {needed} individuals, merged pool provided {got}")]
    InsufficientPopulation {
        /// The configured population size.
        needed: usize,
        /// The number of usable individuals in the merged pool.
        got: usize,
    },

    /// Returned when the hypervolume reference point does not strictly
    /// dominate every front member.
    #[error(
        "invalid reference point: front value {front_value} in objective {objective} is not strictly below reference value {reference_value}"
    )]
    InvalidReferencePoint {
        /// The objective index where domination fails.
        objective: usize,
        /// The offending front member's value in that objective.
        front_value: f64,
        /// The reference point's value in that objective.
        reference_value: f64,
    },

    /// Returned when the objective function returns the wrong number of values.
    #[error("objective dimension mismatch: expected {expected} values, got {got}")]
    ObjectiveDimensionMismatch {
        /// The expected number of objective values.
        expected: usize,
        /// The actual number of objective values returned.
        got: usize,
    },

    /// Returned when an objective evaluation fails after one retry.
    #[error("evaluation failed: {0}")]
    Evaluation(String),
}

pub type Result<T> = core::result::Result<T, Error>;
