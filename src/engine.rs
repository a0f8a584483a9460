//! The reference-vector-guided evolution engine.
//!
//! Each generation proceeds as follows:
//!
//! 1. **Variation** — offspring decision vectors via SBX crossover and
//!    polynomial mutation, parents paired uniformly at random.
//! 2. **Evaluation** — offspring objective vectors computed through the
//!    problem and cached on the new individuals.
//! 3. **Merge** — parent and offspring pools combined; individuals with
//!    non-finite objective values are dropped.
//! 4. **Association** — every candidate, translated by the ideal point,
//!    is assigned to the reference vector of smallest angle (exact ties
//!    go to the lowest vector index).
//! 5. **Selection** — within each association group candidates are ranked
//!    by angle-penalized distance; one elite survives per non-empty group
//!    and remaining slots are filled by globally smallest penalized
//!    distance, ties broken by insertion order.
//!
//! The engine runs exactly `max_generations` generations — there is no
//! early stopping — and owns the run's only random source, so a fixed
//! seed reproduces the evolved population bit for bit.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::RunConfiguration;
use crate::error::{Error, Result};
use crate::population::{self, Individual, Population};
use crate::problem::ObjectiveFunction;
use crate::reference::{self, ReferenceVectorSet};
use crate::rng_util;
use crate::variation;

/// Evolves a [`Population`] against an [`ObjectiveFunction`] under
/// reference-vector guidance.
///
/// Create with [`EvolutionEngine::new`]; the configuration is validated
/// against the problem's declarations before the engine exists. Apart
/// from its random source the engine is stateless between calls.
pub struct EvolutionEngine {
    config: RunConfiguration,
    problem: Arc<dyn ObjectiveFunction>,
    lower: Vec<f64>,
    upper: Vec<f64>,
    state: Mutex<EngineState>,
}

struct EngineState {
    rng: fastrand::Rng,
}

impl std::fmt::Debug for EvolutionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvolutionEngine")
            .field("config", &self.config)
            .field("lower", &self.lower)
            .field("upper", &self.upper)
            .finish_non_exhaustive()
    }
}

impl EvolutionEngine {
    /// Creates an engine for `problem` under `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProblemMismatch`] if the configuration's declared
    /// dimensions disagree with the problem's, or
    /// [`Error::InvalidBounds`] if the problem's variable bounds are
    /// inverted.
    pub fn new(config: RunConfiguration, problem: Arc<dyn ObjectiveFunction>) -> Result<Self> {
        config.validate_for(problem.as_ref())?;

        let (lower, upper) = problem.variable_bounds();
        population::validate_bounds(&lower, &upper)?;

        let rng = config
            .random_seed
            .map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);

        Ok(Self {
            config,
            problem,
            lower,
            upper,
            state: Mutex::new(EngineState { rng }),
        })
    }

    /// The validated run configuration.
    #[must_use]
    pub fn config(&self) -> &RunConfiguration {
        &self.config
    }

    /// Creates the initial population: `population_size` random decision
    /// vectors drawn from the engine's random source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBounds`] if the problem's bounds are
    /// inverted.
    pub fn initialize_population(&self) -> Result<Population> {
        let state = &mut *self.state.lock();
        Population::random(
            Arc::clone(&self.problem),
            self.config.population_size,
            &mut state.rng,
        )
    }

    /// Runs exactly `max_generations` generations of variation and
    /// reference-vector-guided selection, replacing the population's
    /// members in place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReferenceVectorCountMismatch`] if the reference
    /// set's cardinality differs from the configured population size,
    /// [`Error::ProblemMismatch`] if it spans the wrong number of
    /// objectives, [`Error::InsufficientPopulation`] if a generation's
    /// merged pool cannot fill the target size with finite-valued
    /// individuals, and any evaluation error from the objective function.
    pub fn evolve(
        &self,
        population: &mut Population,
        reference_vectors: &mut ReferenceVectorSet,
    ) -> Result<()> {
        if reference_vectors.num_objectives() != self.config.num_objectives {
            return Err(Error::ProblemMismatch {
                name: self.problem.name().to_string(),
                field: "reference vector num_objectives",
                configured: reference_vectors.num_objectives(),
                declared: self.config.num_objectives,
            });
        }
        reference_vectors.validate_population_size(self.config.population_size)?;

        let state = &mut *self.state.lock();
        let target = self.config.population_size;
        let max_generations = self.config.max_generations;
        let cadence = self.config.adaptation_cadence();

        population.evaluate()?;
        let mut gamma = reference_vectors.min_neighbor_angles();

        for generation in 0..max_generations {
            let offspring = self.generate_offspring(&mut state.rng, population);

            let mut merged = population.take_individuals();
            merged.extend(offspring);
            population::evaluate_all(self.problem.as_ref(), &mut merged)?;

            let pool_size = merged.len();
            let usable: Vec<Individual> = merged
                .into_iter()
                .filter(Individual::has_finite_objectives)
                .collect();
            if usable.len() < target {
                return Err(Error::InsufficientPopulation {
                    needed: target,
                    got: usable.len(),
                });
            }
            if usable.len() < pool_size {
                trace_debug!(
                    generation,
                    dropped = pool_size - usable.len(),
                    "dropped non-finite individuals from merged pool"
                );
            }

            let values: Vec<&[f64]> = usable
                .iter()
                .map(|ind| ind.objectives().unwrap_or_default())
                .collect();
            let ideal = component_min(&values);

            #[allow(clippy::cast_precision_loss)]
            let progress = (generation as f64 / max_generations as f64).powf(self.config.alpha);
            let selected = apd_select(&values, &ideal, reference_vectors, &gamma, progress, target);

            let survivors: Vec<Individual> = usable
                .into_iter()
                .enumerate()
                .filter(|(i, _)| selected[*i])
                .map(|(_, ind)| ind)
                .collect();
            population.replace(survivors);

            if (generation + 1) % cadence == 0 && generation + 1 < max_generations {
                let objective_values: Vec<&[f64]> = population
                    .individuals()
                    .iter()
                    .map(|ind| ind.objectives().unwrap_or_default())
                    .collect();
                let ideal = component_min(&objective_values);
                let nadir = component_max(&objective_values);
                reference_vectors.adapt(&ideal, &nadir);
                gamma = reference_vectors.min_neighbor_angles();
                trace_info!(generation, "adapted reference vectors to objective ranges");
            }

            trace_debug!(generation, population = population.len(), "generation done");
        }

        Ok(())
    }

    /// Produce `population_size` offspring from the current parents.
    fn generate_offspring(
        &self,
        rng: &mut fastrand::Rng,
        population: &Population,
    ) -> Vec<Individual> {
        let target = self.config.population_size;
        let parents: Vec<&[f64]> = population
            .individuals()
            .iter()
            .map(Individual::decision)
            .collect();

        let mut offspring = Vec::with_capacity(target);

        if parents.len() < 2 {
            while offspring.len() < target {
                let decision = self
                    .lower
                    .iter()
                    .zip(&self.upper)
                    .map(|(&low, &high)| rng_util::f64_range(rng, low, high))
                    .collect();
                offspring.push(Individual::new(decision));
            }
            return offspring;
        }

        while offspring.len() < target {
            let p1 = rng.usize(0..parents.len());
            let p2 = rng.usize(0..parents.len());

            let (mut child1, mut child2) = variation::sbx_crossover(
                rng,
                parents[p1],
                parents[p2],
                &self.lower,
                &self.upper,
                self.config.crossover_prob,
                self.config.crossover_eta,
            );

            variation::polynomial_mutation(
                rng,
                &mut child1,
                &self.lower,
                &self.upper,
                self.config.mutation_eta,
            );
            variation::polynomial_mutation(
                rng,
                &mut child2,
                &self.lower,
                &self.upper,
                self.config.mutation_eta,
            );

            offspring.push(Individual::new(child1));
            if offspring.len() < target {
                offspring.push(Individual::new(child2));
            }
        }

        offspring
    }
}

/// Component-wise minimum over a set of objective vectors.
fn component_min(values: &[&[f64]]) -> Vec<f64> {
    let Some(first) = values.first() else {
        return Vec::new();
    };
    let mut minimum = first.to_vec();
    for v in &values[1..] {
        for (m, &x) in minimum.iter_mut().zip(v.iter()) {
            if x < *m {
                *m = x;
            }
        }
    }
    minimum
}

/// Component-wise maximum over a set of objective vectors.
fn component_max(values: &[&[f64]]) -> Vec<f64> {
    let Some(first) = values.first() else {
        return Vec::new();
    };
    let mut maximum = first.to_vec();
    for v in &values[1..] {
        for (m, &x) in maximum.iter_mut().zip(v.iter()) {
            if x > *m {
                *m = x;
            }
        }
    }
    maximum
}

/// Angle-penalized-distance survivor selection.
///
/// Returns a boolean mask over `values` with exactly `target` entries set,
/// assuming `values.len() >= target` (checked by the caller).
fn apd_select(
    values: &[&[f64]],
    ideal: &[f64],
    reference_vectors: &ReferenceVectorSet,
    gamma: &[f64],
    progress: f64,
    target: usize,
) -> Vec<bool> {
    let n = values.len();
    let vectors = reference_vectors.vectors();
    #[allow(clippy::cast_precision_loss)]
    let m = ideal.len() as f64;

    let mut association = vec![0_usize; n];
    let mut penalized = vec![0.0_f64; n];

    for (i, v) in values.iter().enumerate() {
        let translated: Vec<f64> = v.iter().zip(ideal).map(|(&f, &z)| f - z).collect();
        let dist: f64 = translated.iter().map(|&x| x * x).sum::<f64>().sqrt();

        let (best_ref, angle) = if dist < 1e-14 {
            // A candidate at the ideal point has no direction; it wins any
            // group, so assign it to the lowest index with zero angle.
            (0, 0.0)
        } else {
            let unit: Vec<f64> = translated.iter().map(|&x| x / dist).collect();
            let mut best = 0;
            let mut best_angle = f64::INFINITY;
            for (j, rv) in vectors.iter().enumerate() {
                let a = reference::angle_between(&unit, rv);
                // Strict < keeps the lowest index on exact ties.
                if a < best_angle {
                    best_angle = a;
                    best = j;
                }
            }
            (best, best_angle)
        };

        let neighborhood = gamma[best_ref].max(1e-6);
        association[i] = best_ref;
        penalized[i] = (1.0 + m * progress * angle / neighborhood) * dist;
    }

    let mut groups: Vec<Vec<usize>> = vec![Vec::new(); vectors.len()];
    for (i, &j) in association.iter().enumerate() {
        groups[j].push(i);
    }

    let mut selected = vec![false; n];
    let mut count = 0;

    // One elite per non-empty group: the member with the smallest
    // penalized distance, first-seen on ties.
    for group in &groups {
        if count == target {
            break;
        }
        let mut best: Option<usize> = None;
        for &i in group {
            if best.is_none_or(|b| penalized[i] < penalized[b]) {
                best = Some(i);
            }
        }
        if let Some(b) = best {
            selected[b] = true;
            count += 1;
        }
    }

    // Fill remaining slots by globally smallest penalized distance; the
    // stable sort preserves insertion order on ties.
    if count < target {
        let mut rest: Vec<usize> = (0..n).filter(|&i| !selected[i]).collect();
        rest.sort_by(|&a, &b| {
            penalized[a]
                .partial_cmp(&penalized[b])
                .unwrap_or(core::cmp::Ordering::Equal)
        });
        for &i in &rest {
            if count == target {
                break;
            }
            selected[i] = true;
            count += 1;
        }
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_set(m: usize, h: usize) -> ReferenceVectorSet {
        ReferenceVectorSet::new(m, h).unwrap()
    }

    #[test]
    fn test_component_min_max() {
        let a: &[f64] = &[1.0, 5.0];
        let b: &[f64] = &[3.0, 2.0];
        assert_eq!(component_min(&[a, b]), vec![1.0, 2.0]);
        assert_eq!(component_max(&[a, b]), vec![3.0, 5.0]);
        assert!(component_min(&[]).is_empty());
    }

    #[test]
    fn test_apd_select_fills_target_exactly() {
        let set = unit_set(2, 4); // 5 vectors
        let gamma = set.min_neighbor_angles();
        let values: Vec<Vec<f64>> = (0..10)
            .map(|i| {
                let x = f64::from(i) / 9.0;
                vec![x, 1.0 - x]
            })
            .collect();
        let refs: Vec<&[f64]> = values.iter().map(Vec::as_slice).collect();
        let ideal = component_min(&refs);

        let mask = apd_select(&refs, &ideal, &set, &gamma, 0.5, 5);
        assert_eq!(mask.iter().filter(|&&s| s).count(), 5);
    }

    #[test]
    fn test_apd_select_prefers_converged_candidate_in_group() {
        let set = unit_set(2, 1); // vectors (0,1) and (1,0) after normalization
        let gamma = set.min_neighbor_angles();
        // Two candidates along the same direction; the closer one wins.
        let near: &[f64] = &[0.1, 0.0];
        let far: &[f64] = &[0.9, 0.0];
        let other: &[f64] = &[0.0, 0.5];
        let ideal = vec![0.0, 0.0];

        let mask = apd_select(&[far, near, other], &ideal, &set, &gamma, 0.0, 2);
        assert!(!mask[0]);
        assert!(mask[1]);
        assert!(mask[2]);
    }

    #[test]
    fn test_apd_select_tie_breaks_by_insertion_order() {
        let set = unit_set(2, 1);
        let gamma = set.min_neighbor_angles();
        // Identical candidates: the first seen survives the group.
        let a: &[f64] = &[0.5, 0.0];
        let b: &[f64] = &[0.5, 0.0];
        let ideal = vec![0.0, 0.0];

        let mask = apd_select(&[a, b], &ideal, &set, &gamma, 0.3, 1);
        assert!(mask[0]);
        assert!(!mask[1]);
    }

    #[test]
    fn test_apd_select_ideal_point_candidate_survives() {
        let set = unit_set(2, 1);
        let gamma = set.min_neighbor_angles();
        let at_ideal: &[f64] = &[0.0, 0.0];
        let elsewhere: &[f64] = &[1.0, 1.0];
        let ideal = vec![0.0, 0.0];

        let mask = apd_select(&[elsewhere, at_ideal], &ideal, &set, &gamma, 1.0, 1);
        assert!(!mask[0]);
        assert!(mask[1]);
    }
}
