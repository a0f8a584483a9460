//! Reference vectors on the unit simplex.
//!
//! A [`ReferenceVectorSet`] partitions objective space into directions that
//! guide selection toward a diverse, converged front. Vectors are generated
//! on a Das-Dennis simplex lattice parameterized by the number of
//! objectives `m` and a lattice resolution `h`, yielding exactly
//! `C(h + m - 1, m - 1)` vectors, each normalized to unit Euclidean norm.
//!
//! By convention the configured population size must equal the lattice
//! cardinality; a mismatch is a caller error and is never silently
//! corrected. During a run the set can be rescaled deterministically to the
//! population's current objective ranges so that sparsely covered regions
//! of a non-uniform front still attract survivors.

use crate::error::{Error, Result};

/// A set of unit-norm direction vectors on the positive simplex.
///
/// Create with [`ReferenceVectorSet::new`]; the initial lattice is retained
/// so that [`adapt`](ReferenceVectorSet::adapt) always rescales from the
/// pristine directions rather than compounding adaptations.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReferenceVectorSet {
    num_objectives: usize,
    lattice_resolution: usize,
    /// The unit-normalized Das-Dennis lattice as generated.
    initial: Vec<Vec<f64>>,
    /// The current (possibly adapted) vectors.
    vectors: Vec<Vec<f64>>,
}

impl ReferenceVectorSet {
    /// Generates the Das-Dennis lattice for `num_objectives` and
    /// `lattice_resolution` and normalizes every vector to unit norm.
    ///
    /// The generation is deterministic: the same inputs always produce the
    /// same vectors in the same order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidObjectiveCount`] if `num_objectives < 2` or
    /// [`Error::InvalidLatticeResolution`] if `lattice_resolution < 1`.
    pub fn new(num_objectives: usize, lattice_resolution: usize) -> Result<Self> {
        if num_objectives < 2 {
            return Err(Error::InvalidObjectiveCount(num_objectives));
        }
        if lattice_resolution < 1 {
            return Err(Error::InvalidLatticeResolution(lattice_resolution));
        }

        let mut vectors = das_dennis(num_objectives, lattice_resolution);
        for v in &mut vectors {
            normalize(v);
        }

        Ok(Self {
            num_objectives,
            lattice_resolution,
            initial: vectors.clone(),
            vectors,
        })
    }

    /// The lattice cardinality `C(h + m - 1, m - 1)` for the given
    /// parameters, without generating the vectors. Zero objectives yield
    /// an empty lattice.
    #[must_use]
    pub fn cardinality(num_objectives: usize, lattice_resolution: usize) -> usize {
        if num_objectives == 0 {
            return 0;
        }
        n_combinations(
            lattice_resolution + num_objectives - 1,
            num_objectives - 1,
        )
    }

    /// The number of reference vectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Returns `true` if the set is empty (never the case for a valid set).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// The number of objectives the vectors span.
    #[must_use]
    pub fn num_objectives(&self) -> usize {
        self.num_objectives
    }

    /// The lattice resolution used at generation.
    #[must_use]
    pub fn lattice_resolution(&self) -> usize {
        self.lattice_resolution
    }

    /// The current vectors, each of unit Euclidean norm.
    #[must_use]
    pub fn vectors(&self) -> &[Vec<f64>] {
        &self.vectors
    }

    /// Checks the convention that the population size equals the lattice
    /// cardinality.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReferenceVectorCountMismatch`] on any difference.
    pub fn validate_population_size(&self, population_size: usize) -> Result<()> {
        if self.vectors.len() != population_size {
            return Err(Error::ReferenceVectorCountMismatch {
                reference_vectors: self.vectors.len(),
                population_size,
            });
        }
        Ok(())
    }

    /// Rescales every vector to the current objective ranges.
    ///
    /// Each initial lattice vector is multiplied component-wise by
    /// `nadir - ideal` and re-normalized, so the directions track the
    /// population's spread. Deterministic given the same inputs. A vector
    /// whose rescaled norm degenerates to zero keeps its initial direction.
    pub fn adapt(&mut self, ideal: &[f64], nadir: &[f64]) {
        debug_assert_eq!(ideal.len(), self.num_objectives);
        debug_assert_eq!(nadir.len(), self.num_objectives);

        for (current, initial) in self.vectors.iter_mut().zip(&self.initial) {
            let mut scaled: Vec<f64> = initial
                .iter()
                .zip(ideal.iter().zip(nadir))
                .map(|(&v, (&z_min, &z_max))| v * (z_max - z_min))
                .collect();

            let norm: f64 = scaled.iter().map(|&v| v * v).sum::<f64>().sqrt();
            if norm > 1e-12 {
                for v in &mut scaled {
                    *v /= norm;
                }
                *current = scaled;
            } else {
                current.clone_from(initial);
            }
        }
    }

    /// The smallest angle (radians) from each vector to any other vector
    /// in the set — the neighborhood term of angle-penalized distance.
    #[must_use]
    pub fn min_neighbor_angles(&self) -> Vec<f64> {
        let n = self.vectors.len();
        let mut angles = vec![f64::INFINITY; n];

        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let a = angle_between(&self.vectors[i], &self.vectors[j]);
                if a < angles[i] {
                    angles[i] = a;
                }
            }
        }

        angles
    }
}

/// The angle in radians between two unit-norm vectors.
pub(crate) fn angle_between(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(&x, &y)| x * y).sum();
    dot.clamp(-1.0, 1.0).acos()
}

fn normalize(v: &mut [f64]) {
    let norm: f64 = v.iter().map(|&x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        for x in v {
            *x /= norm;
        }
    }
}

/// Generate Das-Dennis (simplex-lattice) points.
///
/// Returns `C(H + M - 1, M - 1)` uniformly spaced points on the
/// `M`-dimensional unit simplex, where `M = n_objectives` and
/// `H = divisions`, each point summing to 1 before normalization.
fn das_dennis(n_objectives: usize, divisions: usize) -> Vec<Vec<f64>> {
    let mut points = Vec::new();
    let mut point = vec![0.0_f64; n_objectives];
    das_dennis_recursive(
        n_objectives,
        divisions,
        0,
        divisions,
        &mut point,
        &mut points,
    );
    points
}

#[allow(clippy::cast_precision_loss)]
fn das_dennis_recursive(
    n_objectives: usize,
    divisions: usize,
    depth: usize,
    remaining: usize,
    current: &mut Vec<f64>,
    result: &mut Vec<Vec<f64>>,
) {
    if depth == n_objectives - 1 {
        current[depth] = remaining as f64 / divisions as f64;
        result.push(current.clone());
        return;
    }

    for i in 0..=remaining {
        current[depth] = i as f64 / divisions as f64;
        das_dennis_recursive(
            n_objectives,
            divisions,
            depth + 1,
            remaining - i,
            current,
            result,
        );
    }
}

/// Compute `C(n, k)` = n! / (k! * (n-k)!).
fn n_combinations(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: usize = 1;
    for i in 0..k {
        result = result.saturating_mul(n - i) / (i + 1);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn test_cardinality_formula() {
        // C(4+2, 2) = 15
        assert_eq!(ReferenceVectorSet::cardinality(3, 4), 15);
        // C(13+2, 2) = 105
        assert_eq!(ReferenceVectorSet::cardinality(3, 13), 105);
        // C(4+1, 1) = 5
        assert_eq!(ReferenceVectorSet::cardinality(2, 4), 5);
        for m in 2..=5 {
            for h in 1..=6 {
                let set = ReferenceVectorSet::new(m, h).unwrap();
                assert_eq!(set.len(), ReferenceVectorSet::cardinality(m, h));
            }
        }
    }

    #[test]
    fn test_unit_norms() {
        let set = ReferenceVectorSet::new(3, 4).unwrap();
        for v in set.vectors() {
            let norm: f64 = v.iter().map(|&x| x * x).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < TOL, "vector {v:?} has norm {norm}");
            assert!(v.iter().all(|&x| x >= 0.0));
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = ReferenceVectorSet::new(4, 5).unwrap();
        let b = ReferenceVectorSet::new(4, 5).unwrap();
        assert_eq!(a.vectors(), b.vectors());
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            ReferenceVectorSet::new(1, 4).unwrap_err(),
            Error::InvalidObjectiveCount(1)
        ));
        assert!(matches!(
            ReferenceVectorSet::new(3, 0).unwrap_err(),
            Error::InvalidLatticeResolution(0)
        ));
    }

    #[test]
    fn test_population_size_mismatch() {
        let set = ReferenceVectorSet::new(3, 4).unwrap();
        set.validate_population_size(15).unwrap();
        let err = set.validate_population_size(105).unwrap_err();
        assert!(matches!(
            err,
            Error::ReferenceVectorCountMismatch {
                reference_vectors: 15,
                population_size: 105,
            }
        ));
    }

    #[test]
    fn test_adapt_is_deterministic_and_unit_norm() {
        let mut a = ReferenceVectorSet::new(3, 4).unwrap();
        let mut b = ReferenceVectorSet::new(3, 4).unwrap();
        let ideal = [0.0, 0.1, 0.2];
        let nadir = [1.0, 2.0, 4.0];

        a.adapt(&ideal, &nadir);
        b.adapt(&ideal, &nadir);
        assert_eq!(a.vectors(), b.vectors());

        for v in a.vectors() {
            let norm: f64 = v.iter().map(|&x| x * x).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < TOL);
        }
    }

    #[test]
    fn test_adapt_rescales_from_initial_not_cumulative() {
        let mut once = ReferenceVectorSet::new(3, 3).unwrap();
        let mut twice = ReferenceVectorSet::new(3, 3).unwrap();
        let ideal = [0.0, 0.0, 0.0];
        let nadir = [1.0, 3.0, 9.0];

        once.adapt(&ideal, &nadir);
        twice.adapt(&ideal, &[2.0, 2.0, 2.0]);
        twice.adapt(&ideal, &nadir);

        assert_eq!(once.vectors(), twice.vectors());
    }

    #[test]
    fn test_adapt_degenerate_ranges_keeps_initial() {
        let mut set = ReferenceVectorSet::new(3, 4).unwrap();
        let initial = set.vectors().to_vec();
        set.adapt(&[1.0, 1.0, 1.0], &[1.0, 1.0, 1.0]);
        assert_eq!(set.vectors(), &initial[..]);
    }

    #[test]
    fn test_min_neighbor_angles() {
        let set = ReferenceVectorSet::new(2, 2).unwrap();
        // Unit-normalized lattice for m=2, h=2: (0,1), (1,1)/√2, (1,0).
        let angles = set.min_neighbor_angles();
        assert_eq!(angles.len(), 3);
        // The axis vectors are 45° from the diagonal.
        assert!((angles[0] - core::f64::consts::FRAC_PI_4).abs() < 1e-9);
        assert!((angles[1] - core::f64::consts::FRAC_PI_4).abs() < 1e-9);
        assert!((angles[2] - core::f64::consts::FRAC_PI_4).abs() < 1e-9);
    }

    #[test]
    fn test_angle_between_orthogonal() {
        let a = angle_between(&[1.0, 0.0], &[0.0, 1.0]);
        assert!((a - core::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!(angle_between(&[1.0, 0.0], &[1.0, 0.0]) < 1e-12);
    }
}
