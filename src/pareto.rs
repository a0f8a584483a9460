//! Pareto dominance and the non-dominated filter.
//!
//! All objective vectors are in minimize-space by convention. A solution
//! **dominates** another if it is no worse in every objective and strictly
//! better in at least one; the **non-dominated front** is the subset
//! dominated by nobody.
//!
//! # Example
//!
//! ```
//! use rvopt::pareto::{dominates, non_dominated_indices};
//!
//! let solutions = vec![
//!     vec![1.0, 5.0], // Pareto-optimal
//!     vec![5.0, 1.0], // Pareto-optimal
//!     vec![3.0, 3.0], // Pareto-optimal
//!     vec![4.0, 4.0], // dominated by (3, 3)
//! ];
//!
//! assert!(dominates(&solutions[2], &solutions[3]));
//! assert_eq!(non_dominated_indices(&solutions), vec![0, 1, 2]);
//! ```

/// Returns `true` if solution `a` Pareto-dominates solution `b`.
///
/// `a` dominates `b` if every objective of `a` is less than or equal to
/// that of `b` and at least one is strictly less (minimize convention).
#[must_use]
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    debug_assert_eq!(a.len(), b.len());

    let mut strictly_better = false;
    for (&av, &bv) in a.iter().zip(b) {
        if av > bv {
            return false;
        }
        if av < bv {
            strictly_better = true;
        }
    }
    strictly_better
}

/// Filter solutions to the indices of the non-dominated (Pareto-optimal)
/// subset.
///
/// A pairwise O(n²) dominance check, adequate for populations of tens to
/// low hundreds. The returned indices preserve first-seen order; the
/// selected *set* is independent of input order. Filtering an already
/// non-dominated set returns every index (idempotence).
#[must_use]
pub fn non_dominated_indices(solutions: &[Vec<f64>]) -> Vec<usize> {
    let mut front = Vec::new();
    'outer: for (i, candidate) in solutions.iter().enumerate() {
        for (j, other) in solutions.iter().enumerate() {
            if i != j && dominates(other, candidate) {
                continue 'outer;
            }
        }
        front.push(i);
    }
    front
}

/// Return the non-dominated subset of `points` by value.
///
/// Used by the hypervolume recursion on projected point sets.
pub(crate) fn non_dominated_points(points: &[Vec<f64>]) -> Vec<Vec<f64>> {
    non_dominated_indices(points)
        .into_iter()
        .map(|i| points[i].clone())
        .collect()
}
