//! Exact hypervolume indicator.
//!
//! The hypervolume of a non-dominated front is the volume of the
//! objective-space region dominated by the front and bounded above by a
//! reference point. Higher is better: the indicator grows as the front
//! approaches the ideal point and as it spreads out. The computation here
//! is exact — recursive slicing on the last objective down to the 1-D
//! base case — because downstream correctness checks compare normalized
//! values directly rather than a Monte Carlo estimate.
//!
//! The reference point must be strictly dominated by (strictly worse than)
//! every front member in every objective; anything else is a caller error
//! and fails with [`Error::InvalidReferencePoint`].
//!
//! # Example
//!
//! ```
//! use rvopt::hypervolume::hypervolume;
//!
//! let front = vec![vec![1.0, 3.0], vec![2.0, 2.0], vec![3.0, 1.0]];
//! let hv = hypervolume(&front, &[4.0, 4.0])?;
//! assert!((hv - 6.0).abs() < 1e-10);
//! # Ok::<(), rvopt::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::pareto;

/// Compute the hypervolume dominated by `front` with respect to
/// `reference_point`, all objectives minimized.
///
/// Returns 0.0 for an empty front.
///
/// # Errors
///
/// Returns [`Error::ObjectiveDimensionMismatch`] if a front member's
/// length differs from the reference point's, and
/// [`Error::InvalidReferencePoint`] if any front member fails to be
/// strictly below the reference point in every objective.
pub fn hypervolume(front: &[Vec<f64>], reference_point: &[f64]) -> Result<f64> {
    if front.is_empty() {
        return Ok(0.0);
    }

    let d = reference_point.len();
    for point in front {
        if point.len() != d {
            return Err(Error::ObjectiveDimensionMismatch {
                expected: d,
                got: point.len(),
            });
        }
        for (objective, (&pv, &rv)) in point.iter().zip(reference_point).enumerate() {
            if pv >= rv || pv.is_nan() || rv.is_nan() {
                return Err(Error::InvalidReferencePoint {
                    objective,
                    front_value: pv,
                    reference_value: rv,
                });
            }
        }
    }

    Ok(hv_recursive(front, reference_point))
}

/// Compute the hypervolume with a scalar reference point broadcast to
/// every objective.
///
/// This is the reporting convention of benchmark families whose fronts
/// live in `[0, r]^m`: callers divide the result by their own known
/// volume bound (e.g. `2^m` when `r = 2`).
///
/// # Errors
///
/// Same conditions as [`hypervolume`].
pub fn hypervolume_scalar_ref(front: &[Vec<f64>], reference: f64) -> Result<f64> {
    let Some(first) = front.first() else {
        return Ok(0.0);
    };
    let reference_point = vec![reference; first.len()];
    hypervolume(front, &reference_point)
}

/// Recursive hypervolume via slicing on the last objective.
///
/// All points are in minimize-space and strictly dominated by `reference`.
fn hv_recursive(points: &[Vec<f64>], reference: &[f64]) -> f64 {
    let d = reference.len();

    // Base case: 1-D hypervolume is the gap from the best point to ref.
    if d == 1 {
        let min_val = points.iter().map(|p| p[0]).fold(f64::INFINITY, f64::min);
        return (reference[0] - min_val).max(0.0);
    }

    // Single point: hypervolume is the product of gaps.
    if points.len() == 1 {
        return points[0]
            .iter()
            .zip(reference)
            .map(|(&p, &r)| (r - p).max(0.0))
            .product();
    }

    // Sort by last objective ascending.
    let mut sorted: Vec<&Vec<f64>> = points.iter().collect();
    sorted.sort_by(|a, b| {
        a[d - 1]
            .partial_cmp(&b[d - 1])
            .unwrap_or(core::cmp::Ordering::Equal)
    });

    let sub_ref: Vec<f64> = reference[..d - 1].to_vec();
    let mut result = 0.0;

    for i in 0..sorted.len() {
        let height = if i + 1 < sorted.len() {
            sorted[i + 1][d - 1] - sorted[i][d - 1]
        } else {
            reference[d - 1] - sorted[i][d - 1]
        };

        if height <= 0.0 {
            continue;
        }

        // Project points[0..=i] onto the first d-1 dimensions and keep
        // only the non-dominated subset.
        let projected: Vec<Vec<f64>> = sorted[..=i].iter().map(|p| p[..d - 1].to_vec()).collect();
        let non_dom = pareto::non_dominated_points(&projected);

        if !non_dom.is_empty() {
            result += height * hv_recursive(&non_dom, &sub_ref);
        }
    }

    result
}
