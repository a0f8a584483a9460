//! Property-style tests for the non-dominated filter and the
//! hypervolume indicator, driven through the public API.

use rvopt::ReferenceVectorSet;
use rvopt::hypervolume::{hypervolume, hypervolume_scalar_ref};
use rvopt::pareto::{dominates, non_dominated_indices};

/// Deterministic pseudo-random objective vectors in `[0, 1)^m`.
fn random_points(seed: u64, n: usize, m: usize) -> Vec<Vec<f64>> {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..n).map(|_| (0..m).map(|_| rng.f64()).collect()).collect()
}

#[test]
fn filter_is_idempotent_on_random_sets() {
    for seed in [1, 7, 99] {
        let points = random_points(seed, 40, 3);
        let front: Vec<Vec<f64>> = non_dominated_indices(&points)
            .into_iter()
            .map(|i| points[i].clone())
            .collect();

        let refiltered = non_dominated_indices(&front);
        assert_eq!(refiltered, (0..front.len()).collect::<Vec<_>>());
    }
}

#[test]
fn front_members_never_dominate_each_other() {
    let points = random_points(5, 60, 4);
    let front = non_dominated_indices(&points);
    for &i in &front {
        for &j in &front {
            if i != j {
                assert!(!dominates(&points[i], &points[j]));
            }
        }
    }
}

#[test]
fn excluded_points_are_dominated_by_someone() {
    let points = random_points(11, 30, 2);
    let front = non_dominated_indices(&points);
    for i in 0..points.len() {
        if front.contains(&i) {
            continue;
        }
        assert!(
            points
                .iter()
                .any(|other| dominates(other, &points[i])),
            "excluded point {i} is dominated by nobody"
        );
    }
}

#[test]
fn single_point_hypervolume_is_product_of_gaps() {
    for point in random_points(3, 10, 3) {
        let reference = [1.5, 2.0, 2.5];
        let expected: f64 = point
            .iter()
            .zip(reference)
            .map(|(&p, r)| r - p)
            .product();
        let hv = hypervolume(&[point], &reference).unwrap();
        assert!((hv - expected).abs() < 1e-12);
    }
}

#[test]
fn hypervolume_is_monotone_under_non_dominated_additions() {
    // Points on the unit sphere are mutually non-dominated; grow a front
    // one sphere point at a time and watch the indicator never decrease.
    let sphere: Vec<Vec<f64>> = ReferenceVectorSet::new(3, 5)
        .unwrap()
        .vectors()
        .to_vec();

    let mut front: Vec<Vec<f64>> = Vec::new();
    let mut previous = 0.0;
    for point in sphere {
        front.push(point);
        let hv = hypervolume_scalar_ref(&front, 2.0).unwrap();
        assert!(
            hv >= previous - 1e-12,
            "hypervolume decreased: {previous} -> {hv}"
        );
        previous = hv;
    }
    assert!(previous > 0.0);
}

#[test]
fn hypervolume_bounded_by_reference_box() {
    // Every front inside [0,1]^3 scored against r=2 fits in the 2^3 box.
    let points = random_points(21, 25, 3);
    let front: Vec<Vec<f64>> = non_dominated_indices(&points)
        .into_iter()
        .map(|i| points[i].clone())
        .collect();

    let hv = hypervolume_scalar_ref(&front, 2.0).unwrap();
    assert!(hv > 0.0);
    assert!(hv <= 8.0);
}

#[test]
fn dominated_additions_change_nothing() {
    let front = vec![vec![0.2, 0.8], vec![0.8, 0.2]];
    let base = hypervolume_scalar_ref(&front, 2.0).unwrap();

    let mut extended = front.clone();
    extended.push(vec![0.9, 0.9]); // dominated by both front members
    extended.push(vec![0.85, 0.25]); // dominated by (0.8, 0.2)
    let hv = hypervolume_scalar_ref(&extended, 2.0).unwrap();

    assert!((hv - base).abs() < 1e-12);
}

#[test]
fn order_of_front_points_does_not_matter() {
    let mut front = vec![
        vec![0.1, 0.9, 0.5],
        vec![0.9, 0.1, 0.5],
        vec![0.5, 0.5, 0.1],
        vec![0.3, 0.7, 0.3],
    ];
    let forward = hypervolume_scalar_ref(&front, 1.5).unwrap();
    front.reverse();
    let backward = hypervolume_scalar_ref(&front, 1.5).unwrap();
    assert!((forward - backward).abs() < 1e-12);
}
