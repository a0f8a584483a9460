#[path = "../benches/test_problems.rs"]
mod test_problems;

use rvopt::ObjectiveFunction;
use test_problems::*;

const TOL: f64 = 1e-10;

#[test]
fn dtlz2_distance_zero_at_half() {
    assert!(g_dtlz2(&[0.5; 10]).abs() < TOL);
    assert!(g_dtlz2(&[0.0]) > 0.0);
}

#[test]
fn dtlz3_distance_zero_at_half() {
    assert!(g_dtlz3(&[0.5; 10]).abs() < 1e-8);
    // Away from 0.5 the multimodal term dominates.
    assert!(g_dtlz3(&[0.0; 10]) > 100.0);
}

#[test]
fn dtlz2_front_points_on_unit_sphere() {
    let problem = Dtlz::new(DtlzVariant::Dtlz2, 12, 3);
    // x_m = 0.5 puts the solution exactly on the Pareto front.
    let mut decision = vec![0.5; 12];
    decision[0] = 0.3;
    decision[1] = 0.8;

    let f = problem.evaluate(&decision).unwrap();
    assert_eq!(f.len(), 3);
    let norm_sq: f64 = f.iter().map(|&v| v * v).sum();
    assert!((norm_sq - 1.0).abs() < 1e-9);
}

#[test]
fn dtlz3_shares_the_spherical_front() {
    let problem = Dtlz::new(DtlzVariant::Dtlz3, 12, 3);
    let mut decision = vec![0.5; 12];
    decision[0] = 0.25;
    decision[1] = 0.75;

    let f = problem.evaluate(&decision).unwrap();
    let norm_sq: f64 = f.iter().map(|&v| v * v).sum();
    assert!((norm_sq - 1.0).abs() < 1e-6);
}

#[test]
fn dtlz_declares_its_dimensions() {
    let problem = Dtlz::new(DtlzVariant::Dtlz2, 12, 3);
    assert_eq!(problem.name(), "DTLZ2");
    assert_eq!(problem.num_variables(), 12);
    assert_eq!(problem.num_objectives(), 3);
    assert_eq!(problem.num_constraints(), 0);

    let (lower, upper) = problem.variable_bounds();
    assert_eq!(lower, vec![0.0; 12]);
    assert_eq!(upper, vec![1.0; 12]);
}

#[test]
fn dtlz2_extreme_corners() {
    let problem = Dtlz::new(DtlzVariant::Dtlz2, 12, 3);

    // Position variables at 0 concentrate everything in f1.
    let mut decision = vec![0.5; 12];
    decision[0] = 0.0;
    decision[1] = 0.0;
    let f = problem.evaluate(&decision).unwrap();
    assert!((f[0] - 1.0).abs() < TOL);
    assert!(f[1].abs() < TOL);
    assert!(f[2].abs() < TOL);

    // Position variables at 1 concentrate everything in the last objective.
    decision[0] = 1.0;
    decision[1] = 1.0;
    let f = problem.evaluate(&decision).unwrap();
    assert!(f[0].abs() < TOL);
    assert!(f[1].abs() < TOL);
    assert!((f[2] - 1.0).abs() < TOL);
}
