//! Variation operators: SBX crossover and polynomial mutation.
//!
//! Both operators act on decision vectors within per-variable bounds and
//! draw all randomness from the caller's rng, so reproduction is
//! reproducible given a fixed seed.

use crate::rng_util;

/// SBX (simulated binary) crossover over full decision vectors.
///
/// With probability `1 - crossover_prob` the parents are returned
/// unchanged. Otherwise each variable where the parents differ is crossed
/// with distribution index `eta`; children are clamped to the bounds.
pub(crate) fn sbx_crossover(
    rng: &mut fastrand::Rng,
    parent1: &[f64],
    parent2: &[f64],
    lower: &[f64],
    upper: &[f64],
    crossover_prob: f64,
    eta: f64,
) -> (Vec<f64>, Vec<f64>) {
    let mut child1 = parent1.to_vec();
    let mut child2 = parent2.to_vec();

    let u = rng_util::f64_range(rng, 0.0, 1.0);
    if u > crossover_prob {
        return (child1, child2);
    }

    for i in 0..parent1.len() {
        if (parent1[i] - parent2[i]).abs() < 1e-14 {
            continue;
        }
        let (c1, c2) = sbx_crossover_f64(rng, parent1[i], parent2[i], lower[i], upper[i], eta);
        child1[i] = c1;
        child2[i] = c2;
    }

    (child1, child2)
}

/// SBX crossover for a single variable.
pub(crate) fn sbx_crossover_f64(
    rng: &mut fastrand::Rng,
    p1: f64,
    p2: f64,
    low: f64,
    high: f64,
    eta: f64,
) -> (f64, f64) {
    let u = rng_util::f64_range(rng, 0.0, 1.0);

    let beta = if u <= 0.5 {
        (2.0 * u).powf(1.0 / (eta + 1.0))
    } else {
        (1.0 / (2.0 * (1.0 - u))).powf(1.0 / (eta + 1.0))
    };

    let c1 = 0.5 * ((1.0 + beta) * p1 + (1.0 - beta) * p2);
    let c2 = 0.5 * ((1.0 - beta) * p1 + (1.0 + beta) * p2);

    (c1.clamp(low, high), c2.clamp(low, high))
}

/// Polynomial mutation over a full decision vector.
///
/// Each variable mutates with probability `1/n`, the standard rate for an
/// `n`-variable problem.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn polynomial_mutation(
    rng: &mut fastrand::Rng,
    decision: &mut [f64],
    lower: &[f64],
    upper: &[f64],
    eta: f64,
) {
    let n = decision.len();
    if n == 0 {
        return;
    }
    let mutation_prob = 1.0 / n as f64;

    for (i, value) in decision.iter_mut().enumerate() {
        if rng_util::f64_range(rng, 0.0, 1.0) >= mutation_prob {
            continue;
        }
        *value = polynomial_mutation_f64(rng, *value, lower[i], upper[i], eta);
    }
}

/// Polynomial mutation for a single variable.
pub(crate) fn polynomial_mutation_f64(
    rng: &mut fastrand::Rng,
    x: f64,
    low: f64,
    high: f64,
    eta: f64,
) -> f64 {
    let u = rng_util::f64_range(rng, 0.0, 1.0);
    let range = high - low;
    if range <= 0.0 {
        return x;
    }

    let delta1 = (x - low) / range;
    let delta2 = (high - x) / range;

    let delta_q = if u < 0.5 {
        let xy = 1.0 - delta1;
        let val = 2.0 * u + (1.0 - 2.0 * u) * xy.powf(eta + 1.0);
        val.powf(1.0 / (eta + 1.0)) - 1.0
    } else {
        let xy = 1.0 - delta2;
        let val = 2.0 * (1.0 - u) + 2.0 * (u - 0.5) * xy.powf(eta + 1.0);
        1.0 - val.powf(1.0 / (eta + 1.0))
    };

    (x + delta_q * range).clamp(low, high)
}
