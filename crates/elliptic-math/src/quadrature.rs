//! Gauss-Legendre quadrature rules.
//!
//! Nodes are the roots of P_n found by Newton iteration from the
//! Chebyshev-like initial guess cos(π(i + 3/4)/(n + 1/2)); weights are
//! 2 / ((1 − x²) P_n'(x)²).

use std::f64::consts::PI;

use ndarray::Array1;

/// Newton steps per root; convergence is quadratic from the initial guess.
const NEWTON_STEPS: usize = 100;

/// A quadrature rule on [−1, 1].
#[derive(Debug, Clone)]
pub struct GaussLegendre {
    pub nodes: Array1<f64>,
    pub weights: Array1<f64>,
}

/// P_n(x) and P_n'(x) by the three-term recurrence.
fn legendre_and_derivative(n: usize, x: f64) -> (f64, f64) {
    let mut p0 = 1.0;
    let mut p1 = x;
    for k in 2..=n {
        let kf = k as f64;
        let p2 = ((2.0 * kf - 1.0) * x * p1 - (kf - 1.0) * p0) / kf;
        p0 = p1;
        p1 = p2;
    }
    let dp = n as f64 * (x * p1 - p0) / (x * x - 1.0);
    (p1, dp)
}

impl GaussLegendre {
    /// Build an `n`-point rule (n >= 2). Nodes are sorted ascending.
    pub fn new(n: usize) -> Self {
        let n = n.max(2);
        let mut nodes = vec![0.0; n];
        let mut weights = vec![0.0; n];

        for i in 0..n.div_ceil(2) {
            let mut z = (PI * (i as f64 + 0.75) / (n as f64 + 0.5)).cos();
            for _ in 0..NEWTON_STEPS {
                let (p, dp) = legendre_and_derivative(n, z);
                let dz = p / dp;
                z -= dz;
                if dz.abs() <= f64::EPSILON * z.abs().max(1e-3) {
                    break;
                }
            }
            let (_, dp) = legendre_and_derivative(n, z);
            let w = 2.0 / ((1.0 - z * z) * dp * dp);

            // Root i is the i-th largest; mirror it for the negative half.
            nodes[i] = -z;
            weights[i] = w;
            nodes[n - 1 - i] = z;
            weights[n - 1 - i] = w;
        }

        GaussLegendre {
            nodes: Array1::from(nodes),
            weights: Array1::from(weights),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// ∫ₐᵇ f over `panels` equal sub-intervals.
    pub fn integrate<F>(&self, a: f64, b: f64, panels: usize, f: F) -> f64
    where
        F: Fn(f64) -> f64,
    {
        let panels = panels.max(1);
        let h = (b - a) / panels as f64;
        let half = 0.5 * h;
        let mut total = 0.0;
        for j in 0..panels {
            let mid = a + (j as f64 + 0.5) * h;
            let panel: f64 = self
                .nodes
                .iter()
                .zip(self.weights.iter())
                .map(|(&x, &w)| w * f(mid + half * x))
                .sum();
            total += half * panel;
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_two() {
        for n in [2, 5, 16, 24, 33] {
            let rule = GaussLegendre::new(n);
            let s: f64 = rule.weights.sum();
            assert!((s - 2.0).abs() < 1e-13, "n={n}: sum of weights = {s}");
            assert_eq!(rule.len(), n);
        }
    }

    #[test]
    fn test_nodes_sorted_and_symmetric() {
        let rule = GaussLegendre::new(7);
        for i in 1..rule.len() {
            assert!(rule.nodes[i] > rule.nodes[i - 1]);
        }
        for i in 0..rule.len() {
            assert!((rule.nodes[i] + rule.nodes[rule.len() - 1 - i]).abs() < 1e-15);
        }
        // Odd rule has the midpoint as a node.
        assert!(rule.nodes[3].abs() < 1e-15);
    }

    #[test]
    fn test_exact_for_polynomials() {
        // n points integrate degree 2n-1 exactly.
        let rule = GaussLegendre::new(4);
        let got = rule.integrate(0.0, 2.0, 1, |x| x.powi(7) - 3.0 * x.powi(2));
        let expected = 2.0_f64.powi(8) / 8.0 - 8.0;
        assert!((got - expected).abs() < 1e-12, "got {got}, expected {expected}");
    }

    #[test]
    fn test_composite_smooth_integrand() {
        let rule = GaussLegendre::new(12);
        let got = rule.integrate(0.0, PI, 8, f64::sin);
        assert!((got - 2.0).abs() < 1e-14);
    }
}
