//! Gauss–Legendre quadrature nodes and weights.

use std::f64::consts::PI;

use crate::error::{CurveError, Result};

/// Smallest supported quadrature order.
pub const MIN_ORDER: usize = 2;
/// Largest supported quadrature order.
pub const MAX_ORDER: usize = 64;
/// Default quadrature order used for arc-length integration.
pub const DEFAULT_ORDER: usize = 24;

const MAX_NEWTON_ITERATIONS: usize = 100;

/// Abscissae and weights of an `n`-point Gauss–Legendre rule on `[-1, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussLegendre {
    nodes: Vec<(f64, f64)>,
}

impl GaussLegendre {
    /// Compute the rule of the given order.
    ///
    /// Nodes are the roots of the Legendre polynomial `Pₙ`, found by Newton
    /// iteration from Chebyshev-like initial guesses.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidConfiguration`] if `order` is outside
    /// `[MIN_ORDER, MAX_ORDER]`.
    pub fn new(order: usize) -> Result<Self> {
        if !(MIN_ORDER..=MAX_ORDER).contains(&order) {
            return Err(CurveError::config(format!(
                "quadrature order must be in [{}, {}], got {}",
                MIN_ORDER, MAX_ORDER, order
            )));
        }

        let n = order as f64;
        let nodes = (0..order)
            .map(|i| {
                let mut x = (PI * (i as f64 + 0.75) / (n + 0.5)).cos();
                for _ in 0..MAX_NEWTON_ITERATIONS {
                    let (p, dp) = legendre(order, x);
                    let dx = p / dp;
                    x -= dx;
                    if dx.abs() < 1e-15 {
                        break;
                    }
                }
                let (_, dp) = legendre(order, x);
                let weight = 2.0 / ((1.0 - x * x) * dp * dp);
                (x, weight)
            })
            .collect();

        Ok(Self { nodes })
    }

    /// Number of nodes.
    pub fn order(&self) -> usize {
        self.nodes.len()
    }

    /// `(abscissa, weight)` pairs on `[-1, 1]`.
    pub fn nodes(&self) -> &[(f64, f64)] {
        &self.nodes
    }

    /// Approximate `∫ f(t) dt` over `[t0, t1]`.
    pub fn integrate<F>(&self, t0: f64, t1: f64, f: F) -> f64
    where
        F: Fn(f64) -> f64,
    {
        let z = (t1 - t0) * 0.5;
        let sum: f64 = self
            .nodes
            .iter()
            .map(|&(x, w)| w * f(z * x + z + t0))
            .sum();
        z * sum
    }
}

/// `(Pₙ(x), Pₙ'(x))` via the three-term recurrence.
fn legendre(n: usize, x: f64) -> (f64, f64) {
    let mut p_prev = 1.0;
    let mut p = x;
    for k in 2..=n {
        let k = k as f64;
        let next = ((2.0 * k - 1.0) * x * p - (k - 1.0) * p_prev) / k;
        p_prev = p;
        p = next;
    }
    let dp = n as f64 * (x * p - p_prev) / (x * x - 1.0);
    (p, dp)
}
