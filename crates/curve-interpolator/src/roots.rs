//! Closed-form real roots of quadratic and cubic polynomials.
//!
//! Both solvers treat a leading coefficient smaller than [`EPSILON`] as zero
//! and fall back to the lower-degree solver, so nearly-degenerate segments
//! (coincident control points) never divide by a vanishing coefficient.
//! Returned roots are unordered.

use std::f64::consts::PI;

/// Tolerance used by the root solvers (2⁻⁴²).
pub const EPSILON: f64 = 2.273_736_754_432_320_6e-13;

/// Real roots of `a·x² + b·x + c = 0`.
///
/// Returns no roots for a degenerate equation (`a ≈ 0` and `b ≈ 0`) or a
/// negative discriminant, one root for a linear equation or a double root,
/// and two roots otherwise.
pub fn quadratic_roots(a: f64, b: f64, c: f64) -> Vec<f64> {
    if a.abs() < EPSILON {
        if b.abs() < EPSILON {
            return Vec::new();
        }
        return vec![-c / b];
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant.abs() < EPSILON {
        return vec![-b / (2.0 * a)];
    }
    if discriminant > 0.0 {
        let sq = discriminant.sqrt();
        return vec![(-b + sq) / (2.0 * a), (-b - sq) / (2.0 * a)];
    }
    Vec::new()
}

/// Real roots of `a·x³ + b·x² + c·x + d = 0`.
///
/// Solves the depressed cubic `t³ + p·t + q = 0` obtained from the
/// substitution `x = t − b/3a`, branching on the discriminant
/// `q²/4 + p³/27`.
pub fn cubic_roots(a: f64, b: f64, c: f64, d: f64) -> Vec<f64> {
    if a.abs() < EPSILON {
        return quadratic_roots(b, c, d);
    }

    let p = (3.0 * a * c - b * b) / (3.0 * a * a);
    let q = (2.0 * b * b * b - 9.0 * a * b * c + 27.0 * a * a * d) / (27.0 * a * a * a);

    let mut roots = if p.abs() < EPSILON {
        // t³ = -q
        vec![(-q).cbrt()]
    } else if q.abs() < EPSILON {
        // t(t² + p) = 0
        if p < 0.0 {
            let sq = (-p).sqrt();
            vec![0.0, sq, -sq]
        } else {
            vec![0.0]
        }
    } else {
        let discriminant = q * q / 4.0 + p * p * p / 27.0;
        if discriminant.abs() < EPSILON {
            // One simple and one double root.
            vec![-1.5 * q / p, 3.0 * q / p]
        } else if discriminant > 0.0 {
            // Take the cube root of the larger-magnitude term; the other
            // term is -p/3u. Avoids u rounding to zero when p is tiny.
            let u = (-(q / 2.0 + q.signum() * discriminant.sqrt())).cbrt();
            vec![u - p / (3.0 * u)]
        } else {
            // discriminant < 0 implies p < 0, so the acos argument is in [-1, 1].
            let u = 2.0 * (-p / 3.0).sqrt();
            let theta = (3.0 * q / p / u).clamp(-1.0, 1.0).acos() / 3.0;
            let k = 2.0 * PI / 3.0;
            vec![
                u * theta.cos(),
                u * (theta - k).cos(),
                u * (theta - 2.0 * k).cos(),
            ]
        }
    };

    let shift = b / (3.0 * a);
    for root in &mut roots {
        *root -= shift;
    }
    roots
}
