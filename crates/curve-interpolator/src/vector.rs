//! Fixed-arity vector arithmetic on `[f64; D]`.
//!
//! The dimension is a const generic, so every binary operation takes operands
//! of equal length by construction. Operations that only make sense in 2D or
//! 3D are typed on `[f64; 2]` / `[f64; 3]`.

/// A point or direction with `D` real components.
pub type Vector<const D: usize> = [f64; D];

/// Component-wise sum `a + b`.
#[inline]
pub fn add<const D: usize>(a: &Vector<D>, b: &Vector<D>) -> Vector<D> {
    let mut out = *a;
    for (o, v) in out.iter_mut().zip(b) {
        *o += v;
    }
    out
}

/// Component-wise difference `a - b`.
#[inline]
pub fn sub<const D: usize>(a: &Vector<D>, b: &Vector<D>) -> Vector<D> {
    let mut out = *a;
    for (o, v) in out.iter_mut().zip(b) {
        *o -= v;
    }
    out
}

/// Scale every component by `s`.
#[inline]
pub fn scale<const D: usize>(v: &Vector<D>, s: f64) -> Vector<D> {
    v.map(|c| c * s)
}

/// Dot product.
#[inline]
pub fn dot<const D: usize>(a: &Vector<D>, b: &Vector<D>) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Z component of the cross product of two 2D vectors.
#[inline]
pub fn cross2(a: &Vector<2>, b: &Vector<2>) -> f64 {
    a[0] * b[1] - a[1] * b[0]
}

/// Cross product of two 3D vectors.
#[inline]
pub fn cross3(a: &Vector<3>, b: &Vector<3>) -> Vector<3> {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Squared Euclidean length.
#[inline]
pub fn sum_of_squares<const D: usize>(v: &Vector<D>) -> f64 {
    v.iter().map(|c| c * c).sum()
}

/// Euclidean length.
#[inline]
pub fn magnitude<const D: usize>(v: &Vector<D>) -> f64 {
    sum_of_squares(v).sqrt()
}

/// Euclidean distance between two points.
#[inline]
pub fn distance<const D: usize>(a: &Vector<D>, b: &Vector<D>) -> f64 {
    magnitude(&sub(a, b))
}

/// Unit vector in the direction of `v`, or `v` unchanged if it has zero length.
pub fn normalize<const D: usize>(v: &Vector<D>) -> Vector<D> {
    let len = magnitude(v);
    if len > 0.0 { scale(v, 1.0 / len) } else { *v }
}

/// Rotate a 2D vector a quarter turn counter-clockwise.
#[inline]
pub fn orthogonal(v: &Vector<2>) -> Vector<2> {
    [-v[1], v[0]]
}

/// True if every component is finite.
#[inline]
pub fn is_finite<const D: usize>(v: &Vector<D>) -> bool {
    v.iter().all(|c| c.is_finite())
}
