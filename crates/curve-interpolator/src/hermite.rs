//! Monotone piecewise-cubic Hermite inverse of a segment's arc length.
//!
//! A segment is sampled at `n` equally spaced local times `tᵢ = i/(n−1)`.
//! For each sample we know the arc length `lᵢ` from the segment start and the
//! slope `dt/dl = 1/|P'(tᵢ)|`. Between samples the map `l → t` is a cubic
//! Hermite polynomial in the local length offset `ld = l − lᵢ`:
//!
//! ```text
//! t(ld) = tᵢ + mᵢ·ld + cᵢ·ld² + dᵢ·ld³
//!
//! sᵢ = Δt / Δl                       (secant)
//! cᵢ = (3sᵢ − 2mᵢ − mᵢ₊₁) / Δl
//! dᵢ = (mᵢ + mᵢ₊₁ − 2sᵢ) / Δl²
//! ```
//!
//! Slopes are limited with the Fritsch–Carlson condition so each piece stays
//! monotone and never overshoots its sub-interval.

/// Index `i` of the interval `[table[i], table[i+1])` containing `value`.
///
/// `table` must be non-decreasing with at least two entries. Values below
/// the first entry map to interval 0, values at or past the last entry to
/// the last interval.
#[inline]
pub fn find_interval(table: &[f64], value: f64) -> usize {
    let last = table.len().saturating_sub(2);
    table
        .partition_point(|&entry| entry <= value)
        .saturating_sub(1)
        .min(last)
}

/// Fitted inverse `length → local t` for one segment.
#[derive(Clone, Debug, PartialEq)]
pub struct InverseFit {
    lengths: Vec<f64>,
    slopes: Vec<f64>,
    quadratic: Vec<f64>,
    cubic: Vec<f64>,
}

impl InverseFit {
    /// Fit the inverse from cumulative sample lengths and `dt/dl` slopes.
    ///
    /// Both slices have one entry per sample; at least two samples are
    /// needed for a usable fit. Extra slopes are ignored.
    pub fn new(lengths: Vec<f64>, slopes: Vec<f64>) -> Self {
        let pieces = lengths.len().saturating_sub(1);
        let step = if pieces > 0 { 1.0 / pieces as f64 } else { 1.0 };

        let mut slopes = slopes;
        slopes.resize(lengths.len(), 0.0);
        limit_slopes(&lengths, &mut slopes, step);

        let mut quadratic = Vec::with_capacity(pieces);
        let mut cubic = Vec::with_capacity(pieces);
        for (l, m) in lengths.windows(2).zip(slopes.windows(2)) {
            let dl = l[1] - l[0];
            if dl > 0.0 {
                let secant = step / dl;
                quadratic.push((3.0 * secant - 2.0 * m[0] - m[1]) / dl);
                cubic.push((m[0] + m[1] - 2.0 * secant) / (dl * dl));
            } else {
                quadratic.push(0.0);
                cubic.push(0.0);
            }
        }

        Self {
            lengths,
            slopes,
            quadratic,
            cubic,
        }
    }

    /// Arc length of the whole segment.
    pub fn total_length(&self) -> f64 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Cumulative arc length at each sample.
    pub fn lengths(&self) -> &[f64] {
        &self.lengths
    }

    /// Limited `dt/dl` slope at each sample.
    pub fn slopes(&self) -> &[f64] {
        &self.slopes
    }

    /// Local time at which the segment reaches arc length `length`.
    ///
    /// Clamped to `0` at or before the start and `1` at or past the end.
    pub fn evaluate(&self, length: f64) -> f64 {
        if length <= 0.0 || self.quadratic.is_empty() {
            return 0.0;
        }
        if length >= self.total_length() {
            return 1.0;
        }

        let i = find_interval(&self.lengths, length);
        let step = 1.0 / self.quadratic.len() as f64;
        let ti = i as f64 * step;
        let (Some(li), Some(mi), Some(ci), Some(di)) = (
            self.lengths.get(i),
            self.slopes.get(i),
            self.quadratic.get(i),
            self.cubic.get(i),
        ) else {
            return ti;
        };

        let ld = length - li;
        (((di * ld + ci) * ld + mi) * ld + ti).clamp(0.0, 1.0)
    }
}

/// Fritsch–Carlson limiting: keep `(α, β) = (mᵢ, mᵢ₊₁)/sᵢ` inside the circle of radius 3.
fn limit_slopes(lengths: &[f64], slopes: &mut [f64], step: f64) {
    let mut rest = slopes.iter_mut();
    let Some(mut left) = rest.next() else {
        return;
    };
    for (pair, right) in lengths.windows(2).zip(rest) {
        if let [l0, l1] = *pair {
            let dl = l1 - l0;
            if dl > 0.0 {
                let secant = step / dl;
                let alpha = *left / secant;
                let beta = *right / secant;
                let radius = alpha * alpha + beta * beta;
                if radius > 9.0 {
                    let tau = 3.0 / radius.sqrt();
                    *left = tau * alpha * secant;
                    *right = tau * beta * secant;
                }
            }
        }
        left = right;
    }
}
