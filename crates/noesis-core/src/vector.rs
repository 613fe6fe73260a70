//! Vector math for concept states.
//!
//! Plain slice functions over `f64`. Length checks belong to the caller
//! (nodes validate dimensions before calling in here); the similarity
//! functions still return `None` on mismatched or degenerate input instead
//! of producing a NaN.

/// Dot product of two equal-length vectors.
///
/// Returns None if the lengths differ.
pub fn dot_product(a: &[f64], b: &[f64]) -> Option<f64> {
    if a.len() != b.len() {
        return None;
    }
    Some(a.iter().zip(b.iter()).map(|(x, y)| x * y).sum())
}

/// Largest absolute component; NaN components are skipped.
pub fn max_abs(v: &[f64]) -> f64 {
    v.iter().fold(0.0f64, |m, x| m.max(x.abs()))
}

/// Euclidean (L2) norm.
///
/// Components are divided by the largest magnitude before squaring, so
/// vectors around 1e-170 or 1e200 neither underflow to zero nor overflow.
pub fn l2_norm(v: &[f64]) -> f64 {
    let scale = max_abs(v);
    if scale == 0.0 || !scale.is_finite() {
        return scale;
    }
    scale * scaled_norm(v, scale)
}

/// Norm of `v / scale`; lies in [1, sqrt(len)] when `scale == max_abs(v)`.
fn scaled_norm(v: &[f64], scale: f64) -> f64 {
    v.iter()
        .map(|x| {
            let y = x / scale;
            y * y
        })
        .sum::<f64>()
        .sqrt()
}

/// True when every component is exactly zero (an empty vector counts).
pub fn is_zero(v: &[f64]) -> bool {
    v.iter().all(|&x| x == 0.0)
}

/// Index and value of the first NaN or infinite component.
pub fn first_non_finite(v: &[f64]) -> Option<(usize, f64)> {
    v.iter().copied().enumerate().find(|(_, x)| !x.is_finite())
}

/// Compute cosine similarity between two vectors.
///
/// Returns a value in [-1, 1] where:
/// - 1.0 = identical direction
/// - 0.0 = orthogonal
/// - -1.0 = opposite direction
///
/// Returns None if vectors have different lengths, are empty, have zero
/// norm, or the result is not finite.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Option<f64> {
    if a.len() != b.len() || a.is_empty() {
        return None;
    }

    // Cosine ignores magnitude, so compare the vectors rescaled to a
    // largest component of 1.
    let scale_a = max_abs(a);
    let scale_b = max_abs(b);
    if scale_a == 0.0 || scale_b == 0.0 || !scale_a.is_finite() || !scale_b.is_finite() {
        return None;
    }

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (&ai, &bi) in a.iter().zip(b.iter()) {
        let ai = ai / scale_a;
        let bi = bi / scale_b;
        dot += ai * bi;
        norm_a += ai * ai;
        norm_b += bi * bi;
    }

    let cos = dot / norm_a.sqrt() / norm_b.sqrt();
    cos.is_finite().then_some(cos)
}

/// Cosine similarity mapped from [-1, 1] onto [0, 1] via `(cos + 1) / 2`.
///
/// The result is clamped so rounding in the cosine can never push it
/// outside the unit interval.
pub fn normalized_similarity(a: &[f64], b: &[f64]) -> Option<f64> {
    cosine_similarity(a, b).map(|cos| ((cos + 1.0) / 2.0).clamp(0.0, 1.0))
}

/// L2 normalize a vector in place. Zero vectors, and vectors with an
/// infinite component, are left untouched.
pub fn l2_normalize(v: &mut [f64]) {
    let scale = max_abs(v);
    if scale == 0.0 || !scale.is_finite() {
        return;
    }
    let norm = scaled_norm(v, scale);
    for x in v.iter_mut() {
        *x = *x / scale / norm;
    }
}

/// L2 normalize a vector, returning a new vector.
pub fn l2_normalized(v: &[f64]) -> Vec<f64> {
    let mut out = v.to_vec();
    l2_normalize(&mut out);
    out
}

/// Elementwise scale by `factor`.
pub fn scaled(v: &[f64], factor: f64) -> Vec<f64> {
    v.iter().map(|x| x * factor).collect()
}
