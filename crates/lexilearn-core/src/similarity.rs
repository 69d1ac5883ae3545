//! Artwork similarity.
//!
//! Drawings are compared through feature vectors produced elsewhere (an
//! image embedding model); this module only scores two vectors.

/// Cosine similarity of two equal-length, non-zero, finite vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f64> {
    if a.len() != b.len() || a.is_empty() {
        return None;
    }
    if !a.iter().chain(b).all(|x| x.is_finite()) {
        return None;
    }
    let (mut dot, mut norm_a, mut norm_b) = (0.0f64, 0.0f64, 0.0f64);
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return None;
    }
    let similarity = dot / (norm_a.sqrt() * norm_b.sqrt());
    similarity.is_finite().then_some(similarity)
}

/// Similarity as a whole percentage, clamped to `0..=100`.
pub fn similarity_percent(a: &[f32], b: &[f32]) -> Option<u8> {
    cosine_similarity(a, b).map(|s| (s.clamp(0.0, 1.0) * 100.0).round() as u8)
}
