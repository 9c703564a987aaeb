//! Cosine similarity over sparse rating maps and dense feature vectors.
//!
//! All inputs are non-negative in practice, so scores land in `[0, 1]`.
//! A zero norm on either side always yields `0.0` instead of dividing by zero.
//! Sums run in ascending key order so equal inputs give bit-identical scores.

use std::collections::BTreeMap;

/// Cosine similarity between two users' rating maps.
///
/// The dot product only runs over keys both users rated, while each norm is
/// taken over that user's full rating map. Users with many ratings outside
/// the overlap are therefore less similar than the overlap alone suggests.
/// Returns `0.0` when the maps share no keys.
pub fn rating_cosine<K>(a: &BTreeMap<K, f64>, b: &BTreeMap<K, f64>) -> f64
where
    K: Ord,
{
    // Both maps iterate in key order, so either side gives the same sum.
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    let mut overlap = false;
    let mut dot = 0.0;
    for (key, x) in small {
        if let Some(y) = large.get(key) {
            overlap = true;
            dot += x * y;
        }
    }

    if !overlap {
        return 0.0;
    }

    let norm_a = squared_norm(a.values());
    let norm_b = squared_norm(b.values());
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Cosine similarity between two dense vectors of equal length.
///
/// # Panics
///
/// Panics in debug builds if the lengths differ; vectors built from the same
/// [`FeatureTable`](super::features::FeatureTable) always share a length.
pub fn vector_cosine(u: &[f64], v: &[f64]) -> f64 {
    debug_assert_eq!(u.len(), v.len(), "feature vectors must share a vocabulary");

    let mut dot = 0.0;
    let mut norm_u = 0.0;
    let mut norm_v = 0.0;
    for (x, y) in u.iter().zip(v) {
        dot += x * y;
        norm_u += x * x;
        norm_v += y * y;
    }

    if norm_u == 0.0 || norm_v == 0.0 {
        0.0
    } else {
        dot / (norm_u.sqrt() * norm_v.sqrt())
    }
}

fn squared_norm<'a>(values: impl Iterator<Item = &'a f64>) -> f64 {
    values.map(|x| x * x).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    fn ratings(pairs: &[(u64, f64)]) -> BTreeMap<u64, f64> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_rating_self_similarity_is_one() {
        let a = ratings(&[(1, 5.0), (2, 3.0), (7, 1.5)]);
        assert!((rating_cosine(&a, &a) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_rating_disjoint_is_zero() {
        let a = ratings(&[(1, 5.0), (2, 3.0)]);
        let b = ratings(&[(3, 4.0), (4, 2.0)]);
        assert_eq!(rating_cosine(&a, &b), 0.0);
    }

    #[test]
    fn test_rating_empty_is_zero() {
        let a = ratings(&[]);
        let b = ratings(&[(1, 4.0)]);
        assert_eq!(rating_cosine(&a, &b), 0.0);
        assert_eq!(rating_cosine(&a, &a), 0.0);
    }

    #[test]
    fn test_rating_is_symmetric() {
        let a = ratings(&[(1, 5.0), (2, 3.0)]);
        let b = ratings(&[(1, 5.0), (2, 3.0), (3, 4.0), (9, 1.0)]);
        assert_eq!(rating_cosine(&a, &b), rating_cosine(&b, &a));
    }

    #[test]
    fn test_rating_is_bitwise_symmetric_for_equal_lengths() {
        let a = ratings(&[(1, 4.5), (3, 0.5), (5, 3.5), (8, 2.0), (13, 1.0), (21, 5.0)]);
        let b = ratings(&[(1, 3.0), (3, 4.5), (5, 1.5), (8, 5.0), (13, 2.5), (34, 4.0)]);
        assert_eq!(
            rating_cosine(&a, &b).to_bits(),
            rating_cosine(&b, &a).to_bits()
        );
    }

    #[test]
    fn test_rating_norms_use_full_vectors() {
        // Overlap is {1: 5*5, 2: 3*3} = 34; norms are sqrt(34) and sqrt(50).
        let a = ratings(&[(1, 5.0), (2, 3.0)]);
        let b = ratings(&[(1, 5.0), (2, 3.0), (3, 4.0)]);
        let expected = 34.0 / (34.0_f64.sqrt() * 50.0_f64.sqrt());
        assert!((rating_cosine(&a, &b) - expected).abs() < EPSILON);
        assert!(rating_cosine(&a, &b) < 1.0);
    }

    #[test]
    fn test_rating_zero_scores_are_zero_norm() {
        let a = ratings(&[(1, 0.0)]);
        let b = ratings(&[(1, 4.0)]);
        assert_eq!(rating_cosine(&a, &b), 0.0);
    }

    #[test]
    fn test_vector_cosine() {
        let u = [1.0, 1.0, 0.0];
        let v = [1.0, 0.0, 0.0];
        let expected = 1.0 / 2.0_f64.sqrt();
        assert!((vector_cosine(&u, &v) - expected).abs() < EPSILON);
        assert_eq!(vector_cosine(&u, &v), vector_cosine(&v, &u));
        assert!((vector_cosine(&u, &u) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_vector_zero_vector_is_zero() {
        let zero = [0.0, 0.0, 0.0];
        let v = [1.0, 0.0, 1.0];
        assert_eq!(vector_cosine(&zero, &v), 0.0);
        assert_eq!(vector_cosine(&v, &zero), 0.0);
        assert_eq!(vector_cosine(&zero, &zero), 0.0);
    }

    #[test]
    fn test_vector_orthogonal_is_zero() {
        assert_eq!(vector_cosine(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    }
}
