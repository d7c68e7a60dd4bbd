// ============================================
// Content Similarity Scorer
// ============================================
//
// Cosine similarity between a viewer's skills/interests and a post's
// skills/technologies/category.
//
// - Tokens are lower-cased before comparison
// - Vectors are binary presence flags over the union of both token sets
// - The vocabulary is rebuilt for every (viewer, post) pair

use std::collections::{BTreeSet, HashSet};

/// Binary presence vectors for one (viewer, post) pair
#[derive(Debug, Clone, PartialEq)]
pub struct TokenVectors {
    /// Lower-cased union of both token sets, sorted
    pub vocabulary: Vec<String>,
    pub user: Vec<f64>,
    pub item: Vec<f64>,
}

impl TokenVectors {
    pub fn build<U, I>(user_tokens: &[U], item_tokens: &[I]) -> Self
    where
        U: AsRef<str>,
        I: AsRef<str>,
    {
        let user_set = lowercase_set(user_tokens);
        let item_set = lowercase_set(item_tokens);

        let vocabulary: Vec<String> = user_set
            .iter()
            .chain(item_set.iter())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let presence = |set: &HashSet<String>| -> Vec<f64> {
            vocabulary
                .iter()
                .map(|term| if set.contains(term) { 1.0 } else { 0.0 })
                .collect()
        };

        let user = presence(&user_set);
        let item = presence(&item_set);

        Self {
            vocabulary,
            user,
            item,
        }
    }

    pub fn dimension(&self) -> usize {
        self.vocabulary.len()
    }

    /// Cosine of the two vectors; 0 when either norm is zero.
    pub fn cosine(&self) -> f64 {
        let dot: f64 = self.user.iter().zip(&self.item).map(|(u, i)| u * i).sum();
        // Squared norms of binary vectors are their popcounts
        let user_norm_sq: f64 = self.user.iter().map(|u| u * u).sum();
        let item_norm_sq: f64 = self.item.iter().map(|i| i * i).sum();

        if user_norm_sq == 0.0 || item_norm_sq == 0.0 {
            return 0.0;
        }

        dot / (user_norm_sq * item_norm_sq).sqrt()
    }
}

fn lowercase_set<T: AsRef<str>>(tokens: &[T]) -> HashSet<String> {
    tokens.iter().map(|t| t.as_ref().to_lowercase()).collect()
}

/// Case-insensitive cosine similarity of two token lists, in [0, 1].
///
/// Returns exactly 0 when either list is empty.
pub fn similarity<U, I>(user_tokens: &[U], item_tokens: &[I]) -> f64
where
    U: AsRef<str>,
    I: AsRef<str>,
{
    if user_tokens.is_empty() || item_tokens.is_empty() {
        return 0.0;
    }

    TokenVectors::build(user_tokens, item_tokens).cosine()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-3;

    fn approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected ~{}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_identical_lists() {
        approx(similarity(&["React", "Node"], &["React", "Node"]), 1.0);
    }

    #[test]
    fn test_half_overlap() {
        approx(similarity(&["React", "Node"], &["React", "Python"]), 0.5);
    }

    #[test]
    fn test_disjoint_lists() {
        assert_eq!(similarity(&["React", "Node"], &["Java", "C++"]), 0.0);
    }

    #[test]
    fn test_uneven_overlap() {
        approx(similarity(&["React", "Node", "Go"], &["React", "Go"]), 0.816);
    }

    #[test]
    fn test_empty_inputs() {
        let empty: [&str; 0] = [];
        assert_eq!(similarity(&empty, &["React"]), 0.0);
        assert_eq!(similarity(&["React"], &empty), 0.0);
        assert_eq!(similarity(&empty, &empty), 0.0);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(similarity(&["React"], &["react"]), 1.0);
        assert_eq!(similarity(&["RUST", "tokio"], &["rust", "TOKIO"]), 1.0);
    }

    #[test]
    fn test_identity_is_exact() {
        let samples: [&[&str]; 4] = [
            &["a"],
            &["a", "b"],
            &["a", "b", "c"],
            &["Rust", "rust", "Go", "Zig", "C"],
        ];
        for tokens in samples {
            assert_eq!(similarity(tokens, tokens), 1.0, "tokens: {:?}", tokens);
        }
    }

    #[test]
    fn test_symmetry() {
        let pairs: [(&[&str], &[&str]); 4] = [
            (&["React", "Node", "Go"], &["React", "Go"]),
            (&["a", "b", "c", "d"], &["d", "e"]),
            (&["x"], &["X", "y", "z"]),
            (&["one"], &["two"]),
        ];
        for (a, b) in pairs {
            assert_eq!(similarity(a, b), similarity(b, a));
        }
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(
            similarity(&["React", "react", "REACT"], &["React"]),
            1.0
        );
        approx(similarity(&["React", "React", "Node"], &["React"]), 0.707);
    }

    #[test]
    fn test_vector_dimension_is_pairwise_union() {
        let vectors = TokenVectors::build(&["React", "Node", "node"], &["react", "Go"]);
        assert_eq!(vectors.dimension(), 3);
        assert_eq!(vectors.vocabulary, vec!["go", "node", "react"]);
        assert_eq!(vectors.user, vec![0.0, 1.0, 1.0]);
        assert_eq!(vectors.item, vec![1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_zero_norm_vector_short_circuits() {
        let vectors = TokenVectors {
            vocabulary: vec!["rust".into()],
            user: vec![0.0],
            item: vec![1.0],
        };
        assert_eq!(vectors.cosine(), 0.0);
    }

    #[test]
    fn test_accepts_owned_strings() {
        let user: Vec<String> = vec!["Rust".into(), "Actix".into()];
        let item = vec!["rust"];
        approx(similarity(&user, &item), 0.707);
    }
}
