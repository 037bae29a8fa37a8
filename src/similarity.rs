use std::cmp::Ordering;

use rayon::prelude::*;

use crate::cooccurrence::{Associations, CooccurrenceVectors, FeatureVector};
use crate::error::{DepSimError, Result};

/// Jaccard-style similarity of two association vectors.
///
/// Walks the union of both feature sets in key order, a feature missing on
/// one side counts as 0 there. Returns `sum(min) / sum(max)`, or 0 when
/// `sum(max)` is exactly 0. Negative association scores can make `sum(max)`
/// negative; the ratio is still taken as is.
pub fn jaccard(a: &FeatureVector, b: &FeatureVector) -> f64 {

    let mut sum_min = 0.0;
    let mut sum_max = 0.0;

    let mut left = a.iter();
    let mut right = b.iter();
    let mut l = left.next();
    let mut r = right.next();

    loop {
        let (x, y) = match (l, r) {
            (Some((ka, va)), Some((kb, vb))) => match ka.cmp(kb) {
                Ordering::Less => {
                    l = left.next();
                    (*va, 0.0)
                }
                Ordering::Greater => {
                    r = right.next();
                    (0.0, *vb)
                }
                Ordering::Equal => {
                    l = left.next();
                    r = right.next();
                    (*va, *vb)
                }
            },
            (Some((_, va)), None) => {
                l = left.next();
                (*va, 0.0)
            }
            (None, Some((_, vb))) => {
                r = right.next();
                (0.0, *vb)
            }
            (None, None) => break,
        };
        sum_min += f64::min(x, y);
        sum_max += f64::max(x, y);
    }

    if sum_max == 0.0 {
        return 0.0;
    }
    sum_min / sum_max
}

/// Ranks words by the similarity of their association vectors.
#[derive(Debug)]
pub struct Similarity {
    vectors: CooccurrenceVectors<Associations>,
}

impl Similarity {

    pub fn new(vectors: CooccurrenceVectors<Associations>) -> Similarity {
        Self { vectors }
    }

    pub fn vocab_size(&self) -> usize {
        self.vectors.len()
    }

    pub fn extract_vec_from_word(&self, token: &str) -> Result<&FeatureVector> {
        self.vectors.get(token).ok_or_else(|| DepSimError::NoDistributionalData {
            word: token.to_owned(),
        })
    }

    pub fn similarity(&self, a: &str, b: &str) -> Result<f64> {
        Ok(jaccard(self.extract_vec_from_word(a)?, self.extract_vec_from_word(b)?))
    }

    /// The `k` words most similar to `token`, the token itself included.
    ///
    /// Sorted by score descending, equal scores by word ascending. Fails when
    /// `token` has no association vector at all.
    pub fn find_k_most_similar(&self, token: &str, k: usize) -> Result<Vec<(String, f64)>> {

        let vec = self.extract_vec_from_word(token)?;
        if k == 0 {
            return Ok(Vec::new());
        }

        let mut sim_tokens: Vec<(String, f64)> = self
            .vectors
            .vectors
            .par_iter()
            .map(|(other, other_vec)| (other.to_owned(), jaccard(vec, other_vec)))
            .collect();

        sim_tokens.sort_by(|(t, s), (u, r)| r.total_cmp(s).then_with(|| t.cmp(u)));
        sim_tokens.truncate(k);

        Ok(sim_tokens)
    }

}
