//! t-test association between words and their features.
//!
//! Scoring happens in two passes over the same vectors: raw counts are first
//! turned into `log10 P(f, w)` normalized over each word's own co-occurrence
//! mass, then into t-test scores. `P(f, w)` is therefore a per-word estimate,
//! not a joint probability over the corpus.

use crate::cooccurrence::{Associations, ConditionalLogProbs, CooccurrenceVectors, RawCounts};
use crate::error::{DepSimError, Result};
use crate::frequency::UnigramLogProbs;
use crate::probability::FeatureLogProbs;

/// `log10 P(w)` used for words that occur in relations but not in the corpus
/// text. A fixed smoothing approximation, not an estimate.
pub const DEFAULT_OOV_LOG_PROB: f64 = -7.0;

/// Lowest accepted fallback. Below it `10^(P(w) + P(f))` underflows to zero
/// for realistic feature probabilities and the t-test divides by zero.
pub const MIN_OOV_LOG_PROB: f64 = -300.0;

/// t-test of an observed `log10 P(f, w)` against independence of `w` and `f`.
pub fn t_test(p_fw_log: f64, p_w_log: f64, p_f_log: f64) -> f64 {
    let p_fw = 10f64.powf(p_fw_log);
    let p_w_times_p_f = 10f64.powf(p_w_log + p_f_log);
    (p_fw - p_w_times_p_f) / p_w_times_p_f.sqrt()
}

impl CooccurrenceVectors<RawCounts> {

    /// Rewrites every count to `log10(count) - log10(w_prime_sum)`, where
    /// `w_prime_sum` is the sum of the word's own counts.
    pub fn normalize(mut self) -> CooccurrenceVectors<ConditionalLogProbs> {

        for vector in self.vectors.values_mut() {
            let w_prime_sum: f64 = vector.values().sum();
            let log_sum = w_prime_sum.log10();
            for value in vector.values_mut() {
                *value = value.log10() - log_sum;
            }
        }

        self.restage()
    }

}

impl CooccurrenceVectors<ConditionalLogProbs> {

    /// Rewrites every conditional probability to its t-test score. Scores
    /// are not clipped, negative values mean less co-occurrence than chance.
    pub fn associate(
        mut self,
        p_w: &UnigramLogProbs,
        p_f: &FeatureLogProbs,
        oov_log_prob: f64,
    ) -> Result<CooccurrenceVectors<Associations>> {

        let mut oov_words = 0usize;
        for (word, vector) in self.vectors.iter_mut() {

            let word_prob = match p_w.get(word) {
                Some(word_prob) => *word_prob,
                None => {
                    oov_words += 1;
                    oov_log_prob
                }
            };

            for (feature, value) in vector.iter_mut() {
                let feat_prob = p_f.get(feature).ok_or_else(|| DepSimError::MissingFeature {
                    relation: feature.relation.clone(),
                    word: feature.word.clone(),
                })?;
                *value = t_test(*value, word_prob, feat_prob);

                // an infinite score would turn self-similarity into NaN
                if !value.is_finite() {
                    return Err(DepSimError::NonFiniteScore {
                        word: word.clone(),
                        relation: feature.relation.clone(),
                        feature: feature.word.clone(),
                    });
                }
            }
        }

        if oov_words > 0 {
            tracing::debug!(
                oov_words,
                oov_log_prob,
                "words without corpus frequency use the fallback probability"
            );
        }

        Ok(self.restage())
    }

}
