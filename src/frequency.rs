
// imports
use std::collections::HashMap;
use std::sync::LazyLock;

use rayon::prelude::*;
use regex::Regex;

// word-like runs, the same class the parser's sentences were split on
static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid word pattern"));

/// Log-space unigram probabilities, `log10(count / total_tokens)`.
pub type UnigramLogProbs = HashMap<String, f64>;

/// Occurrence counts of every word in the corpus.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WordFrequencies {
    token2count: HashMap<String, usize>,
    total_tokens: usize,
}

impl WordFrequencies {

    fn accumulate(line: &str, token2count: &mut HashMap<String, usize>) -> usize {

        let line = line.to_lowercase();
        let mut n = 0;
        for tok in WORD.find_iter(&line) {
            *token2count.entry(tok.as_str().to_owned()).or_insert(0) += 1;
            n += 1;
        }
        n
    }

    fn merge(mut self, other: WordFrequencies) -> WordFrequencies {
        for (tok, count) in other.token2count {
            *self.token2count.entry(tok).or_insert(0) += count;
        }
        self.total_tokens += other.total_tokens;
        self
    }

    /// Counts the words of a whole corpus.
    ///
    /// Lines are counted in parallel shards whose tables are summed before
    /// returning, so the result does not depend on how lines were scheduled.
    pub fn from_text(text: &str) -> WordFrequencies {
        text.par_lines()
            .fold(WordFrequencies::default, |mut shard, line| {
                shard.total_tokens += WordFrequencies::accumulate(line, &mut shard.token2count);
                shard
            })
            .reduce(WordFrequencies::default, WordFrequencies::merge)
    }

    pub fn frequency(&self, word: &str) -> Option<usize> {
        self.token2count.get(word).copied()
    }

    pub fn total_tokens(&self) -> usize {
        self.total_tokens
    }

    pub fn len(&self) -> usize {
        self.token2count.len()
    }

    pub fn is_empty(&self) -> bool {
        self.token2count.is_empty()
    }

    pub fn unigram_log_probs(&self) -> UnigramLogProbs {
        let log_total = (self.total_tokens as f64).log10();
        self.token2count
            .iter()
            .map(|(tok, count)| (tok.to_owned(), (*count as f64).log10() - log_total))
            .collect()
    }

}
