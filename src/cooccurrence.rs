
// imports
use crate::relations::RelationTriple;

use std::collections::{BTreeMap, HashMap};
use std::marker::PhantomData;
use serde::Serialize;


/// A distributional context: the relation and the word on the other end of it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FeatureKey {
    pub relation: String,
    pub word: String,
}

impl FeatureKey {
    pub fn new(relation: &str, word: &str) -> Self {
        Self {
            relation: relation.to_owned(),
            word: word.to_owned(),
        }
    }
}

/// Feature -> value for one word. Ordered so that sums over a vector are
/// always accumulated in the same order.
pub type FeatureVector = BTreeMap<FeatureKey, f64>;

// Stages of the value held by a `CooccurrenceVectors`. Every stage rewrites
// the previous one in place, only one value per (word, feature) is ever live.

/// Raw co-occurrence counts.
#[derive(Debug)]
pub struct RawCounts;
/// `log10(count / w_prime_sum)`, normalized over the word's own features.
#[derive(Debug)]
pub struct ConditionalLogProbs;
/// t-test association scores.
#[derive(Debug)]
pub struct Associations;

/// Per-word feature vectors, tagged with the stage of their values.
#[derive(Debug)]
pub struct CooccurrenceVectors<S> {
    pub(crate) vectors: HashMap<String, FeatureVector>,
    _stage: PhantomData<S>,
}

impl<S> CooccurrenceVectors<S> {

    pub fn get(&self, word: &str) -> Option<&FeatureVector> {
        self.vectors.get(word)
    }

    pub fn value(&self, word: &str, feature: &FeatureKey) -> Option<f64> {
        self.vectors.get(word)?.get(feature).copied()
    }

    pub fn words(&self) -> impl Iterator<Item = &String> {
        self.vectors.keys()
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub(crate) fn restage<T>(self) -> CooccurrenceVectors<T> {
        CooccurrenceVectors { vectors: self.vectors, _stage: PhantomData }
    }

}

/// Total count of each feature over all the words exhibiting it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeatureFrequencies {
    pub(crate) feature2count: HashMap<FeatureKey, u64>,
}

impl FeatureFrequencies {

    pub fn get(&self, feature: &FeatureKey) -> Option<u64> {
        self.feature2count.get(feature).copied()
    }

    pub fn total(&self) -> u64 {
        self.feature2count.values().sum()
    }

    pub fn len(&self) -> usize {
        self.feature2count.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feature2count.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FeatureKey, &u64)> {
        self.feature2count.iter()
    }

}


pub struct Counts {}

impl Counts {

    /// How many times each exact triple was observed.
    pub fn triple_frequencies(triples: &[RelationTriple]) -> HashMap<&RelationTriple, u64> {
        let mut triple2count: HashMap<&RelationTriple, u64> = HashMap::new();
        for triple in triples {
            *triple2count.entry(triple).or_insert(0) += 1;
        }
        triple2count
    }

    /// Builds the raw count vectors and the feature frequency table.
    ///
    /// A triple `(r, a, b)` seen `c` times is a feature `(r, b)` of `a` and a
    /// feature `(r, a)` of `b`. Each side is tallied on its own, in the vectors
    /// and in the feature table alike.
    pub fn build(
        triple2count: &HashMap<&RelationTriple, u64>,
    ) -> (CooccurrenceVectors<RawCounts>, FeatureFrequencies) {

        let mut vectors: HashMap<String, FeatureVector> = HashMap::new();
        let mut features = FeatureFrequencies::default();

        for (triple, count) in triple2count {

            let feature_a = FeatureKey::new(&triple.relation, &triple.word_b);
            let feature_b = FeatureKey::new(&triple.relation, &triple.word_a);

            *features.feature2count.entry(feature_a.clone()).or_insert(0) += count;
            *features.feature2count.entry(feature_b.clone()).or_insert(0) += count;

            let val = vectors.entry(triple.word_a.to_owned()).or_default().entry(feature_a).or_insert(0.0);
            *val += *count as f64;
            let val = vectors.entry(triple.word_b.to_owned()).or_default().entry(feature_b).or_insert(0.0);
            *val += *count as f64;

        }

        (CooccurrenceVectors { vectors, _stage: PhantomData }, features)

    }

    pub fn run(triples: &[RelationTriple]) -> (CooccurrenceVectors<RawCounts>, FeatureFrequencies) {
        let triple2count = Counts::triple_frequencies(triples);
        tracing::debug!(distinct_triples = triple2count.len(), "counted relation triples");
        Counts::build(&triple2count)
    }

}
