use std::collections::HashMap;

use crate::cooccurrence::{FeatureFrequencies, FeatureKey};

/// Maximum likelihood estimate of every feature, `log10(freq / total)`.
#[derive(Clone, Debug, Default)]
pub struct FeatureLogProbs {
    feature2prob: HashMap<FeatureKey, f64>,
}

impl FeatureLogProbs {

    /// Needs the finished frequency table, the total is taken over all of it.
    pub fn from_frequencies(features: &FeatureFrequencies) -> FeatureLogProbs {

        let log_total = (features.total() as f64).log10();
        let feature2prob = features
            .iter()
            .map(|(feature, freq)| (feature.clone(), (*freq as f64).log10() - log_total))
            .collect();

        FeatureLogProbs { feature2prob }
    }

    pub fn get(&self, feature: &FeatureKey) -> Option<f64> {
        self.feature2prob.get(feature).copied()
    }

    pub fn len(&self) -> usize {
        self.feature2prob.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feature2prob.is_empty()
    }

}
