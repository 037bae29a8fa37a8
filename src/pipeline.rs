
// imports
use crate::config::files_handling::{read_input, save_output, RelationDir, TargetWords};
use crate::config::JsonTypes;
use crate::cooccurrence::Counts;
use crate::error::{DepSimError, Result};
use crate::frequency::WordFrequencies;
use crate::probability::FeatureLogProbs;
use crate::relations::{RelationSource, Relations};
use crate::report::{Neighbour, Ranking, TargetReport};
use crate::similarity::Similarity;

use rayon::ThreadPoolBuilder;
use std::time::Instant;

/// Name of the results file written to `output_dir`.
pub const RESULTS_FILE: &str = "similar_words";

/// Everything the ranking step needs, built once per run.
#[derive(Debug)]
pub struct Model {
    frequencies: WordFrequencies,
    similarity: Similarity,
    skipped_lines: usize,
    debug: bool,
}

impl Model {

    pub fn frequencies(&self) -> &WordFrequencies {
        &self.frequencies
    }

    pub fn similarity(&self) -> &Similarity {
        &self.similarity
    }

    /// Relation lines that were rejected during ingestion.
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    /// Ranks the `k` most similar words to `target`. A target without any
    /// relation data is reported as such rather than dropped.
    pub fn report(&self, target: &str, k: usize) -> Result<TargetReport> {

        let target = target.trim().to_lowercase();
        let frequency = self.frequencies.frequency(&target);

        let ranking = match self.similarity.find_k_most_similar(&target, k) {
            Ok(similar) => Ranking::Ranked {
                neighbours: similar
                    .into_iter()
                    .map(|(word, score)| Neighbour { word, score })
                    .collect(),
            },
            Err(DepSimError::NoDistributionalData { word }) => {
                tracing::warn!(target = %word, "no distributional data for target word");
                Ranking::NoDistributionalData
            }
            Err(e) => return Err(e),
        };

        if self.debug {
            if let Ok(vec) = self.similarity.extract_vec_from_word(&target) {
                tracing::debug!(target = %target, features = vec.len(), ?frequency, "ranked target");
            }
        }

        Ok(TargetReport { target, frequency, ranking })
    }

}

pub struct Pipeline {}

impl Pipeline {

    // runs the scoring procedure over inputs already in memory -
    // -> relation ingestion and word counting, side by side
    // -> co-occurrence vectors and feature frequencies
    // -> feature probabilities
    // -> conditional probabilities, then t-test associations

    pub fn build<S: RelationSource + Sync>(
        source: &S,
        corpus: &str,
        oov_log_prob: f64,
        debug: bool,
    ) -> Result<Model> {

        let timer = Instant::now();
        // every relation document is loaded before ingestion starts
        let (ingestion, frequencies) = rayon::join(
            || source.documents().map(|documents| (documents.len(), Relations::ingest(&documents))),
            || WordFrequencies::from_text(corpus),
        );
        let (documents, ingestion) = ingestion?;

        if ingestion.skipped_lines > 0 {
            tracing::warn!(skipped_lines = ingestion.skipped_lines, "skipped malformed relation lines");
        }
        tracing::info!(
            documents,
            triples = ingestion.triples.len(),
            total_tokens = frequencies.total_tokens(),
            vocabulary = frequencies.len(),
            elapsed_ms = timer.elapsed().as_millis() as u64,
            "ingested relations and counted corpus"
        );

        let timer = Instant::now();
        let (vectors, features) = Counts::run(&ingestion.triples);
        let p_f = FeatureLogProbs::from_frequencies(&features);
        let p_w = frequencies.unigram_log_probs();

        if debug {
            let mut common: Vec<_> = features.iter().collect();
            common.sort_by(|(ka, ca), (kb, cb)| cb.cmp(ca).then_with(|| ka.cmp(kb)));
            for (feature, count) in common.iter().take(10) {
                tracing::debug!(
                    relation = %feature.relation,
                    word = %feature.word,
                    count,
                    "frequent feature"
                );
            }
        }

        let vectors = vectors.normalize().associate(&p_w, &p_f, oov_log_prob)?;
        tracing::info!(
            words = vectors.len(),
            features = features.len(),
            feature_occurrences = features.total(),
            elapsed_ms = timer.elapsed().as_millis() as u64,
            "scored association vectors"
        );

        Ok(Model {
            frequencies,
            similarity: Similarity::new(vectors),
            skipped_lines: ingestion.skipped_lines,
            debug,
        })
    }

    /// Runs a whole configured job: loads every input, builds the model and
    /// ranks each target word in input order. Reports are also saved as json
    /// when an output directory is configured.
    pub fn run(params: &JsonTypes) -> Result<Vec<TargetReport>> {

        params.validate()?;
        tracing::debug!("{}", params);

        let timer = Instant::now();
        let pool = ThreadPoolBuilder::new().num_threads(params.num_threads).build()?;

        let reports = pool.install(|| -> Result<Vec<TargetReport>> {

            let (targets, corpus) = rayon::join(
                || read_input::<TargetWords>(&params.targets_file),
                || read_input::<String>(&params.corpus_file),
            );
            let source = RelationDir::new(&params.relations_dir, &params.relation_marker);
            let model = Pipeline::build(&source, &corpus?, params.oov_log_prob, params.debug)?;
            let targets = targets?;

            targets.0.iter().map(|target| model.report(target, params.num_similar)).collect()
        })?;

        if let Some(output_dir) = &params.output_dir {
            let out = save_output(output_dir, RESULTS_FILE, &reports)?;
            tracing::info!(path = %out.display(), "saved similar words");
        }

        tracing::info!(
            targets = reports.len(),
            elapsed_s = timer.elapsed().as_secs(),
            "finished finding similar words"
        );
        Ok(reports)
    }

}


#[cfg(test)]
mod tests {

    use super::Pipeline;
    use crate::association::DEFAULT_OOV_LOG_PROB;
    use crate::error::{DepSimError, Result};
    use crate::relations::{RelationDocument, RelationSource};
    use crate::report::{Neighbour, Ranking};

    fn documents() -> Vec<RelationDocument> {
        vec![
            RelationDocument::new("split_0.parse", "nn(bush-1, family-2)\nroot(ROOT-0, family-2)\n"),
            RelationDocument::new("split_1.parse", "nn(Bush-1, Family-2)\namod(good-1, george-2)\nbad line (x)\n"),
        ]
    }

    #[test]
    fn builds_model_from_documents() {
        let corpus = "bush family good george";
        let model = Pipeline::build(&documents(), corpus, DEFAULT_OOV_LOG_PROB, false).unwrap();

        assert_eq!(model.skipped_lines(), 1);
        assert_eq!(model.frequencies().total_tokens(), 4);
        assert_eq!(model.similarity().vocab_size(), 4);

        let report = model.report("Bush", 3).unwrap();
        assert_eq!(report.target, "bush");
        assert_eq!(report.frequency, Some(1));
        assert_eq!(
            report.ranking,
            Ranking::Ranked {
                neighbours: vec![
                    Neighbour { word: "bush".to_string(), score: 1.0 },
                    Neighbour { word: "family".to_string(), score: 0.0 },
                    Neighbour { word: "george".to_string(), score: 0.0 },
                ]
            }
        );
    }

    #[test]
    fn reports_targets_without_data() {
        let corpus = "bush family good george cleopatra";
        let model = Pipeline::build(&documents(), corpus, DEFAULT_OOV_LOG_PROB, true).unwrap();

        let report = model.report("cleopatra", 5).unwrap();
        assert_eq!(report.frequency, Some(1));
        assert_eq!(report.ranking, Ranking::NoDistributionalData);

        let report = model.report("caesar", 5).unwrap();
        assert_eq!(report.frequency, None);
        assert_eq!(report.ranking, Ranking::NoDistributionalData);
    }

    // a producer that cannot hand over its documents
    struct UnreachableParser;

    impl RelationSource for UnreachableParser {
        fn documents(&self) -> Result<Vec<RelationDocument>> {
            Err(DepSimError::io("parser.sock", std::io::Error::from(std::io::ErrorKind::NotFound)))
        }
    }

    #[test]
    fn relation_source_failure_is_fatal() {
        match Pipeline::build(&UnreachableParser, "bush family", DEFAULT_OOV_LOG_PROB, false) {
            Err(DepSimError::Io { path, .. }) => assert!(path.ends_with("parser.sock")),
            other => panic!("expected an io error, got {:?}", other),
        }
    }

}
