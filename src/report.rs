use std::fmt::Display;

use serde::Serialize;

/// A candidate word and its similarity to the target.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Neighbour {
    pub word: String,
    pub score: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Ranking {
    Ranked { neighbours: Vec<Neighbour> },
    NoDistributionalData,
}

/// Everything reported for one target word.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TargetReport {
    pub target: String,
    /// Corpus frequency, `None` when the word never occurs in the corpus text.
    pub frequency: Option<usize>,
    pub ranking: Ranking,
}

impl TargetReport {

    pub fn neighbours(&self) -> Option<&[Neighbour]> {
        match &self.ranking {
            Ranking::Ranked { neighbours } => Some(neighbours.as_slice()),
            Ranking::NoDistributionalData => None,
        }
    }

}

impl Display for TargetReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {

        writeln!(f, "Target word: {}\n", self.target)?;
        match self.frequency {
            Some(frequency) => writeln!(f, "Target word frequency in corpus: {}\n", frequency)?,
            None => writeln!(f, "Target word frequency in corpus: not found\n")?,
        }

        match &self.ranking {
            Ranking::Ranked { neighbours } => {
                writeln!(f, "Similar words and their similarity scores : \n")?;
                // scores are padded as text, left-aligned
                for neighbour in neighbours {
                    let score = format!("{:?}", neighbour.score);
                    writeln!(f, "{:<30}      {:<30}", neighbour.word, score)?;
                }
            },
            Ranking::NoDistributionalData => {
                writeln!(f, "no distributional data for target word '{}'", self.target)?;
            }
        }
        Ok(())
    }
}
