use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading inputs, configuring a run, or ranking words.
#[derive(Debug, Error)]
pub enum DepSimError {
    #[error("cannot read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("no distributional data for target word '{word}'")]
    NoDistributionalData { word: String },
    #[error("feature ({relation}, {word}) has no probability estimate")]
    MissingFeature { relation: String, word: String },
    #[error("association of '{word}' with ({relation}, {feature}) is not finite")]
    NonFiniteScore { word: String, relation: String, feature: String },
    #[error(transparent)]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl DepSimError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, DepSimError>;
