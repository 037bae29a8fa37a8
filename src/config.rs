
use serde_json::Value;
use std::{fmt::Display, fs::File, io::BufReader, path::Path};

use crate::association::{DEFAULT_OOV_LOG_PROB, MIN_OOV_LOG_PROB};
use crate::error::{DepSimError, Result};

pub mod files_handling;

/// Parameters of one similarity run.
#[derive(Clone, Debug, PartialEq)]
pub struct JsonTypes {
    pub relations_dir: String,
    pub corpus_file: String,
    pub targets_file: String,
    pub output_dir: Option<String>,
    pub num_similar: usize,
    pub relation_marker: String,
    pub oov_log_prob: f64,
    pub num_threads: usize,
    pub debug: bool,
}

impl Display for JsonTypes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "using parameters:
        relations_dir: {}
        corpus_file: {}
        targets_file: {}
        output_dir: {:?}
        num_similar: {}
        relation_marker: {}
        oov_log_prob: {}
        num_threads: {}
        debug: {}",
        self.relations_dir, self.corpus_file, self.targets_file, self.output_dir, self.num_similar,
        self.relation_marker, self.oov_log_prob, self.num_threads, self.debug)
    }
}

pub struct Config {
    params: JsonTypes
}

fn required_str(json: &Value, key: &str) -> Result<String> {
    match json.get(key) {
        Some(value) => value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| DepSimError::Config(format!("{} should be a string", key))),
        None => Err(DepSimError::Config(format!("{} was not supplied through json", key))),
    }
}

fn optional_usize(json: &Value, key: &str, default: usize) -> Result<usize> {
    match json.get(key) {
        Some(value) => value
            .as_u64()
            .map(|v| v as usize)
            .ok_or_else(|| DepSimError::Config(format!("given {} is not a non-negative integer", key))),
        None => Ok(default),
    }
}

impl Config {

    pub fn get_params(&self) -> JsonTypes {
        self.params.clone()
    }

    /// Reads the run parameters from a json file.
    pub fn new(path: &Path) -> Result<Config> {
        let f = File::open(path).map_err(|e| DepSimError::io(path, e))?;
        let json: Value = serde_json::from_reader(BufReader::new(f))?;
        Config::from_json(&json)
    }

    pub fn from_json(json: &Value) -> Result<Config> {

        if !json.is_object() {
            return Err(DepSimError::Config("parameters should be a json object".to_string()));
        }

        // inputs are mandatory
        let relations_dir = required_str(json, "relations_dir")?;
        let corpus_file = required_str(json, "corpus_file")?;
        let targets_file = required_str(json, "targets_file")?;

        // handle default vs input parameters
        let output_dir = match json.get("output_dir") {
            Some(Value::Null) | None => None,
            Some(_) => Some(required_str(json, "output_dir")?),
        };
        let num_similar = optional_usize(json, "num_similar", 20)?;
        let relation_marker = match json.get("relation_marker") {
            Some(_) => required_str(json, "relation_marker")?,
            None => ".parse".to_string()
        };
        let oov_log_prob = match json.get("oov_log_prob") {
            Some(oov_log_prob) => oov_log_prob
                .as_f64()
                .ok_or_else(|| DepSimError::Config("given oov_log_prob is not numeric".to_string()))?,
            None => DEFAULT_OOV_LOG_PROB
        };
        let num_threads = optional_usize(json, "num_threads", 4)?;
        let debug = match json.get("debug") {
            Some(debug) => debug
                .as_bool()
                .ok_or_else(|| DepSimError::Config("given debug is not boolean".to_string()))?,
            None => false
        };

        let params = JsonTypes {
            relations_dir,
            corpus_file,
            targets_file,
            output_dir,
            num_similar,
            relation_marker,
            oov_log_prob,
            num_threads,
            debug,
        };
        params.validate()?;

        Ok(Self { params })
    }

}

impl JsonTypes {

    pub fn validate(&self) -> Result<()> {
        if self.num_threads == 0 {
            return Err(DepSimError::Config("num_threads should be positive".to_string()));
        }
        if self.relation_marker.is_empty() {
            return Err(DepSimError::Config("relation_marker should not be empty".to_string()));
        }
        if !self.oov_log_prob.is_finite() {
            return Err(DepSimError::Config("oov_log_prob should be finite".to_string()));
        }
        if self.oov_log_prob < MIN_OOV_LOG_PROB {
            return Err(DepSimError::Config(format!("oov_log_prob should not be below {}", MIN_OOV_LOG_PROB)));
        }
        Ok(())
    }

}
