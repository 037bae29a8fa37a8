
use flate2::read::GzDecoder;
use rayon::prelude::*;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{DepSimError, Result};
use crate::relations::{RelationDocument, RelationSource};
use crate::report::TargetReport;


pub fn read_input<R: ReadFile>(file_path: &str) -> Result<<R as ReadFile>::Item> {
    <R as ReadFile>::read_file(file_path)
}

pub fn save_output<S: SaveFile>(output_dir: &str, file_name: &str, item: &S) -> Result<PathBuf> {

    // create output folder
    fs::create_dir_all(output_dir)
        .map_err(|e| DepSimError::Write { path: output_dir.into(), source: e })?;
    item.save_file(output_dir, file_name)
}

pub trait ReadFile {
    type Item;
    fn read_file(file_path: &str) -> Result<Self::Item>;
}

pub trait SaveFile {
    fn save_file(&self, output_dir: &str, file_name: &str) -> Result<PathBuf>;
}

// parser output is not guaranteed to be valid utf-8, bad bytes are replaced
fn read_text(path: &Path) -> Result<String> {

    let mut f = BufReader::new(File::open(path).map_err(|e| DepSimError::io(path, e))?);
    let mut buf: Vec<u8> = Vec::new();

    let is_gz = path.extension().is_some_and(|ext| ext == "gz");
    if is_gz {
        GzDecoder::new(f).read_to_end(&mut buf).map_err(|e| DepSimError::io(path, e))?;
    } else {
        f.read_to_end(&mut buf).map_err(|e| DepSimError::io(path, e))?;
    }

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

impl ReadFile for String {
    type Item = Self;
    fn read_file(file_path: &str) -> Result<Self::Item> {
        read_text(Path::new(file_path))
    }
}

/// Target words, one per line, lower-cased; blank lines are dropped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TargetWords(pub Vec<String>);

impl TargetWords {
    pub fn parse(text: &str) -> TargetWords {
        TargetWords(
            text.lines()
                .map(|line| line.trim().to_lowercase())
                .filter(|line| !line.is_empty())
                .collect(),
        )
    }
}

impl ReadFile for TargetWords {
    type Item = Self;
    fn read_file(file_path: &str) -> Result<Self::Item> {
        Ok(TargetWords::parse(&read_text(Path::new(file_path))?))
    }
}

/// A directory of parser output. Only files whose name contains `marker` are
/// relation files; `.gz` files are decompressed on the way in.
#[derive(Clone, Debug)]
pub struct RelationDir {
    pub dir: PathBuf,
    pub marker: String,
}

impl RelationDir {

    pub fn new(dir: impl Into<PathBuf>, marker: &str) -> RelationDir {
        RelationDir { dir: dir.into(), marker: marker.to_owned() }
    }

    /// Relation files in the directory, sorted by name.
    pub fn relation_files(&self) -> Result<Vec<PathBuf>> {

        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(|e| DepSimError::io(&self.dir, e))? {
            let path = entry.map_err(|e| DepSimError::io(&self.dir, e))?.path();
            let is_relation_file = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.contains(&self.marker));
            if is_relation_file && path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

}

impl RelationSource for RelationDir {
    fn documents(&self) -> Result<Vec<RelationDocument>> {
        let paths = self.relation_files()?;
        tracing::info!(dir = %self.dir.display(), files = paths.len(), "reading relation files");

        paths
            .par_iter()
            .map(|path| -> Result<RelationDocument> {
                Ok(RelationDocument::new(path.display().to_string(), read_text(path)?))
            })
            .collect()
    }
}

impl SaveFile for Vec<TargetReport> {
    fn save_file(&self, output_dir: &str, file_name: &str) -> Result<PathBuf> {
        let out = Path::new(output_dir).join(format!("{}.json", file_name));
        let f = File::create(&out).map_err(|e| DepSimError::Write { path: out.clone(), source: e })?;
        let mut f = BufWriter::new(f);
        serde_json::to_writer_pretty(&mut f, self)?;
        f.flush().map_err(|e| DepSimError::Write { path: out.clone(), source: e })?;
        Ok(out)
    }
}
