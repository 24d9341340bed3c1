//! Sources of reload batches
//!
//! A `KnowledgeSource` materialises a point-in-time batch of records. It is
//! the only place in this crate that performs I/O; any timeout or retry
//! policy belongs to the source, not to the matcher.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use super::loader::KnowledgeRecord;
use crate::error::LoadError;

/// Supplier of an external knowledge batch
pub trait KnowledgeSource: Send + Sync {
    /// Human-readable name used in logs
    fn name(&self) -> &str;

    /// Fetch the complete batch
    fn fetch(&self) -> Result<Vec<KnowledgeRecord>, LoadError>;
}

/// Accepted document layouts: a bare list or a `keywords:` wrapper
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum KnowledgeDocument {
    List(Vec<KnowledgeRecord>),
    Wrapped { keywords: Vec<KnowledgeRecord> },
}

impl KnowledgeDocument {
    fn into_records(self) -> Vec<KnowledgeRecord> {
        match self {
            KnowledgeDocument::List(records) => records,
            KnowledgeDocument::Wrapped { keywords } => keywords,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Json,
    Yaml,
}

/// Knowledge batch stored in a JSON (`.json`) or YAML (`.yaml`/`.yml`) file
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    name: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn format(&self) -> Result<FileFormat, LoadError> {
        match self.path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(FileFormat::Json),
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Ok(FileFormat::Yaml)
            }
            _ => Err(LoadError::UnsupportedFormat(self.path.clone())),
        }
    }
}

impl KnowledgeSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> Result<Vec<KnowledgeRecord>, LoadError> {
        let format = self.format()?;
        let content = std::fs::read_to_string(&self.path).map_err(|source| LoadError::Io {
            path: self.path.clone(),
            source,
        })?;

        let parsed: Result<KnowledgeDocument, String> = match format {
            FileFormat::Json => serde_json::from_str(&content).map_err(|e| e.to_string()),
            FileFormat::Yaml => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
        };
        let document = parsed.map_err(|message| LoadError::Parse {
            path: self.path.clone(),
            message,
        })?;

        let records = document.into_records();
        debug!(path = %self.path.display(), records = records.len(), "Fetched knowledge file");
        Ok(records)
    }
}

/// An already materialised in-memory batch
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<KnowledgeRecord>,
}

impl StaticSource {
    pub fn new(records: Vec<KnowledgeRecord>) -> Self {
        Self { records }
    }
}

impl KnowledgeSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch(&self) -> Result<Vec<KnowledgeRecord>, LoadError> {
        Ok(self.records.clone())
    }
}
