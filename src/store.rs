//! Saved job descriptions
//!
//! Each description is written to `<txt_dir>/<key>.txt` and mirrored into a
//! JSON object of key -> description. The mapping is read, modified and
//! rewritten on every save with no locking, so concurrent runs can lose
//! each other's entries.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed job mapping {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    /// Sanitized title, or a timestamp when no usable title exists
    pub key: String,
    pub description: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct JobStore {
    txt_dir: PathBuf,
    work_info_path: PathBuf,
}

impl JobStore {
    pub fn new(txt_dir: impl Into<PathBuf>, work_info_path: impl Into<PathBuf>) -> Self {
        Self {
            txt_dir: txt_dir.into(),
            work_info_path: work_info_path.into(),
        }
    }

    pub fn save(&self, description: &str, title: Option<&str>) -> Result<JobRecord, StoreError> {
        let key = title
            .map(sanitize_title)
            .filter(|k| !k.is_empty())
            .unwrap_or_else(|| timestamp_key(Local::now().naive_local()));

        fs::create_dir_all(&self.txt_dir).map_err(|source| StoreError::Io {
            path: self.txt_dir.clone(),
            source,
        })?;

        let path = self.txt_dir.join(format!("{key}.txt"));
        fs::write(&path, description).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), "saved job description");

        // Mapping failures are logged, never returned
        if let Err(e) = self.record(&key, description) {
            warn!(error = %e, "failed to update job mapping");
        }

        Ok(JobRecord {
            key,
            description: description.to_string(),
            path,
        })
    }

    /// Current key -> description mapping; empty when the file does not exist yet
    pub fn load_work_info(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let json = match fs::read_to_string(&self.work_info_path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.work_info_path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&json).map_err(|source| StoreError::Json {
            path: self.work_info_path.clone(),
            source,
        })
    }

    pub fn work_info_path(&self) -> &Path {
        &self.work_info_path
    }

    fn record(&self, key: &str, description: &str) -> Result<(), StoreError> {
        let mut work_info = self.load_work_info()?;
        work_info.insert(key.to_string(), description.to_string());

        let json = serde_json::to_string_pretty(&work_info).map_err(|source| StoreError::Json {
            path: self.work_info_path.clone(),
            source,
        })?;

        if let Some(parent) = self.work_info_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&self.work_info_path, json).map_err(|source| StoreError::Io {
            path: self.work_info_path.clone(),
            source,
        })
    }
}

/// File-name-safe form of a title: word characters, whitespace and `-` are
/// kept, then every run of `-` or whitespace becomes a single `-`
pub fn sanitize_title(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();

    kept.split(|c: char| c == '-' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

pub fn timestamp_key(now: NaiveDateTime) -> String {
    format!("job-{}", now.format("%Y%m%d-%H%M%S"))
}
