use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::regressor::Regressor;

// ---------------------------------------------------------------------------
// Artifact selection and loading
// ---------------------------------------------------------------------------

/// Filename pattern produced by the training pipeline: `sales_model_*.json`.
pub const ARTIFACT_PREFIX: &str = "sales_model_";
pub const ARTIFACT_EXTENSION: &str = "json";

/// Default directory scanned at startup.
pub const DEFAULT_MODEL_DIR: &str = "models";

#[derive(Error, Debug)]
pub enum ArtifactError {
    /// Fatal: without a model no prediction can happen, so the app halts
    /// further processing and offers no recovery path.
    #[error(
        "no model found: nothing matching '{prefix}*.{ext}' in {}",
        .dir.display(),
        prefix = ARTIFACT_PREFIX,
        ext = ARTIFACT_EXTENSION
    )]
    NoModelFound { dir: PathBuf },

    #[error("reading model directory {}: {source}", .dir.display())]
    DirUnreadable {
        dir: PathBuf,
        source: std::io::Error,
    },

    #[error("reading artifact {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parsing artifact {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// A serialized trained model bundled with the ordered feature names it
/// expects as input. Immutable once loaded; held for the whole session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub expected_features: Vec<String>,
    pub regressor: Regressor,
}

impl ModelArtifact {
    /// Deserialize an artifact file.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let text = fs::read_to_string(path).map_err(|source| ArtifactError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ArtifactError::Malformed {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// An artifact together with where it came from, for the UI banner.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub artifact: ModelArtifact,
    pub path: PathBuf,
}

impl LoadedModel {
    /// Scan `dir`, pick the newest matching artifact, and load it.
    pub fn from_dir(dir: &Path) -> Result<Self, ArtifactError> {
        let path = find_latest(dir)?;
        let artifact = ModelArtifact::load(&path)?;
        Ok(LoadedModel { artifact, path })
    }

    /// Short name shown in the banner.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Return the matching artifact with the latest creation timestamp.
///
/// Creation time falls back to modification time on filesystems that don't
/// record it. Equal timestamps have no defined tie-break; artifact names are
/// time-ordered by construction, so it doesn't matter in practice.
pub fn find_latest(dir: &Path) -> Result<PathBuf, ArtifactError> {
    let entries = fs::read_dir(dir).map_err(|source| ArtifactError::DirUnreadable {
        dir: dir.to_path_buf(),
        source,
    })?;

    let mut latest: Option<(SystemTime, PathBuf)> = None;
    for entry in entries.flatten() {
        let path = entry.path();
        if !matches_pattern(&path) {
            continue;
        }
        let Ok(meta) = entry.metadata() else {
            continue;
        };
        let stamp = meta
            .created()
            .or_else(|_| meta.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        if latest.as_ref().map_or(true, |(best, _)| stamp > *best) {
            latest = Some((stamp, path));
        }
    }

    latest
        .map(|(_, path)| path)
        .ok_or_else(|| ArtifactError::NoModelFound {
            dir: dir.to_path_buf(),
        })
}

fn matches_pattern(path: &Path) -> bool {
    let name_ok = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(ARTIFACT_PREFIX));
    let ext_ok = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ARTIFACT_EXTENSION));
    name_ok && ext_ok
}
