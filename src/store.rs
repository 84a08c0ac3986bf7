//! Persistence of tax bases per workspace, kept out of the engine itself.

use crate::tax::TaxBases;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::PathBuf;
use std::sync::RwLock;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid workspace id: {0:?}")]
    InvalidWorkspace(String),
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed bases for workspace {workspace}: {source}")]
    Json {
        workspace: String,
        source: serde_json::Error,
    },
    #[error("store lock poisoned")]
    Poisoned,
}

/// Load and save the tax bases of a workspace
pub trait BasesStore {
    fn load(&self, workspace_id: &str) -> Result<Option<TaxBases>, StoreError>;
    fn save(&self, workspace_id: &str, bases: &TaxBases) -> Result<(), StoreError>;
}

/// Workspace ids are non-empty and limited to ASCII letters, digits, '-' and '_'.
pub fn validate_workspace_id(workspace_id: &str) -> Result<(), StoreError> {
    let valid = !workspace_id.is_empty()
        && workspace_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidWorkspace(workspace_id.to_string()))
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    bases: RwLock<HashMap<String, TaxBases>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BasesStore for MemoryStore {
    fn load(&self, workspace_id: &str) -> Result<Option<TaxBases>, StoreError> {
        validate_workspace_id(workspace_id)?;
        let bases = self.bases.read().map_err(|_| StoreError::Poisoned)?;
        Ok(bases.get(workspace_id).cloned())
    }

    fn save(&self, workspace_id: &str, bases: &TaxBases) -> Result<(), StoreError> {
        validate_workspace_id(workspace_id)?;
        let mut stored = self.bases.write().map_err(|_| StoreError::Poisoned)?;
        stored.insert(workspace_id.to_string(), bases.clone());
        Ok(())
    }
}

/// One pretty-printed JSON file per workspace: `<dir>/<workspace>.json`
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        JsonDirStore { dir: dir.into() }
    }

    fn path_for(&self, workspace_id: &str) -> Result<PathBuf, StoreError> {
        validate_workspace_id(workspace_id)?;
        Ok(self.dir.join(format!("{workspace_id}.json")))
    }
}

impl BasesStore for JsonDirStore {
    fn load(&self, workspace_id: &str) -> Result<Option<TaxBases>, StoreError> {
        let path = self.path_for(workspace_id)?;
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        let bases = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            StoreError::Json {
                workspace: workspace_id.to_string(),
                source,
            }
        })?;
        log::debug!("Loaded bases for {} from {}", workspace_id, path.display());
        Ok(Some(bases))
    }

    fn save(&self, workspace_id: &str, bases: &TaxBases) -> Result<(), StoreError> {
        let path = self.path_for(workspace_id)?;
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let file = File::create(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, bases).map_err(|source| StoreError::Json {
            workspace: workspace_id.to_string(),
            source,
        })?;
        writer
            .flush()
            .map_err(|source| StoreError::Io { path: path.clone(), source })?;
        log::debug!("Saved bases for {} to {}", workspace_id, path.display());
        Ok(())
    }
}
