use super::Process;
use crate::config::StoreConfig;
use crate::error::StoreError;
use ahash::AHashMap;
use itertools::Itertools;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Keyed storage for whole processes. `put` inserts or replaces by id.
pub trait ProcessStore {
    /// All processes, most recently edited first.
    fn list(&self) -> Result<Vec<Process>, StoreError>;
    fn get(&self, id: &str) -> Result<Option<Process>, StoreError>;
    fn put(&mut self, process: Process) -> Result<(), StoreError>;
    /// Removes a process, returning it if it existed.
    fn delete(&mut self, id: &str) -> Result<Option<Process>, StoreError>;
}

fn most_recent_first(processes: impl IntoIterator<Item = Process>) -> Vec<Process> {
    processes
        .into_iter()
        .sorted_by(|a, b| {
            b.last_edited
                .timestamp
                .cmp(&a.last_edited.timestamp)
                .then_with(|| a.id.cmp(&b.id))
        })
        .collect()
}

/// A store that lives only as long as the value itself.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    processes: AHashMap<String, Process>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }
}

impl ProcessStore for MemoryStore {
    fn list(&self) -> Result<Vec<Process>, StoreError> {
        Ok(most_recent_first(self.processes.values().cloned()))
    }

    fn get(&self, id: &str) -> Result<Option<Process>, StoreError> {
        Ok(self.processes.get(id).cloned())
    }

    fn put(&mut self, process: Process) -> Result<(), StoreError> {
        self.processes.insert(process.id.clone(), process);
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<Option<Process>, StoreError> {
        Ok(self.processes.remove(id))
    }
}

/// A single named collection persisted as a JSON array in `<dir>/<collection>.json`.
///
/// Every operation reads the file, and every mutation rewrites it whole.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn open(dir: impl AsRef<Path>, collection: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", collection)),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::open(&config.dir, &config.collection)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<Process>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let processes: Vec<Process> = serde_json::from_str(&content).map_err(|e| {
            StoreError::Serialization(format!("'{}': {}", self.path.display(), e))
        })?;
        debug!(path = %self.path.display(), count = processes.len(), "Loaded processes");
        Ok(processes)
    }

    fn write(&self, processes: &[Process]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let json = serde_json::to_string_pretty(processes)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| self.io_error(e))?;
        debug!(path = %self.path.display(), count = processes.len(), "Saved processes");
        Ok(())
    }

    fn io_error(&self, error: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            message: error.to_string(),
        }
    }
}

impl ProcessStore for JsonFileStore {
    fn list(&self) -> Result<Vec<Process>, StoreError> {
        Ok(most_recent_first(self.load()?))
    }

    fn get(&self, id: &str) -> Result<Option<Process>, StoreError> {
        Ok(self.load()?.into_iter().find(|p| p.id == id))
    }

    fn put(&mut self, process: Process) -> Result<(), StoreError> {
        let mut processes = self.load()?;
        match processes.iter_mut().find(|p| p.id == process.id) {
            Some(existing) => {
                info!(id = %process.id, name = %process.name, "Updated process");
                *existing = process;
            }
            None => {
                info!(id = %process.id, name = %process.name, "Added process");
                processes.push(process);
            }
        }
        self.write(&processes)
    }

    fn delete(&mut self, id: &str) -> Result<Option<Process>, StoreError> {
        let mut processes = self.load()?;
        let Some(index) = processes.iter().position(|p| p.id == id) else {
            return Ok(None);
        };
        let removed = processes.remove(index);
        self.write(&processes)?;
        info!(%id, name = %removed.name, "Deleted process");
        Ok(Some(removed))
    }
}
