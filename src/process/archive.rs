use super::Process;
use super::store::ProcessStore;
use crate::error::StoreError;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{Read, Write};

/// A compact binary snapshot of a set of processes, for backup and transfer between stores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessArchive {
    pub processes: Vec<Process>,
}

impl ProcessArchive {
    pub fn new(processes: Vec<Process>) -> Self {
        Self { processes }
    }

    /// Snapshots every process currently in `store`.
    pub fn capture(store: &dyn ProcessStore) -> Result<Self, StoreError> {
        Ok(Self::new(store.list()?))
    }

    /// Puts every archived process into `store`, replacing those with the same id.
    pub fn restore(self, store: &mut dyn ProcessStore) -> Result<usize, StoreError> {
        let count = self.processes.len();
        for process in self.processes {
            store.put(process)?;
        }
        Ok(count)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, StoreError> {
        encode_to_vec(self, standard())
            .map_err(|e| StoreError::Serialization(format!("Archive encoding failed: {}", e)))
    }

    /// Deserializes an archive from a byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StoreError> {
        decode_from_slice(bytes, standard())
            .map(|(archive, _)| archive) // bincode 2 returns a tuple (data, bytes_read)
            .map_err(|e| StoreError::Serialization(format!("Archive decoding failed: {}", e)))
    }

    /// Saves the archive to a file using the bincode format.
    pub fn save(&self, path: &str) -> Result<(), StoreError> {
        let bytes = self.to_bytes()?;
        let mut file = fs::File::create(path).map_err(|e| io_error(path, e))?;
        file.write_all(&bytes).map_err(|e| io_error(path, e))?;
        Ok(())
    }

    /// Loads an archive from a file.
    pub fn from_file(path: &str) -> Result<Self, StoreError> {
        let mut file = fs::File::open(path).map_err(|e| io_error(path, e))?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(|e| io_error(path, e))?;
        Self::from_bytes(&bytes)
    }
}

fn io_error(path: &str, error: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_string(),
        message: error.to_string(),
    }
}
