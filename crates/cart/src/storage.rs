//! Durable key-value slot for cart persistence.
//!
//! The cart serializes to a single value under a fixed namespaced key.
//! [`StorageSlot`] is the seam; [`FileSlot`] is the production
//! implementation, mapping each key to one file under a directory.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur reading or writing a slot.
#[derive(Debug, Error)]
pub enum SlotError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key contains no usable characters.
    #[error("Invalid slot key: {0:?}")]
    InvalidKey(String),
}

/// A durable key-value slot surviving across sessions on the same device.
pub trait StorageSlot {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, SlotError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be written.
    fn write(&self, key: &str, value: &str) -> Result<(), SlotError>;
}

/// File-backed storage slot: one file per key under a directory.
///
/// Keys are sanitized to a filesystem-safe name, so namespaced keys like
/// `copper-kettle:cart` map to `copper-kettle_cart.json`.
#[derive(Debug, Clone)]
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    /// Create a slot rooted at `dir`. The directory is created lazily on
    /// first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, SlotError> {
        let name = sanitize_key(key)?;
        Ok(self.dir.join(format!("{name}.json")))
    }
}

impl StorageSlot for FileSlot {
    fn read(&self, key: &str) -> Result<Option<String>, SlotError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SlotError::Io(e)),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SlotError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, value)?;
        Ok(())
    }
}

/// Map a slot key to a filesystem-safe name.
fn sanitize_key(key: &str) -> Result<String, SlotError> {
    let name: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if name.chars().all(|c| c == '_') {
        return Err(SlotError::InvalidKey(key.to_string()));
    }
    Ok(name)
}
