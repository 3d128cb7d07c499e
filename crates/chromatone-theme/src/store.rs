//! Persistence for [`ThemeConfiguration`].
//!
//! The engine only needs three things from storage: read the last saved
//! blob, overwrite it, and remove it. [`KeyValueStore`] is that seam.
//! [`MemoryStore`] backs tests and one-shot runs; [`FileStore`] keeps one
//! `<key>.json` file per key in a directory.
//!
//! Loading never fails. A missing, unreadable or unparsable blob yields
//! the default configuration and a `warn` log line.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ThemeConfiguration;

/// The single key the configuration lives under.
pub const CONFIGURATION_KEY: &str = "chromatone.theme-configuration";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("stored value is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid store key {0:?} (use letters, digits, '.', '-' or '_')")]
    InvalidKey(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// String-keyed, string-valued storage.
pub trait KeyValueStore {
    /// The stored value, or `None` when the key is absent.
    ///
    /// # Errors
    ///
    /// Backend failures (I/O for [`FileStore`]).
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or overwrite.
    ///
    /// # Errors
    ///
    /// Backend failures.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove the key. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Backend failures.
    fn remove(&mut self, key: &str) -> Result<()>;
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-process store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// Directory-backed store: key `k` lives in `<dir>/k.json`.
///
/// The directory is created on first write. Writes go to a sibling
/// temporary file and are renamed into place.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error(&path)(err)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(io_error(&self.dir))?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(io_error(&tmp))?;
        if let Err(err) = fs::rename(&tmp, &path) {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                warn!(path = %tmp.display(), error = %cleanup, "temporary file left behind");
            }
            return Err(io_error(&path)(err));
        }
        debug!(path = %path.display(), bytes = value.len(), "store write");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "store remove");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error(&path)(err)),
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration helpers
// ---------------------------------------------------------------------------

/// The saved configuration, or defaults when there is none usable.
#[must_use]
pub fn load_configuration(store: &impl KeyValueStore) -> ThemeConfiguration {
    let text = match store.get(CONFIGURATION_KEY) {
        Ok(Some(text)) => text,
        Ok(None) => {
            debug!("no saved configuration, using defaults");
            return ThemeConfiguration::default();
        }
        Err(err) => {
            warn!(%err, "could not read saved configuration, using defaults");
            return ThemeConfiguration::default();
        }
    };
    serde_json::from_str(&text).unwrap_or_else(|err| {
        warn!(%err, "saved configuration is not parsable, using defaults");
        ThemeConfiguration::default()
    })
}

/// Overwrite the saved configuration.
///
/// # Errors
///
/// Serialization or backend failures.
pub fn save_configuration(store: &mut impl KeyValueStore, config: &ThemeConfiguration) -> Result<()> {
    let text = serde_json::to_string_pretty(config)?;
    store.set(CONFIGURATION_KEY, &text)
}

/// Remove the saved configuration.
///
/// # Errors
///
/// Backend failures.
pub fn clear_configuration(store: &mut impl KeyValueStore) -> Result<()> {
    store.remove(CONFIGURATION_KEY)
}
