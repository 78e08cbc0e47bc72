//! Directory-backed key-value store: one `<key>.json` file per key.
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use nature_game::KeyValueStore;

#[derive(Debug, thiserror::Error)]
pub enum FileStoreError {
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

fn is_valid_key(key: &str) -> bool {
    regex::Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$")
        .map(|re| re.is_match(key) && !key.contains(".."))
        .unwrap_or(false)
}

impl FileStore {
    /// Store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path backing `key`.
    ///
    /// # Errors
    /// Returns [`FileStoreError::InvalidKey`] for keys that could escape the directory.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, FileStoreError> {
        if !is_valid_key(key) {
            return Err(FileStoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn io_error(path: &Path, source: std::io::Error) -> FileStoreError {
    FileStoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl KeyValueStore for FileStore {
    type Error = FileStoreError;

    fn save(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|err| io_error(&self.dir, err))?;
        fs::write(&path, value).map_err(|err| io_error(&path, err))
    }

    fn load(&self, key: &str) -> Result<Option<String>, Self::Error> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error(&path, err)),
        }
    }

    fn clear(&self, key: &str) -> Result<(), Self::Error> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error(&path, err)),
        }
    }
}
