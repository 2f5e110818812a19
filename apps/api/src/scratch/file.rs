use std::fs;
use std::path::{Component, Path, PathBuf};

use super::{ScratchError, ScratchStore};

/// Scratch store backed by one file per key under a root directory.
/// Keys may contain `/` to form subdirectories; `..` and absolute keys are rejected.
pub struct FileScratchStore {
    root: PathBuf,
}

impl FileScratchStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, ScratchError> {
        let relative = Path::new(key);
        let safe = !key.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(ScratchError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

impl ScratchStore for FileScratchStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key).ok()?;
        fs::read_to_string(path).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ScratchError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, value)?;
        Ok(())
    }
}
