use crate::error::{Error, Result};
use log::debug;
use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use tempfile::NamedTempFile;

/// Object store backed by a directory; keys are relative slash-separated paths.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Filesystem path for `key`, refusing keys that would escape the root.
    pub fn path_of(&self, key: &str) -> Result<PathBuf> {
        let relative = Path::new(key);
        let safe = !key.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !safe {
            return Err(Error::InvalidObjectPath(key.to_string()));
        }
        Ok(self.root.join(relative))
    }

    /// Write `data` under `key`, replacing any existing object in one step.
    pub fn write(&self, key: &str, data: &[u8]) -> Result<PathBuf> {
        let path = self.path_of(key)?;
        let parent = self.ensure_parent(&path)?;

        let mut file = NamedTempFile::new_in(&parent).map_err(|e| Error::io(&parent, e))?;
        file.write_all(data).map_err(|e| Error::io(file.path(), e))?;
        file.persist(&path).map_err(|e| Error::io(&path, e.error))?;

        debug!("Stored {} bytes at {}", data.len(), path.display());
        Ok(path)
    }

    /// Create the directory an object will be written into.
    pub fn ensure_parent(&self, path: &Path) -> Result<PathBuf> {
        let parent = path.parent().unwrap_or(self.root.as_path()).to_path_buf();
        fs::create_dir_all(&parent).map_err(|e| Error::io(&parent, e))?;
        Ok(parent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_then_read() {
        let dir = tempdir().unwrap();
        let store = LocalStore::new(dir.path());

        let path = store.write("image/2024/a.png", b"bytes").unwrap();

        assert_eq!(path, dir.path().join("image/2024/a.png"));
        assert_eq!(fs::read(&path).unwrap(), b"bytes");
    }

    #[test]
    fn escaping_keys_are_rejected() {
        let store = LocalStore::new("/srv/store");
        for key in ["", "../etc/passwd", "/etc/passwd", "images/../../x"] {
            assert!(
                matches!(store.path_of(key), Err(Error::InvalidObjectPath(_))),
                "{} accepted",
                key
            );
        }
        assert_eq!(
            store.path_of("images/./cat.png").unwrap(),
            PathBuf::from("/srv/store/images/./cat.png")
        );
    }
}
