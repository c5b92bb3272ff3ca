use color_eyre::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// String-valued key-value persistence, the only thing the diary ever
/// asks of the outside world. Keys map to files on disk in the default
/// implementation; tests substitute in-memory fakes.
pub trait KeyValueStorage {
    /// Returns `Ok(None)` when the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// File-per-key storage rooted at a directory.
///
/// Writes go to a temporary file first and are renamed into place, so a
/// crash mid-write never leaves a half-written value behind.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        tracing::trace!(key, bytes = value.len(), "stored value");
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn get_of_missing_key_is_none() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        assert!(storage.get("glass_diary_entries").unwrap().is_none());
    }

    #[test]
    fn set_then_get_round_trips() {
        let dir = tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        storage.set("glass_diary_theme", "light").unwrap();
        assert_eq!(
            storage.get("glass_diary_theme").unwrap().as_deref(),
            Some("light")
        );
    }

    #[test]
    fn set_overwrites_previous_value() {
        let dir = tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        storage.set("k", "one").unwrap();
        storage.set("k", "two").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn values_survive_reopening_the_directory() {
        let dir = tempdir().unwrap();
        {
            let mut storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
            storage.set("k", "persisted").unwrap();
        }
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("persisted"));
    }
}
