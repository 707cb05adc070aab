//! File-backed key-value store for carts.
//!
//! Each key is one file in the store directory. Writes go to a temporary
//! file that is renamed over the target, so a crash never leaves a
//! half-written cart behind.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use woodora_core::KeyValueStore;

/// A [`KeyValueStore`] persisting each key as a file.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    available: bool,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `dir`.
    ///
    /// If the directory cannot be created the store is returned anyway but
    /// reports itself unavailable, and carts live in memory only.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let available = match std::fs::create_dir_all(&dir) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "cart store unavailable");
                false
            }
        };

        Self {
            dir,
            available,
            write_lock: Mutex::new(()),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", file_stem(key)))
    }
}

/// Map a key to a safe file name.
fn file_stem(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

impl KeyValueStore for FileStore {
    fn is_available(&self) -> bool {
        self.available
    }

    fn get(&self, key: &str) -> Option<String> {
        if !self.available {
            return None;
        }
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(text) => Some(text),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read from cart store");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> bool {
        if !self.available {
            return false;
        }
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        let result = std::fs::write(&tmp, value).and_then(|()| std::fs::rename(&tmp, &path));

        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to write to cart store");
                let _ = std::fs::remove_file(&tmp);
                false
            }
        }
    }

    fn remove(&self, key: &str) -> bool {
        if !self.available {
            return false;
        }
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => true,
            Err(e) if e.kind() == ErrorKind::NotFound => true,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to remove from cart store");
                false
            }
        }
    }
}
