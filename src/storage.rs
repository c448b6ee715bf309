use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::warn;

/// Keys under which site state is persisted. Values are JSON-serialized
/// strings except where noted.
pub mod keys {
    pub const RECENT: &str = "recent-items";
    pub const BOOKMARKS: &str = "bookmarks";
    /// Plain integer string, not JSON.
    pub const VISITOR_COUNT: &str = "visitor-count";
    /// `"light"` or `"dark"`.
    pub const THEME: &str = "theme";

    // Session-scoped keys, written only to a per-session store.
    pub const SESSION_NAME: &str = "session-name";
    pub const SESSION_TYPE: &str = "session-type";
    pub const NAV_OPEN: &str = "nav-open";
}

/// String key-value persistence, injected into every component that needs
/// it so tests can substitute an in-memory store.
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug)]
pub enum StorageError {
    Io(io::Error),
    Serialize(serde_json::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(err) => write!(f, "storage io error: {err}"),
            StorageError::Serialize(err) => write!(f, "storage serialization error: {err}"),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<io::Error> for StorageError {
    fn from(value: io::Error) -> Self {
        StorageError::Io(value)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        StorageError::Serialize(value)
    }
}

/// Purely in-memory store. Backs sessions and tests; never fails.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.inner.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.write().remove(key);
        Ok(())
    }
}

/// Single-file JSON store: one flat object mapping keys to string values,
/// rewritten on every mutation. A malformed file is treated as empty rather
/// than surfaced; the next write repairs it.
pub struct JsonFileStore {
    path: PathBuf,
    cache: RwLock<HashMap<String, String>>,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let cache = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str::<HashMap<String, String>>(&raw).unwrap_or_else(|err| {
                warn!(path = %path.display(), error = %err, "store file is malformed, starting empty");
                HashMap::new()
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(StorageError::Io(err)),
        };
        Ok(Self {
            path,
            cache: RwLock::new(cache),
        })
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn flush(&self, map: &HashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let body = serde_json::to_string_pretty(map)?;
        fs::write(&self.path, body)?;
        Ok(())
    }
}

impl Storage for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.cache.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self.cache.write();
        guard.insert(key.to_string(), value.to_string());
        self.flush(&guard)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self.cache.write();
        guard.remove(key);
        self.flush(&guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("missing").unwrap(), None);
        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
        store.remove("theme").unwrap();
        assert_eq!(store.get("theme").unwrap(), None);
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        {
            let store = JsonFileStore::open(&path).unwrap();
            store.set(keys::VISITOR_COUNT, "41").unwrap();
        }
        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get(keys::VISITOR_COUNT).unwrap().as_deref(),
            Some("41")
        );
    }

    #[test]
    fn file_store_treats_malformed_file_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{not json").unwrap();
        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get(keys::RECENT).unwrap(), None);
        // The first write rewrites the file into valid shape.
        store.set(keys::THEME, "dark").unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        let parsed: HashMap<String, String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.get(keys::THEME).map(String::as_str), Some("dark"));
    }

    #[test]
    fn file_store_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("store.json");
        let store = JsonFileStore::open(&path).unwrap();
        store.set("theme", "light").unwrap();
        assert!(path.exists());
    }
}
