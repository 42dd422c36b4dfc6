use crate::backend::StoreBackend;
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// File-backed store: one JSON document per `{namespace}/{key}.json` under
/// the data directory. Writes go through a temp file + rename and are
/// serialized by an in-process lock, so a document is never observed half
/// written and same-process writers cannot interleave.
pub struct LocalStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl LocalStore {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_path(&self, namespace: &str, key: &str) -> PathBuf {
        self.root.join(namespace).join(format!("{}.json", key))
    }
}

impl StoreBackend for LocalStore {
    fn read(&self, namespace: &str, key: &str) -> Result<Option<Vec<u8>>> {
        match fs::read(self.document_path(namespace, key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(Error::Io(err)),
        }
    }

    fn write(&self, namespace: &str, key: &str, payload: &[u8]) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap();
        let path = self.document_path(namespace, key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, payload)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, namespace: &str, key: &str) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap();
        match fs::remove_file(self.document_path(namespace, key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(Error::Io(err)),
        }
    }

    fn keys(&self, namespace: &str) -> Result<Vec<String>> {
        let dir = self.root.join(namespace);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(Error::Io(err)),
        };

        let mut keys = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                keys.push(stem.to_string());
            }
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::namespaces;
    use tempfile::TempDir;

    #[test]
    fn write_then_read_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();

        store
            .write(namespaces::COMMENTS, "test-house", b"[1,2,3]")
            .unwrap();
        let bytes = store.read(namespaces::COMMENTS, "test-house").unwrap();
        assert_eq!(bytes.as_deref(), Some(&b"[1,2,3]"[..]));
    }

    #[test]
    fn missing_document_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        assert!(store.read(namespaces::MEDIA, "nope").unwrap().is_none());
    }

    #[test]
    fn remove_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();

        store.write(namespaces::MEDIA, "test-house", b"{}").unwrap();
        store.remove(namespaces::MEDIA, "test-house").unwrap();
        store.remove(namespaces::MEDIA, "test-house").unwrap();
        assert!(store.read(namespaces::MEDIA, "test-house").unwrap().is_none());
    }

    #[test]
    fn keys_lists_only_json_documents() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();

        store.write(namespaces::COMMENTS, "a", b"[]").unwrap();
        store.write(namespaces::COMMENTS, "b", b"[]").unwrap();
        fs::write(dir.path().join("comments").join("stray.txt"), b"x").unwrap();

        let mut keys = store.keys(namespaces::COMMENTS).unwrap();
        keys.sort();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
        assert!(store.keys(namespaces::NOTIFICATIONS).unwrap().is_empty());
    }

    #[test]
    fn fingerprint_changes_with_content() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();

        store.write(namespaces::MEDIA, "test-house", b"v1").unwrap();
        let first = store.fingerprint(namespaces::MEDIA, "test-house").unwrap();
        store.write(namespaces::MEDIA, "test-house", b"v2").unwrap();
        let second = store.fingerprint(namespaces::MEDIA, "test-house").unwrap();
        assert_ne!(first, second);
    }
}
