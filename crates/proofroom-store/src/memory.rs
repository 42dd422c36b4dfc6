use crate::backend::{RemoteBackend, RemoteChange, StoreBackend};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender, channel};

struct Document {
    payload: Vec<u8>,
    stored_at: DateTime<Utc>,
}

/// Ephemeral in-memory backend. Serves two roles: a session-scoped store
/// that vanishes with the process, and the reference [`RemoteBackend`]
/// implementation — it stamps a receipt time on every write, pushes change
/// notices to subscribers, and can be flipped unavailable to exercise the
/// fallback path.
#[derive(Default)]
pub struct MemoryStore {
    documents: Mutex<HashMap<(String, String), Document>>,
    watchers: Mutex<Vec<Sender<RemoteChange>>>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle reachability; an unavailable store fails every call with
    /// [`Error::Unavailable`].
    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }

    /// Server-side receipt time of a stored document
    pub fn stored_at(&self, namespace: &str, key: &str) -> Option<DateTime<Utc>> {
        self.documents
            .lock()
            .unwrap()
            .get(&(namespace.to_string(), key.to_string()))
            .map(|doc| doc.stored_at)
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(Error::Unavailable("memory store marked offline".to_string()))
        } else {
            Ok(())
        }
    }

    fn notify(&self, namespace: &str, key: &str) {
        let change = RemoteChange {
            namespace: namespace.to_string(),
            key: key.to_string(),
        };
        self.watchers
            .lock()
            .unwrap()
            .retain(|tx| tx.send(change.clone()).is_ok());
    }
}

impl StoreBackend for MemoryStore {
    fn read(&self, namespace: &str, key: &str) -> Result<Option<Vec<u8>>> {
        self.check_available()?;
        Ok(self
            .documents
            .lock()
            .unwrap()
            .get(&(namespace.to_string(), key.to_string()))
            .map(|doc| doc.payload.clone()))
    }

    fn write(&self, namespace: &str, key: &str, payload: &[u8]) -> Result<()> {
        self.check_available()?;
        self.documents.lock().unwrap().insert(
            (namespace.to_string(), key.to_string()),
            Document {
                payload: payload.to_vec(),
                stored_at: Utc::now(),
            },
        );
        self.notify(namespace, key);
        Ok(())
    }

    fn remove(&self, namespace: &str, key: &str) -> Result<()> {
        self.check_available()?;
        self.documents
            .lock()
            .unwrap()
            .remove(&(namespace.to_string(), key.to_string()));
        self.notify(namespace, key);
        Ok(())
    }

    fn keys(&self, namespace: &str) -> Result<Vec<String>> {
        self.check_available()?;
        Ok(self
            .documents
            .lock()
            .unwrap()
            .keys()
            .filter(|(ns, _)| ns == namespace)
            .map(|(_, key)| key.clone())
            .collect())
    }
}

impl RemoteBackend for MemoryStore {
    fn available(&self) -> bool {
        !self.unavailable.load(Ordering::SeqCst)
    }

    fn subscribe(&self) -> Receiver<RemoteChange> {
        let (tx, rx) = channel();
        self.watchers.lock().unwrap().push(tx);
        rx
    }
}
