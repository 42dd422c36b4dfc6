use crate::backend::{Fingerprint, RemoteBackend, StoreBackend};
use crate::Result;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

/// Which backend actually served the most recent call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Remote,
    Local,
}

/// Remote-first store with transparent local fallback. Method signatures are
/// identical either way; when the remote errors the call is retried against
/// the local store, the condition is logged, and [`FallbackStore::origin`]
/// reports which side answered last — the fallback is observable, never
/// silent.
pub struct FallbackStore {
    remote: Arc<dyn RemoteBackend>,
    local: Arc<dyn StoreBackend>,
    last_origin: AtomicU8,
}

impl FallbackStore {
    pub fn new(remote: Arc<dyn RemoteBackend>, local: Arc<dyn StoreBackend>) -> Self {
        Self {
            remote,
            local,
            last_origin: AtomicU8::new(Origin::Remote as u8),
        }
    }

    /// Backend that served the most recent call
    pub fn origin(&self) -> Origin {
        if self.last_origin.load(Ordering::SeqCst) == Origin::Local as u8 {
            Origin::Local
        } else {
            Origin::Remote
        }
    }

    pub fn remote(&self) -> &Arc<dyn RemoteBackend> {
        &self.remote
    }

    fn served(&self, origin: Origin) {
        self.last_origin.store(origin as u8, Ordering::SeqCst);
    }

    fn run<T>(
        &self,
        op: &str,
        remote_call: impl FnOnce() -> Result<T>,
        local_call: impl FnOnce() -> Result<T>,
    ) -> Result<T> {
        if self.remote.available() {
            match remote_call() {
                Ok(value) => {
                    self.served(Origin::Remote);
                    return Ok(value);
                }
                Err(err) => {
                    tracing::warn!(%op, error = %err, "remote backend failed, serving from local store");
                }
            }
        } else {
            tracing::debug!(%op, "remote backend unreachable, serving from local store");
        }
        self.served(Origin::Local);
        local_call()
    }
}

impl StoreBackend for FallbackStore {
    fn read(&self, namespace: &str, key: &str) -> Result<Option<Vec<u8>>> {
        self.run(
            "read",
            || self.remote.read(namespace, key),
            || self.local.read(namespace, key),
        )
    }

    fn write(&self, namespace: &str, key: &str, payload: &[u8]) -> Result<()> {
        self.run(
            "write",
            || self.remote.write(namespace, key, payload),
            || self.local.write(namespace, key, payload),
        )
    }

    fn remove(&self, namespace: &str, key: &str) -> Result<()> {
        self.run(
            "remove",
            || self.remote.remove(namespace, key),
            || self.local.remove(namespace, key),
        )
    }

    fn keys(&self, namespace: &str) -> Result<Vec<String>> {
        self.run(
            "keys",
            || self.remote.keys(namespace),
            || self.local.keys(namespace),
        )
    }

    fn fingerprint(&self, namespace: &str, key: &str) -> Result<Option<Fingerprint>> {
        self.run(
            "fingerprint",
            || self.remote.fingerprint(namespace, key),
            || self.local.fingerprint(namespace, key),
        )
    }
}
