use crate::Result;
use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::mpsc::Receiver;

/// Storage namespaces: one logical collection per record kind, keyed by
/// project id (the project registry itself lives under a single global key).
pub mod namespaces {
    pub const PROJECTS: &str = "projects";
    pub const MEDIA: &str = "media";
    pub const COMMENTS: &str = "comments";
    pub const NOTIFICATIONS: &str = "notifications";

    /// Key of the single global document in the `projects` namespace
    pub const GLOBAL_KEY: &str = "all";
}

/// Content digest of a stored document, used by the polling refresh path to
/// detect writes made by another process.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    pub fn of(payload: &[u8]) -> Self {
        let digest = Sha256::digest(payload);
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&digest);
        Self(bytes)
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0[..4] {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, "…")
    }
}

/// Persistent key-value medium. Writes are whole-document replace; callers
/// that need read-modify-write semantics go through [`crate::Collection`],
/// which layers revision tokens on top.
pub trait StoreBackend: Send + Sync {
    fn read(&self, namespace: &str, key: &str) -> Result<Option<Vec<u8>>>;

    fn write(&self, namespace: &str, key: &str, payload: &[u8]) -> Result<()>;

    fn remove(&self, namespace: &str, key: &str) -> Result<()>;

    /// Keys currently present in a namespace, in no particular order
    fn keys(&self, namespace: &str) -> Result<Vec<String>>;

    fn fingerprint(&self, namespace: &str, key: &str) -> Result<Option<Fingerprint>> {
        Ok(self.read(namespace, key)?.map(|bytes| Fingerprint::of(&bytes)))
    }
}

/// Change notice pushed by a remote backend when any writer touches a
/// document.
#[derive(Debug, Clone)]
pub struct RemoteChange {
    pub namespace: String,
    pub key: String,
}

/// A document-store backend that can additionally report availability and
/// push change notices. Implementations stamp a server-side receipt time on
/// every write.
pub trait RemoteBackend: StoreBackend {
    /// Cheap availability probe; `false` routes callers to their fallback
    fn available(&self) -> bool;

    /// Subscribe to change notices for all namespaces. The sender side is
    /// dropped when the backend is dropped, ending the receiver's loop.
    fn subscribe(&self) -> Receiver<RemoteChange>;
}
