use crate::backend::StoreBackend;
use crate::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;

const MAX_WRITE_ATTEMPTS: usize = 8;

/// Stored document shape: the record list plus a revision token bumped on
/// every write. The token is what lets `mutate` detect a concurrent writer
/// and re-run its closure instead of silently overwriting.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Envelope<T> {
    pub revision: u64,
    pub records: Vec<T>,
}

impl<T> Default for Envelope<T> {
    fn default() -> Self {
        Self {
            revision: 0,
            records: Vec::new(),
        }
    }
}

/// Typed view over one namespace of a [`StoreBackend`]. All reads decode a
/// corrupt payload as an empty collection (logged, never fatal); all writes
/// replace the whole document under a fresh revision.
pub struct Collection<T> {
    backend: Arc<dyn StoreBackend>,
    namespace: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            namespace: self.namespace,
            _marker: PhantomData,
        }
    }
}

impl<T: Serialize + DeserializeOwned> Collection<T> {
    pub fn new(backend: Arc<dyn StoreBackend>, namespace: &'static str) -> Self {
        Self {
            backend,
            namespace,
            _marker: PhantomData,
        }
    }

    pub fn namespace(&self) -> &'static str {
        self.namespace
    }

    /// Load the document for `key`; a missing document is an empty
    /// collection at revision 0.
    pub fn load(&self, key: &str) -> Result<Envelope<T>> {
        let Some(bytes) = self.backend.read(self.namespace, key)? else {
            return Ok(Envelope::default());
        };
        Ok(self.decode(key, &bytes))
    }

    /// Just the records of `key`, discarding the revision
    pub fn records(&self, key: &str) -> Result<Vec<T>> {
        Ok(self.load(key)?.records)
    }

    /// Read-modify-write with optimistic revision checking: the closure is
    /// applied to a working copy, and if the stored revision moved while it
    /// ran the closure is re-run against the fresh state. Gives up with
    /// [`Error::Conflict`] after repeated losses.
    pub fn mutate<R>(&self, key: &str, mut apply: impl FnMut(&mut Vec<T>) -> R) -> Result<R> {
        for _ in 0..MAX_WRITE_ATTEMPTS {
            let base = self.load(key)?;
            let base_revision = base.revision;
            let mut records = base.records;
            let out = apply(&mut records);

            if self.load(key)?.revision != base_revision {
                continue;
            }
            self.store(
                key,
                &Envelope {
                    revision: base_revision + 1,
                    records,
                },
            )?;
            return Ok(out);
        }
        Err(Error::Conflict {
            namespace: self.namespace.to_string(),
            key: key.to_string(),
        })
    }

    pub fn store(&self, key: &str, envelope: &Envelope<T>) -> Result<()> {
        let payload = serde_json::to_vec_pretty(envelope)?;
        self.backend.write(self.namespace, key, &payload)
    }

    /// Drop the whole document for `key`
    pub fn clear(&self, key: &str) -> Result<()> {
        self.backend.remove(self.namespace, key)
    }

    fn decode(&self, key: &str, bytes: &[u8]) -> Envelope<T> {
        match serde_json::from_slice::<Envelope<T>>(bytes) {
            Ok(envelope) => envelope,
            Err(envelope_err) => {
                // Pre-envelope deployments stored the bare record array.
                if let Ok(records) = serde_json::from_slice::<Vec<T>>(bytes) {
                    return Envelope {
                        revision: 0,
                        records,
                    };
                }
                tracing::warn!(
                    namespace = self.namespace,
                    key,
                    error = %envelope_err,
                    "corrupt payload, treating as empty collection"
                );
                Envelope::default()
            }
        }
    }
}
