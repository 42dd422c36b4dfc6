pub mod backend;
pub mod collection;
pub mod error;
pub mod fallback;
pub mod local;
pub mod memory;

pub use backend::{Fingerprint, RemoteBackend, RemoteChange, StoreBackend, namespaces};
pub use collection::{Collection, Envelope};
pub use error::{Error, Result};
pub use fallback::{FallbackStore, Origin};
pub use local::LocalStore;
pub use memory::MemoryStore;
