//! SDK facade for the proofroom data core.
//!
//! Open a workspace, get service handles, and subscribe to change events:
//!
//! ```no_run
//! use proofroom_sdk::Proofroom;
//!
//! # fn main() -> proofroom_sdk::Result<()> {
//! let desk = Proofroom::open_default()?;
//! for project in desk.projects().list()? {
//!     println!("{} ({})", project.name, project.status.label());
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod watch;

pub use config::{Config, resolve_data_dir};
pub use error::{Error, Result};
pub use watch::{Watch, WatchBuilder};

use proofroom_core::{CommentThread, MediaLibrary, NotificationFeed, ProjectRegistry};
use proofroom_store::{FallbackStore, LocalStore, Origin, RemoteBackend, StoreBackend};
use proofroom_sync::{ChangeBus, ChangeEvent, EntityKind};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::Receiver;

const CONFIG_FILE: &str = "config.toml";
const STORE_DIR: &str = "store";

/// One wired instance of the proofroom core: a storage backend, the change
/// bus, and the config everything was built from. Service handles are
/// constructed on demand and share these by reference — there are no
/// ambient globals, substitute any backend for testing.
pub struct Proofroom {
    backend: Arc<dyn StoreBackend>,
    fallback: Option<Arc<FallbackStore>>,
    remote: Option<Arc<dyn RemoteBackend>>,
    bus: Arc<ChangeBus>,
    config: Arc<Config>,
    data_dir: Option<PathBuf>,
}

impl Proofroom {
    /// Open (creating if needed) a workspace at the resolved default data
    /// directory.
    pub fn open_default() -> Result<Self> {
        Self::open(resolve_data_dir(None)?)
    }

    /// Open a workspace rooted at `data_dir`: loads `config.toml` (writing
    /// the defaults on first run) and backs the store with local JSON
    /// documents under `store/`.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        let config_path = data_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            Config::load_from(&config_path)?
        } else {
            let config = Config::default();
            config.save_to(&config_path)?;
            config
        };

        if config.remote.enabled {
            tracing::warn!(
                "remote backend enabled in config but none registered; running local-only"
            );
        }

        let backend: Arc<dyn StoreBackend> = Arc::new(LocalStore::open(data_dir.join(STORE_DIR))?);
        Ok(Self {
            backend,
            fallback: None,
            remote: None,
            bus: Arc::new(ChangeBus::new()),
            config: Arc::new(config),
            data_dir: Some(data_dir),
        })
    }

    /// Wire an explicit backend instead of the local document store;
    /// intended for tests and embedders.
    pub fn open_with(config: Config, backend: Arc<dyn StoreBackend>) -> Self {
        Self {
            backend,
            fallback: None,
            remote: None,
            bus: Arc::new(ChangeBus::new()),
            config: Arc::new(config),
            data_dir: None,
        }
    }

    /// Register a remote backend. All traffic goes remote-first with
    /// transparent fallback to the previously wired store;
    /// [`Proofroom::backend_origin`] reports which side served last.
    pub fn with_remote(mut self, remote: Arc<dyn RemoteBackend>) -> Self {
        let fallback = Arc::new(FallbackStore::new(remote.clone(), self.backend.clone()));
        self.backend = fallback.clone();
        self.fallback = Some(fallback);
        self.remote = Some(remote);
        self
    }

    pub fn projects(&self) -> ProjectRegistry {
        ProjectRegistry::new(self.backend.clone(), self.bus.clone(), self.notifications())
    }

    pub fn media(&self) -> MediaLibrary {
        MediaLibrary::new(
            self.backend.clone(),
            self.bus.clone(),
            self.projects(),
            self.notifications(),
        )
    }

    pub fn comments(&self) -> CommentThread {
        CommentThread::new(
            self.backend.clone(),
            self.bus.clone(),
            self.media(),
            self.notifications(),
        )
    }

    pub fn notifications(&self) -> NotificationFeed {
        NotificationFeed::new(
            self.backend.clone(),
            self.bus.clone(),
            self.config.notifications.retain,
        )
    }

    /// Subscribe to every change event published in this process
    pub fn subscribe(&self) -> Receiver<ChangeEvent> {
        self.bus.subscribe()
    }

    /// Subscribe to changes of one entity kind
    pub fn subscribe_to(&self, kind: EntityKind) -> Receiver<ChangeEvent> {
        self.bus.subscribe_to(kind)
    }

    /// Build a watch: an event subscription backed by the polling refresh
    /// timer (and the remote push feed when a remote is registered).
    pub fn watch(&self) -> WatchBuilder {
        WatchBuilder::new(
            self.backend.clone(),
            self.bus.clone(),
            self.remote.clone(),
            self.config.sync.poll_intervals(),
        )
    }

    /// Which backend served the most recent storage call, when running with
    /// a remote registered. `None` without one.
    pub fn backend_origin(&self) -> Option<Origin> {
        self.fallback.as_ref().map(|fallback| fallback.origin())
    }

    pub fn bus(&self) -> &Arc<ChangeBus> {
        &self.bus
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }
}
