use proofroom_sdk::{Config, Proofroom};
use proofroom_store::{MemoryStore, RemoteBackend};
use std::sync::Arc;
use tempfile::TempDir;

/// One disposable workspace per test: a temp data directory, a wired
/// facade, and (optionally) an in-memory remote whose availability the test
/// controls.
pub struct TestWorld {
    pub desk: Proofroom,
    pub remote: Option<Arc<MemoryStore>>,
    // Held so the data directory outlives the test body
    _dir: TempDir,
}

impl TestWorld {
    /// Local-only workspace over a temp directory
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let desk = Proofroom::open(dir.path()).expect("open workspace");
        Self {
            desk,
            remote: None,
            _dir: dir,
        }
    }

    /// Workspace with an in-memory remote wired through the fallback store
    pub fn with_remote() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let remote = Arc::new(MemoryStore::new());
        let remote_dyn: Arc<dyn RemoteBackend> = remote.clone();
        let desk = Proofroom::open(dir.path())
            .expect("open workspace")
            .with_remote(remote_dyn);
        Self {
            desk,
            remote: Some(remote),
            _dir: dir,
        }
    }

    /// Workspace with a custom config over a temp directory
    pub fn with_config(config: Config) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let config_path = dir.path().join("config.toml");
        config.save_to(&config_path).expect("write config");
        let desk = Proofroom::open(dir.path()).expect("open workspace");
        Self {
            desk,
            remote: None,
            _dir: dir,
        }
    }

    pub fn data_dir(&self) -> &std::path::Path {
        self._dir.path()
    }
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}
