use crate::bus::ChangeBus;
use crate::event::{ChangeEvent, ChangeOrigin, EntityKind};
use anyhow::Result;
use proofroom_store::{Fingerprint, StoreBackend, namespaces};
use proofroom_types::ProjectId;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::mpsc::{RecvTimeoutError, Sender, channel};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

const TICK: Duration = Duration::from_millis(250);

/// Per-kind poll cadence. Defaults match the observed refresh rates of the
/// original views: comments every 3s, everything else every 5s.
#[derive(Debug, Clone, Copy)]
pub struct PollIntervals {
    pub projects: Duration,
    pub media: Duration,
    pub comments: Duration,
    pub notifications: Duration,
}

impl Default for PollIntervals {
    fn default() -> Self {
        Self {
            projects: Duration::from_secs(5),
            media: Duration::from_secs(5),
            comments: Duration::from_secs(3),
            notifications: Duration::from_secs(5),
        }
    }
}

impl PollIntervals {
    pub fn uniform(interval: Duration) -> Self {
        Self {
            projects: interval,
            media: interval,
            comments: interval,
            notifications: interval,
        }
    }

    fn for_kind(&self, kind: EntityKind) -> Duration {
        match kind {
            EntityKind::Project => self.projects,
            EntityKind::Media => self.media,
            EntityKind::Comment => self.comments,
            EntityKind::Notification => self.notifications,
        }
    }
}

/// Background refresh backstop: fingerprints every stored document on a
/// fixed cadence and publishes a `Poll` event when one changed underneath
/// this process (another tab, another process, a remote writer the push
/// path missed). The event path stays primary; this timer only exists so a
/// missed event cannot strand a stale view.
pub struct RefreshTimer {
    stop_tx: Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl RefreshTimer {
    pub fn start(
        backend: Arc<dyn StoreBackend>,
        bus: Arc<ChangeBus>,
        intervals: PollIntervals,
    ) -> Result<Self> {
        // Prime the fingerprint cache before the thread starts so existing
        // state does not fire a storm of events at the first tick.
        let mut seen = HashMap::new();
        for kind in EntityKind::ALL {
            scan(&backend, kind, &mut seen, |_| {});
        }

        let (stop_tx, stop_rx) = channel();
        let handle = std::thread::Builder::new()
            .name("proofroom-refresh".to_string())
            .spawn(move || {
                let started = Instant::now();
                let mut next_due: HashMap<EntityKind, Instant> = EntityKind::ALL
                    .into_iter()
                    .map(|kind| (kind, started + intervals.for_kind(kind)))
                    .collect();

                loop {
                    match stop_rx.recv_timeout(TICK) {
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
                        Err(RecvTimeoutError::Timeout) => {}
                    }

                    let now = Instant::now();
                    for kind in EntityKind::ALL {
                        let due = next_due.get_mut(&kind).expect("kind is pre-seeded");
                        if now < *due {
                            continue;
                        }
                        *due = now + intervals.for_kind(kind);
                        scan(&backend, kind, &mut seen, |event| bus.publish(event));
                    }
                }
            })?;

        Ok(Self {
            stop_tx,
            handle: Some(handle),
        })
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        let _ = self.stop_tx.send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Fingerprint one namespace, updating `seen` and reporting changed, new
/// and removed documents.
fn scan(
    backend: &Arc<dyn StoreBackend>,
    kind: EntityKind,
    seen: &mut HashMap<(EntityKind, String), Fingerprint>,
    mut emit: impl FnMut(ChangeEvent),
) {
    let namespace = kind.namespace();
    let keys = match backend.keys(namespace) {
        Ok(keys) => keys,
        Err(err) => {
            tracing::debug!(namespace, error = %err, "refresh scan skipped");
            return;
        }
    };

    let mut current: HashMap<(EntityKind, String), Fingerprint> = HashMap::new();
    for key in keys {
        match backend.fingerprint(namespace, &key) {
            Ok(Some(fingerprint)) => {
                current.insert((kind, key), fingerprint);
            }
            Ok(None) => {}
            Err(err) => {
                tracing::debug!(namespace, key, error = %err, "fingerprint failed");
            }
        }
    }

    for ((_, key), fingerprint) in &current {
        if seen.get(&(kind, key.clone())) != Some(fingerprint) {
            emit(poll_event(kind, key));
        }
    }
    for (entry_kind, key) in seen.keys() {
        if *entry_kind == kind && !current.contains_key(&(kind, key.clone())) {
            emit(poll_event(kind, key));
        }
    }

    seen.retain(|(entry_kind, _), _| *entry_kind != kind);
    seen.extend(current);
}

fn poll_event(kind: EntityKind, key: &str) -> ChangeEvent {
    let project_id = if kind == EntityKind::Project && key == namespaces::GLOBAL_KEY {
        None
    } else {
        Some(ProjectId::new(key))
    };
    ChangeEvent {
        kind,
        project_id,
        origin: ChangeOrigin::Poll,
    }
}
