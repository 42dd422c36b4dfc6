use crate::Result;
use proofroom_store::{RemoteBackend, StoreBackend};
use proofroom_sync::{
    ChangeBus, ChangeEvent, EntityKind, PollIntervals, RefreshTimer, RemoteFeed,
};
use std::sync::Arc;
use std::sync::mpsc::Receiver;

/// Builder for a running watch. By default every entity kind is delivered;
/// narrow with [`WatchBuilder::only`].
pub struct WatchBuilder {
    backend: Arc<dyn StoreBackend>,
    bus: Arc<ChangeBus>,
    remote: Option<Arc<dyn RemoteBackend>>,
    intervals: PollIntervals,
    kind: Option<EntityKind>,
}

impl WatchBuilder {
    pub(crate) fn new(
        backend: Arc<dyn StoreBackend>,
        bus: Arc<ChangeBus>,
        remote: Option<Arc<dyn RemoteBackend>>,
        intervals: PollIntervals,
    ) -> Self {
        Self {
            backend,
            bus,
            remote,
            intervals,
            kind: None,
        }
    }

    /// Deliver only one entity kind
    pub fn only(mut self, kind: EntityKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Override the polling cadence configured on the workspace
    pub fn poll_intervals(mut self, intervals: PollIntervals) -> Self {
        self.intervals = intervals;
        self
    }

    pub fn start(self) -> Result<Watch> {
        let events = match self.kind {
            Some(kind) => self.bus.subscribe_to(kind),
            None => self.bus.subscribe(),
        };

        let timer = RefreshTimer::start(self.backend.clone(), self.bus.clone(), self.intervals)?;

        let remote_feed = match &self.remote {
            Some(remote) => Some(RemoteFeed::start(remote, self.bus.clone())?),
            None => None,
        };

        Ok(Watch {
            events,
            _timer: timer,
            _remote_feed: remote_feed,
        })
    }
}

/// A live subscription plus the background machinery keeping it honest.
/// Dropping the watch stops the refresh timer.
pub struct Watch {
    events: Receiver<ChangeEvent>,
    _timer: RefreshTimer,
    _remote_feed: Option<RemoteFeed>,
}

impl Watch {
    pub fn events(&self) -> &Receiver<ChangeEvent> {
        &self.events
    }
}
