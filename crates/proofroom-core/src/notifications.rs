use crate::Result;
use chrono::Utc;
use proofroom_store::{Collection, StoreBackend, namespaces};
use proofroom_sync::{ChangeBus, ChangeEvent, EntityKind};
use proofroom_types::{NoticeKind, Notification, ProjectId, prefixed_id};
use std::sync::Arc;

pub const DEFAULT_RETAIN: usize = 200;

/// Per-project feed of system-generated notices, newest first. Notices are
/// created as side effects of media and comment mutations; the only field
/// that changes afterwards is the read flag. The feed is bounded: once a
/// project accumulates more than the retention cap, the oldest entries fall
/// off.
#[derive(Clone)]
pub struct NotificationFeed {
    col: Collection<Notification>,
    bus: Arc<ChangeBus>,
    retain: usize,
}

impl NotificationFeed {
    pub fn new(backend: Arc<dyn StoreBackend>, bus: Arc<ChangeBus>, retain: usize) -> Self {
        Self {
            col: Collection::new(backend, namespaces::NOTIFICATIONS),
            bus,
            retain,
        }
    }

    pub fn add(
        &self,
        project_id: &ProjectId,
        kind: NoticeKind,
        message: impl Into<String>,
    ) -> Result<Notification> {
        let notice = Notification {
            id: prefixed_id("notif"),
            project_id: project_id.clone(),
            kind,
            message: message.into(),
            timestamp: Utc::now(),
            read: false,
        };

        let retain = self.retain;
        self.col.mutate(project_id.as_str(), |records| {
            records.insert(0, notice.clone());
            records.truncate(retain);
        })?;

        self.bus
            .publish(ChangeEvent::mutation(EntityKind::Notification, project_id));
        Ok(notice)
    }

    /// All notices for a project, newest first
    pub fn list(&self, project_id: &ProjectId) -> Result<Vec<Notification>> {
        let mut notices = self.col.records(project_id.as_str())?;
        notices.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(notices)
    }

    pub fn unread_count(&self, project_id: &ProjectId) -> Result<usize> {
        Ok(self
            .col
            .records(project_id.as_str())?
            .iter()
            .filter(|notice| !notice.read)
            .count())
    }

    /// Flip every notice to read. Idempotent; publishes only when something
    /// actually changed.
    pub fn mark_all_read(&self, project_id: &ProjectId) -> Result<()> {
        let changed = self.col.mutate(project_id.as_str(), |records| {
            let mut changed = false;
            for notice in records.iter_mut() {
                if !notice.read {
                    notice.read = true;
                    changed = true;
                }
            }
            changed
        })?;

        if changed {
            self.bus
                .publish(ChangeEvent::mutation(EntityKind::Notification, project_id));
        }
        Ok(())
    }

    /// Drop the whole feed; used by the project delete cascade
    pub(crate) fn purge(&self, project_id: &ProjectId) -> Result<()> {
        self.col.clear(project_id.as_str())?;
        Ok(())
    }
}
