use crate::media::MediaLibrary;
use crate::notifications::NotificationFeed;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use proofroom_store::{Collection, StoreBackend, namespaces};
use proofroom_sync::{ChangeBus, ChangeEvent, EntityKind};
use proofroom_types::{Comment, CommentStatus, NoticeKind, ProjectId, Role, prefixed_id};
use std::sync::Arc;

/// Thread display wants oldest first; list/summary views want newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    OldestFirst,
    NewestFirst,
}

/// Per-project conversation between agent and client. Comments are never
/// edited; the agent moves them through the new → work-in-progress →
/// complete workflow. Posting notifies the opposite role.
#[derive(Clone)]
pub struct CommentThread {
    col: Collection<Comment>,
    media: MediaLibrary,
    notices: NotificationFeed,
    bus: Arc<ChangeBus>,
}

impl CommentThread {
    pub fn new(
        backend: Arc<dyn StoreBackend>,
        bus: Arc<ChangeBus>,
        media: MediaLibrary,
        notices: NotificationFeed,
    ) -> Self {
        Self {
            col: Collection::new(backend, namespaces::COMMENTS),
            media,
            notices,
            bus,
        }
    }

    /// Post a comment. Empty or whitespace-only text is rejected before
    /// anything is stored or notified. The label of the current media
    /// version is snapshotted onto the comment when one exists.
    pub fn post(
        &self,
        project_id: &ProjectId,
        text: &str,
        author: Role,
        author_name: Option<&str>,
    ) -> Result<Comment> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::Validation("comment text is required".to_string()));
        }

        let version = self.media.current(project_id)?.map(|m| m.version_label());
        let author_name = author_name
            .map(str::to_string)
            .unwrap_or_else(|| author.default_author_name().to_string());

        let comment = Comment {
            id: prefixed_id("comment"),
            project_id: project_id.clone(),
            text: text.to_string(),
            author,
            author_name,
            timestamp: Utc::now(),
            status: CommentStatus::New,
            version,
        };

        self.col
            .mutate(project_id.as_str(), |records| records.push(comment.clone()))?;

        self.notices.add(
            project_id,
            NoticeKind::CommentAwaiting,
            format!(
                "New comment from {} for the {}: {}",
                comment.author_name,
                author.opposite(),
                comment.text
            ),
        )?;

        self.bus
            .publish(ChangeEvent::mutation(EntityKind::Comment, project_id));
        Ok(comment)
    }

    pub fn list(&self, project_id: &ProjectId, order: SortOrder) -> Result<Vec<Comment>> {
        let mut comments = self.col.records(project_id.as_str())?;
        match order {
            SortOrder::OldestFirst => comments.sort_by(|a, b| a.timestamp.cmp(&b.timestamp)),
            SortOrder::NewestFirst => comments.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
        }
        Ok(comments)
    }

    pub fn count(&self, project_id: &ProjectId) -> Result<usize> {
        Ok(self.col.records(project_id.as_str())?.len())
    }

    /// Comments newer than a caller-held last-view time
    pub fn unread_since(&self, project_id: &ProjectId, since: DateTime<Utc>) -> Result<usize> {
        Ok(self
            .col
            .records(project_id.as_str())?
            .iter()
            .filter(|c| c.timestamp > since)
            .count())
    }

    pub fn set_status(
        &self,
        project_id: &ProjectId,
        comment_id: &str,
        status: CommentStatus,
    ) -> Result<Comment> {
        let updated = self.col.mutate(project_id.as_str(), |records| {
            records
                .iter_mut()
                .find(|c| c.id == comment_id)
                .map(|comment| {
                    comment.status = status;
                    comment.clone()
                })
        })?;
        let comment = updated.ok_or_else(|| Error::not_found("comment", comment_id))?;

        self.bus
            .publish(ChangeEvent::mutation(EntityKind::Comment, project_id));
        Ok(comment)
    }

    /// Administrative removal; not part of the normal review flow
    pub fn remove(&self, project_id: &ProjectId, comment_id: &str) -> Result<()> {
        let removed = self.col.mutate(project_id.as_str(), |records| {
            let before = records.len();
            records.retain(|c| c.id != comment_id);
            records.len() != before
        })?;
        if !removed {
            return Err(Error::not_found("comment", comment_id));
        }

        self.bus
            .publish(ChangeEvent::mutation(EntityKind::Comment, project_id));
        Ok(())
    }
}
