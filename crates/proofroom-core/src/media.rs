use crate::notifications::NotificationFeed;
use crate::registry::{ProjectPatch, ProjectRegistry};
use crate::{Error, Result};
use chrono::Utc;
use proofroom_store::{Collection, StoreBackend, namespaces};
use proofroom_sync::{ChangeBus, ChangeEvent, EntityKind};
use proofroom_types::{
    MediaKind, MediaStatus, MediaVersion, NoticeKind, ProjectId, ProjectStatus, prefixed_id,
};
use std::sync::Arc;

/// Append-only version list of uploaded media per project. Versions are
/// numbered from 1 and never deleted individually; the entry with the
/// highest number is the project's current version. Review decisions on a
/// version cascade into the owning project's status.
#[derive(Clone)]
pub struct MediaLibrary {
    col: Collection<MediaVersion>,
    registry: ProjectRegistry,
    notices: NotificationFeed,
    bus: Arc<ChangeBus>,
}

impl MediaLibrary {
    pub fn new(
        backend: Arc<dyn StoreBackend>,
        bus: Arc<ChangeBus>,
        registry: ProjectRegistry,
        notices: NotificationFeed,
    ) -> Self {
        Self {
            col: Collection::new(backend, namespaces::MEDIA),
            registry,
            notices,
            bus,
        }
    }

    /// Append a new version. The first upload of a project notifies as
    /// `new-photo`/`new-video`, every later one as `new-version`.
    pub fn add_version(
        &self,
        project_id: &ProjectId,
        kind: MediaKind,
        file_name: &str,
        url: &str,
        notes: Option<&str>,
    ) -> Result<MediaVersion> {
        let file_name = file_name.trim();
        if file_name.is_empty() {
            return Err(Error::Validation("file name is required".to_string()));
        }

        let created = self.col.mutate(project_id.as_str(), |records| {
            let version = records.iter().map(|m| m.version).max().unwrap_or(0) + 1;
            let media = MediaVersion {
                id: prefixed_id(kind.id_prefix()),
                project_id: project_id.clone(),
                kind,
                file_name: file_name.to_string(),
                url: url.to_string(),
                version,
                uploaded_at: Utc::now(),
                status: MediaStatus::UnderReview,
                approved_by: None,
                approved_at: None,
                notes: notes.map(str::to_string),
            };
            records.push(media.clone());
            media
        })?;

        if created.version == 1 {
            self.notices.add(
                project_id,
                kind.first_upload_notice(),
                format!("New {} uploaded: {}", kind, file_name),
            )?;
        } else {
            self.notices.add(
                project_id,
                NoticeKind::NewVersion,
                format!("New version uploaded: {}", file_name),
            )?;
        }

        self.bus
            .publish(ChangeEvent::mutation(EntityKind::Media, project_id));
        Ok(created)
    }

    /// All versions for a project, oldest first
    pub fn list(&self, project_id: &ProjectId) -> Result<Vec<MediaVersion>> {
        let mut versions = self.col.records(project_id.as_str())?;
        versions.sort_by_key(|m| m.version);
        Ok(versions)
    }

    /// The version with the highest number, if any were uploaded
    pub fn current(&self, project_id: &ProjectId) -> Result<Option<MediaVersion>> {
        Ok(self
            .col
            .records(project_id.as_str())?
            .into_iter()
            .max_by_key(|m| m.version))
    }

    /// Record a review decision. `approved` stamps the approval fields and
    /// completes the project; `not-approved` sends it back to
    /// awaiting-feedback; `under-review` resets the decision without
    /// touching the project.
    pub fn set_status(
        &self,
        project_id: &ProjectId,
        media_id: &str,
        status: MediaStatus,
        approved_by: Option<&str>,
    ) -> Result<MediaVersion> {
        let updated = self.col.mutate(project_id.as_str(), |records| {
            records.iter_mut().find(|m| m.id == media_id).map(|media| {
                media.status = status;
                media.approved_by = approved_by.map(str::to_string);
                media.approved_at = if status == MediaStatus::Approved {
                    Some(Utc::now())
                } else {
                    None
                };
                media.clone()
            })
        })?;
        let media = updated.ok_or_else(|| Error::not_found("media version", media_id))?;

        let cascade = match status {
            MediaStatus::Approved => Some(ProjectStatus::Completed),
            MediaStatus::NotApproved => Some(ProjectStatus::AwaitingFeedback),
            MediaStatus::UnderReview => None,
        };
        if let Some(project_status) = cascade {
            match self.registry.update(project_id, ProjectPatch::status(project_status)) {
                Ok(_) => {}
                Err(Error::NotFound { .. }) => {
                    // Media can exist for an id the registry never saw;
                    // match the original and leave the decision standing.
                    tracing::debug!(project = %project_id, "status cascade skipped, project record missing");
                }
                Err(err) => return Err(err),
            }
        }

        self.bus
            .publish(ChangeEvent::mutation(EntityKind::Media, project_id));
        Ok(media)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::DEFAULT_RETAIN;
    use crate::registry::NewProject;
    use chrono::Duration;
    use proofroom_store::MemoryStore;
    use proofroom_types::{NoticeKind, ProjectStatus};

    struct World {
        registry: ProjectRegistry,
        media: MediaLibrary,
        notices: NotificationFeed,
        project: ProjectId,
    }

    fn world() -> World {
        let backend: Arc<dyn StoreBackend> = Arc::new(MemoryStore::new());
        let bus = Arc::new(ChangeBus::new());
        let notices = NotificationFeed::new(backend.clone(), bus.clone(), DEFAULT_RETAIN);
        let registry = ProjectRegistry::new(backend.clone(), bus.clone(), notices.clone());
        let media = MediaLibrary::new(backend, bus, registry.clone(), notices.clone());

        let project = registry
            .create(NewProject {
                id: None,
                name: "Test House".to_string(),
                client: "A".to_string(),
                client_email: "a@x.com".to_string(),
                deadline: Utc::now() + Duration::days(2),
                status: None,
                progress: None,
            })
            .unwrap();

        World {
            registry,
            media,
            notices,
            project: project.id,
        }
    }

    #[test]
    fn versions_are_assigned_monotonically() {
        let w = world();
        let first = w
            .media
            .add_version(&w.project, MediaKind::Photo, "p1.jpg", "url1", None)
            .unwrap();
        let second = w
            .media
            .add_version(&w.project, MediaKind::Photo, "p2.jpg", "url2", None)
            .unwrap();

        assert_eq!(first.version, 1);
        assert_eq!(first.status, MediaStatus::UnderReview);
        assert_eq!(second.version, 2);
        assert_eq!(w.media.current(&w.project).unwrap().unwrap().version, 2);
    }

    #[test]
    fn first_upload_notifies_new_photo_then_new_version() {
        let w = world();
        w.media
            .add_version(&w.project, MediaKind::Photo, "p1.jpg", "url1", None)
            .unwrap();
        w.media
            .add_version(&w.project, MediaKind::Photo, "p2.jpg", "url2", None)
            .unwrap();

        let notices = w.notices.list(&w.project).unwrap();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[1].kind, NoticeKind::NewPhoto);
        assert_eq!(notices[1].message, "New photo uploaded: p1.jpg");
        assert_eq!(notices[0].kind, NoticeKind::NewVersion);
        assert_eq!(notices[0].message, "New version uploaded: p2.jpg");
    }

    #[test]
    fn first_video_upload_notifies_new_video() {
        let w = world();
        w.media
            .add_version(&w.project, MediaKind::Video, "tour.mp4", "url1", None)
            .unwrap();
        let notices = w.notices.list(&w.project).unwrap();
        assert_eq!(notices[0].kind, NoticeKind::NewVideo);
        assert_eq!(notices[0].message, "New video uploaded: tour.mp4");
    }

    #[test]
    fn approval_completes_the_project() {
        let w = world();
        let media = w
            .media
            .add_version(&w.project, MediaKind::Photo, "p1.jpg", "url1", None)
            .unwrap();

        let approved = w
            .media
            .set_status(
                &w.project,
                &media.id,
                MediaStatus::Approved,
                Some("client@x.com"),
            )
            .unwrap();

        assert_eq!(approved.status, MediaStatus::Approved);
        assert_eq!(approved.approved_by.as_deref(), Some("client@x.com"));
        assert!(approved.approved_at.is_some());
        assert_eq!(
            w.registry.get(&w.project).unwrap().unwrap().status,
            ProjectStatus::Completed
        );
    }

    #[test]
    fn rejection_sends_project_back_to_awaiting_feedback() {
        let w = world();
        let media = w
            .media
            .add_version(&w.project, MediaKind::Photo, "p1.jpg", "url1", None)
            .unwrap();

        let rejected = w
            .media
            .set_status(&w.project, &media.id, MediaStatus::NotApproved, None)
            .unwrap();

        assert!(rejected.approved_at.is_none());
        assert_eq!(
            w.registry.get(&w.project).unwrap().unwrap().status,
            ProjectStatus::AwaitingFeedback
        );
    }

    #[test]
    fn reset_to_under_review_leaves_project_alone() {
        let w = world();
        let media = w
            .media
            .add_version(&w.project, MediaKind::Photo, "p1.jpg", "url1", None)
            .unwrap();
        w.media
            .set_status(&w.project, &media.id, MediaStatus::Approved, Some("c@x.com"))
            .unwrap();

        w.media
            .set_status(&w.project, &media.id, MediaStatus::UnderReview, None)
            .unwrap();
        // Project stays completed; only a fresh decision moves it again
        assert_eq!(
            w.registry.get(&w.project).unwrap().unwrap().status,
            ProjectStatus::Completed
        );
    }

    #[test]
    fn set_status_on_unknown_media_is_not_found() {
        let w = world();
        let result = w
            .media
            .set_status(&w.project, "photo-missing", MediaStatus::Approved, None);
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }

    #[test]
    fn decision_on_stale_version_still_cascades() {
        // The cascade keys off the decision, not off which version is
        // current; approving an old version completes the project too.
        let w = world();
        let v1 = w
            .media
            .add_version(&w.project, MediaKind::Photo, "p1.jpg", "url1", None)
            .unwrap();
        w.media
            .add_version(&w.project, MediaKind::Photo, "p2.jpg", "url2", None)
            .unwrap();

        w.media
            .set_status(&w.project, &v1.id, MediaStatus::Approved, Some("c@x.com"))
            .unwrap();
        assert_eq!(
            w.registry.get(&w.project).unwrap().unwrap().status,
            ProjectStatus::Completed
        );
        assert_eq!(w.media.current(&w.project).unwrap().unwrap().version, 2);
    }
}
