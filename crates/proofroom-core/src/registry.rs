use crate::notifications::NotificationFeed;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use proofroom_store::{Collection, StoreBackend, namespaces};
use proofroom_sync::{ChangeBus, ChangeEvent, EntityKind};
use proofroom_types::{Priority, Project, ProjectId, ProjectStatus};
use std::sync::Arc;

/// Input for [`ProjectRegistry::create`]. The id is derived from the name
/// unless one is supplied.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub id: Option<ProjectId>,
    pub name: String,
    pub client: String,
    pub client_email: String,
    pub deadline: DateTime<Utc>,
    pub status: Option<ProjectStatus>,
    pub progress: Option<u8>,
}

/// Partial update for [`ProjectRegistry::update`]. `priority_override` is
/// doubled up so a patch can distinguish "leave alone" from "clear the pin".
#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub client: Option<String>,
    pub client_email: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub status: Option<ProjectStatus>,
    pub progress: Option<u8>,
    pub priority_override: Option<Option<Priority>>,
}

impl ProjectPatch {
    pub fn status(status: ProjectStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// CRUD over the global project list. The list lives in a single document
/// (`projects:all`); deleting a project cascades to its media, comments and
/// notifications.
#[derive(Clone)]
pub struct ProjectRegistry {
    col: Collection<Project>,
    backend: Arc<dyn StoreBackend>,
    notices: NotificationFeed,
    bus: Arc<ChangeBus>,
}

impl ProjectRegistry {
    pub fn new(
        backend: Arc<dyn StoreBackend>,
        bus: Arc<ChangeBus>,
        notices: NotificationFeed,
    ) -> Self {
        Self {
            col: Collection::new(backend.clone(), namespaces::PROJECTS),
            backend,
            notices,
            bus,
        }
    }

    pub fn create(&self, new: NewProject) -> Result<Project> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(Error::Validation("project name is required".to_string()));
        }

        let id = match new.id {
            Some(id) if !id.is_empty() => id,
            _ => ProjectId::from_name(name),
        };
        if id.is_empty() {
            return Err(Error::Validation(format!(
                "project name '{}' does not yield a usable id",
                name
            )));
        }

        let now = Utc::now();
        let project = Project {
            id: id.clone(),
            name: name.to_string(),
            client: new.client,
            client_email: new.client_email,
            deadline: new.deadline,
            status: new.status.unwrap_or(ProjectStatus::Active),
            progress: new.progress.unwrap_or(0).min(100),
            priority_override: None,
            created_at: now,
            last_updated: now,
        };

        let inserted = self.col.mutate(namespaces::GLOBAL_KEY, |records| {
            if records.iter().any(|p| p.id == project.id) {
                false
            } else {
                records.push(project.clone());
                true
            }
        })?;
        if !inserted {
            return Err(Error::Validation(format!(
                "project id '{}' is already in use",
                id
            )));
        }

        self.publish(&id);
        Ok(project)
    }

    pub fn get(&self, id: &ProjectId) -> Result<Option<Project>> {
        Ok(self
            .col
            .records(namespaces::GLOBAL_KEY)?
            .into_iter()
            .find(|p| &p.id == id))
    }

    /// All projects, in storage order; callers sort
    pub fn list(&self) -> Result<Vec<Project>> {
        self.col.records(namespaces::GLOBAL_KEY).map_err(Error::from)
    }

    /// Projects sorted urgent-first, ties broken by earliest deadline.
    /// Priority is recomputed against `now` for the sort, it is never
    /// written back.
    pub fn list_by_priority(&self, now: DateTime<Utc>) -> Result<Vec<Project>> {
        let mut projects = self.list()?;
        projects.sort_by(|a, b| {
            a.priority(now)
                .rank()
                .cmp(&b.priority(now).rank())
                .then_with(|| a.deadline.cmp(&b.deadline))
        });
        Ok(projects)
    }

    pub fn update(&self, id: &ProjectId, patch: ProjectPatch) -> Result<Project> {
        let updated = self.col.mutate(namespaces::GLOBAL_KEY, |records| {
            records.iter_mut().find(|p| &p.id == id).map(|project| {
                if let Some(name) = &patch.name {
                    project.name = name.clone();
                }
                if let Some(client) = &patch.client {
                    project.client = client.clone();
                }
                if let Some(email) = &patch.client_email {
                    project.client_email = email.clone();
                }
                if let Some(deadline) = patch.deadline {
                    project.deadline = deadline;
                }
                if let Some(status) = patch.status {
                    project.status = status;
                }
                if let Some(progress) = patch.progress {
                    project.progress = progress.min(100);
                }
                if let Some(override_) = patch.priority_override {
                    project.priority_override = override_;
                }
                project.last_updated = Utc::now();
                project.clone()
            })
        })?;

        let project = updated.ok_or_else(|| Error::not_found("project", id.as_str()))?;
        self.publish(id);
        Ok(project)
    }

    /// Pin a project's priority, or clear the pin with `None` to return to
    /// deadline-derived priority.
    pub fn set_priority_override(
        &self,
        id: &ProjectId,
        priority: Option<Priority>,
    ) -> Result<Project> {
        self.update(
            id,
            ProjectPatch {
                priority_override: Some(priority),
                ..ProjectPatch::default()
            },
        )
    }

    /// Delete a project and everything filed under it. Returns false when
    /// the id was absent.
    pub fn delete(&self, id: &ProjectId) -> Result<bool> {
        let removed = self.col.mutate(namespaces::GLOBAL_KEY, |records| {
            let before = records.len();
            records.retain(|p| &p.id != id);
            records.len() != before
        })?;
        if !removed {
            return Ok(false);
        }

        // Cascade: every child collection is keyed by the project id.
        self.backend.remove(namespaces::MEDIA, id.as_str())?;
        self.backend.remove(namespaces::COMMENTS, id.as_str())?;
        self.notices.purge(id)?;

        self.publish(id);
        for kind in [EntityKind::Media, EntityKind::Comment, EntityKind::Notification] {
            self.bus.publish(ChangeEvent::mutation(kind, id));
        }
        Ok(true)
    }

    fn publish(&self, id: &ProjectId) {
        self.bus
            .publish(ChangeEvent::mutation(EntityKind::Project, id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::DEFAULT_RETAIN;
    use chrono::Duration;
    use proofroom_store::MemoryStore;

    fn registry() -> (Arc<dyn StoreBackend>, ProjectRegistry) {
        let backend: Arc<dyn StoreBackend> = Arc::new(MemoryStore::new());
        let bus = Arc::new(ChangeBus::new());
        let notices = NotificationFeed::new(backend.clone(), bus.clone(), DEFAULT_RETAIN);
        (backend.clone(), ProjectRegistry::new(backend, bus, notices))
    }

    fn new_project(name: &str, days_out: i64) -> NewProject {
        NewProject {
            id: None,
            name: name.to_string(),
            client: "A".to_string(),
            client_email: "a@x.com".to_string(),
            deadline: Utc::now() + Duration::days(days_out),
            status: None,
            progress: None,
        }
    }

    #[test]
    fn create_slugifies_and_defaults() {
        let (_backend, registry) = registry();
        let project = registry.create(new_project("Test House", 2)).unwrap();

        assert_eq!(project.id.as_str(), "test-house");
        assert_eq!(project.status, ProjectStatus::Active);
        assert_eq!(project.progress, 0);
        assert_eq!(
            registry.get(&project.id).unwrap().unwrap().name,
            "Test House"
        );
    }

    #[test]
    fn create_rejects_empty_name() {
        let (_backend, registry) = registry();
        let result = registry.create(new_project("   ", 2));
        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(registry.list().unwrap().is_empty());
    }

    #[test]
    fn create_rejects_duplicate_id() {
        let (_backend, registry) = registry();
        registry.create(new_project("Test House", 2)).unwrap();
        let result = registry.create(new_project("Test House", 5));
        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(registry.list().unwrap().len(), 1);
    }

    #[test]
    fn update_merges_and_refreshes_last_updated() {
        let (_backend, registry) = registry();
        let created = registry.create(new_project("Test House", 2)).unwrap();

        let updated = registry
            .update(
                &created.id,
                ProjectPatch {
                    progress: Some(60),
                    status: Some(ProjectStatus::InReview),
                    ..ProjectPatch::default()
                },
            )
            .unwrap();

        assert_eq!(updated.progress, 60);
        assert_eq!(updated.status, ProjectStatus::InReview);
        assert_eq!(updated.name, "Test House");
        assert!(updated.last_updated >= created.last_updated);
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let (_backend, registry) = registry();
        let result = registry.update(&ProjectId::new("nope"), ProjectPatch::default());
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }

    #[test]
    fn list_by_priority_orders_urgent_first() {
        let (_backend, registry) = registry();
        registry.create(new_project("Relaxed", 10)).unwrap();
        registry.create(new_project("Tomorrow", 1)).unwrap();
        registry.create(new_project("This Week", 3)).unwrap();

        let now = Utc::now();
        let ordered = registry.list_by_priority(now).unwrap();
        let names: Vec<&str> = ordered.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Tomorrow", "This Week", "Relaxed"]);
    }

    #[test]
    fn priority_override_pins_the_sort() {
        let (_backend, registry) = registry();
        let relaxed = registry.create(new_project("Relaxed", 30)).unwrap();
        registry.create(new_project("Tomorrow", 1)).unwrap();

        registry
            .set_priority_override(&relaxed.id, Some(Priority::Urgent))
            .unwrap();

        let now = Utc::now();
        let ordered = registry.list_by_priority(now).unwrap();
        // Both urgent now; the earlier deadline still sorts first
        assert_eq!(ordered[0].name, "Tomorrow");
        assert_eq!(ordered[1].priority(now), Priority::Urgent);

        registry.set_priority_override(&relaxed.id, None).unwrap();
        let cleared = registry.get(&relaxed.id).unwrap().unwrap();
        assert_eq!(cleared.priority(now), Priority::Normal);
    }

    #[test]
    fn delete_cascades_child_documents() {
        let (backend, registry) = registry();
        let project = registry.create(new_project("Test House", 2)).unwrap();
        let id = project.id.as_str();

        backend.write(namespaces::MEDIA, id, b"[]").unwrap();
        backend.write(namespaces::COMMENTS, id, b"[]").unwrap();
        backend.write(namespaces::NOTIFICATIONS, id, b"[]").unwrap();

        assert!(registry.delete(&project.id).unwrap());
        assert!(registry.get(&project.id).unwrap().is_none());
        assert!(backend.read(namespaces::MEDIA, id).unwrap().is_none());
        assert!(backend.read(namespaces::COMMENTS, id).unwrap().is_none());
        assert!(backend.read(namespaces::NOTIFICATIONS, id).unwrap().is_none());
    }

    #[test]
    fn delete_unknown_id_returns_false() {
        let (_backend, registry) = registry();
        assert!(!registry.delete(&ProjectId::new("nope")).unwrap());
    }
}
