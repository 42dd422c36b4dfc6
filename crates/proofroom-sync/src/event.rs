use proofroom_store::namespaces;
use proofroom_types::ProjectId;

/// Which of the four stored collections changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Project,
    Media,
    Comment,
    Notification,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Project,
        EntityKind::Media,
        EntityKind::Comment,
        EntityKind::Notification,
    ];

    pub fn namespace(&self) -> &'static str {
        match self {
            EntityKind::Project => namespaces::PROJECTS,
            EntityKind::Media => namespaces::MEDIA,
            EntityKind::Comment => namespaces::COMMENTS,
            EntityKind::Notification => namespaces::NOTIFICATIONS,
        }
    }

    pub fn from_namespace(namespace: &str) -> Option<EntityKind> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.namespace() == namespace)
    }
}

/// How a change reached the bus. A mutation in this process always publishes
/// directly; the poll and remote paths exist to catch writers elsewhere.
/// Consumers reload full state either way, so duplicate delivery across the
/// paths is harmless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrigin {
    /// Published by a mutating call in this process
    Mutation,
    /// Detected by the background fingerprint poll
    Poll,
    /// Pushed by the remote backend's subscription feed
    Remote,
}

#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub kind: EntityKind,
    /// The owning project for per-project collections; `None` when the
    /// global project list changed and the specific project is unknown
    /// (poll path on the registry document).
    pub project_id: Option<ProjectId>,
    pub origin: ChangeOrigin,
}

impl ChangeEvent {
    pub fn mutation(kind: EntityKind, project_id: &ProjectId) -> Self {
        Self {
            kind,
            project_id: Some(project_id.clone()),
            origin: ChangeOrigin::Mutation,
        }
    }
}
