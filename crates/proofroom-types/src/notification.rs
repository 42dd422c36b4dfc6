use crate::id::ProjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a notification is about. `new-photo`/`new-video` fire for a
/// project's first upload, `new-version` for every later upload,
/// `comment-awaiting` when one side posts a comment for the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoticeKind {
    NewPhoto,
    NewVideo,
    NewVersion,
    CommentAwaiting,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub project_id: ProjectId,
    #[serde(rename = "type")]
    pub kind: NoticeKind,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}
