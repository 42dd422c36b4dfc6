use crate::id::ProjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the review a user is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Client,
    Agent,
}

impl Role {
    pub fn opposite(&self) -> Role {
        match self {
            Role::Client => Role::Agent,
            Role::Agent => Role::Client,
        }
    }

    /// Display name used when the caller does not supply one
    pub fn default_author_name(&self) -> &'static str {
        match self {
            Role::Client => "Client",
            Role::Agent => "Agent",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Client => write!(f, "client"),
            Role::Agent => write!(f, "agent"),
        }
    }
}

/// Agent-managed workflow state of a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommentStatus {
    New,
    WorkInProgress,
    Complete,
}

impl CommentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CommentStatus::New => "New",
            CommentStatus::WorkInProgress => "Work in Progress",
            CommentStatus::Complete => "Complete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub project_id: ProjectId,
    pub text: String,
    pub author: Role,
    pub author_name: String,
    pub timestamp: DateTime<Utc>,
    pub status: CommentStatus,
    /// Label of the media version that was current when the comment was
    /// posted (`v2`), when one was resolvable.
    #[serde(default)]
    pub version: Option<String>,
}
