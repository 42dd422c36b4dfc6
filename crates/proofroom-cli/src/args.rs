use chrono::{DateTime, Duration, NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use proofroom_sync::EntityKind;
use proofroom_types::{CommentStatus, MediaKind, Role};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "proofroom",
    version,
    about = "Client review desk for real-estate listing media"
)]
pub struct Cli {
    /// Data directory (defaults to $PROOFROOM_PATH or the platform data dir)
    #[arg(long, global = true)]
    pub path: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a workspace, optionally seeded with demo listings
    Init {
        #[arg(long)]
        demo: bool,
    },

    /// Manage listing projects
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },

    /// Upload a new media version for review
    Upload {
        kind: MediaKindArg,
        project: String,
        file: PathBuf,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Record a review decision on a media version
    Review {
        project: String,
        decision: Decision,
        /// Media id; defaults to the current version
        #[arg(long)]
        media: Option<String>,
        /// Reviewer recorded with the decision
        #[arg(long)]
        by: Option<String>,
    },

    /// Read and write the project comment thread
    Comment {
        #[command(subcommand)]
        command: CommentCommands,
    },

    /// Show a project's notifications
    Notices {
        project: String,
        /// Mark everything read after listing
        #[arg(long)]
        read: bool,
    },

    /// Stream change events as they happen
    Watch {
        /// Restrict to one entity kind
        #[arg(long)]
        only: Option<KindArg>,
    },
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Create a listing project
    Add {
        name: String,
        #[arg(long)]
        client: String,
        #[arg(long)]
        email: String,
        /// Days from now, or a date (YYYY-MM-DD / RFC3339)
        #[arg(long, value_parser = parse_deadline)]
        deadline: DateTime<Utc>,
    },
    /// List projects
    List {
        /// Sort urgent-first instead of storage order
        #[arg(long)]
        by_priority: bool,
    },
    /// Show one project with its media and thread summary
    Show { id: String },
    /// Delete a project and everything filed under it
    Rm { id: String },
}

#[derive(Subcommand)]
pub enum CommentCommands {
    /// Post a comment to a project thread
    Add {
        project: String,
        text: String,
        #[arg(long, value_enum, default_value = "agent")]
        role: RoleArg,
        /// Display name; defaults to the role label
        #[arg(long)]
        name: Option<String>,
    },
    /// Print a project's thread
    List {
        project: String,
        /// Newest first (list view) instead of conversation order
        #[arg(long)]
        newest_first: bool,
    },
    /// Move a comment through the workflow
    Status {
        project: String,
        comment: String,
        status: CommentStatusArg,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MediaKindArg {
    Photo,
    Video,
}

impl From<MediaKindArg> for MediaKind {
    fn from(arg: MediaKindArg) -> Self {
        match arg {
            MediaKindArg::Photo => MediaKind::Photo,
            MediaKindArg::Video => MediaKind::Video,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Decision {
    Approve,
    Reject,
    Reset,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoleArg {
    Client,
    Agent,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Client => Role::Client,
            RoleArg::Agent => Role::Agent,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CommentStatusArg {
    New,
    WorkInProgress,
    Complete,
}

impl From<CommentStatusArg> for CommentStatus {
    fn from(arg: CommentStatusArg) -> Self {
        match arg {
            CommentStatusArg::New => CommentStatus::New,
            CommentStatusArg::WorkInProgress => CommentStatus::WorkInProgress,
            CommentStatusArg::Complete => CommentStatus::Complete,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Project,
    Media,
    Comment,
    Notification,
}

impl From<KindArg> for EntityKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Project => EntityKind::Project,
            KindArg::Media => EntityKind::Media,
            KindArg::Comment => EntityKind::Comment,
            KindArg::Notification => EntityKind::Notification,
        }
    }
}

/// Accepts "3" (days from now), "2026-08-20", or a full RFC3339 timestamp
fn parse_deadline(value: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(days) = value.parse::<i64>() {
        return Ok(Utc::now() + Duration::days(days));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| format!("invalid date: {}", value))?;
        return Ok(DateTime::from_naive_utc_and_offset(midnight, Utc));
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            format!(
                "invalid deadline '{}': expected days from now, YYYY-MM-DD, or RFC3339",
                value
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadline_accepts_day_offsets() {
        let deadline = parse_deadline("3").unwrap();
        let days = (deadline - Utc::now()).num_days();
        assert!((2..=3).contains(&days));
    }

    #[test]
    fn deadline_accepts_dates() {
        assert!(parse_deadline("2026-08-20").is_ok());
        assert!(parse_deadline("2026-08-20T12:00:00Z").is_ok());
        assert!(parse_deadline("soon").is_err());
    }
}
