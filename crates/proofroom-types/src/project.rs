use crate::id::ProjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a client project. Media approval cascades into this:
/// an approved current version completes the project, a rejected one sends
/// it back to awaiting-feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Active,
    InReview,
    AwaitingFeedback,
    Completed,
}

impl ProjectStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "Active",
            ProjectStatus::InReview => "In Review",
            ProjectStatus::AwaitingFeedback => "Awaiting Feedback",
            ProjectStatus::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Urgent,
    High,
    Normal,
}

impl Priority {
    /// Sort rank: urgent first, then high, then normal
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Urgent => 0,
            Priority::High => 1,
            Priority::Normal => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Urgent => "Urgent",
            Priority::High => "High",
            Priority::Normal => "Normal",
        }
    }
}

/// Whole days until the deadline, rounded up (a deadline later today counts
/// as 1 the moment it is less than a full day away; overdue is negative).
pub fn days_until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (deadline - now).num_milliseconds();
    (millis as f64 / 86_400_000.0).ceil() as i64
}

/// Deadline-derived priority: due within a day (or overdue) is urgent,
/// within three days is high, anything further out is normal.
pub fn priority_for(deadline: DateTime<Utc>, now: DateTime<Utc>) -> Priority {
    let days = days_until(deadline, now);
    if days <= 1 {
        Priority::Urgent
    } else if days <= 3 {
        Priority::High
    } else {
        Priority::Normal
    }
}

/// One unit of client work (a property listing). Owns all media versions,
/// comments and notifications filed under its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub client: String,
    pub client_email: String,
    pub deadline: DateTime<Utc>,
    pub status: ProjectStatus,
    pub progress: u8,
    /// Explicit pin set by a user; when absent the priority is derived from
    /// the deadline on every read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_override: Option<Priority>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl Project {
    /// Effective priority at `now`: the pinned override when present,
    /// otherwise derived from the deadline.
    pub fn priority(&self, now: DateTime<Utc>) -> Priority {
        self.priority_override
            .unwrap_or_else(|| priority_for(self.deadline, now))
    }

    pub fn days_until_deadline(&self, now: DateTime<Utc>) -> i64 {
        days_until(self.deadline, now)
    }

    /// Human deadline label for list displays
    pub fn deadline_label(&self, now: DateTime<Utc>) -> String {
        match self.days_until_deadline(now) {
            d if d < 0 => "Overdue".to_string(),
            0 => "Due today".to_string(),
            1 => "Due tomorrow".to_string(),
            d => format!("Due in {} days", d),
        }
    }
}
