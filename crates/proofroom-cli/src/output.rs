use chrono::{DateTime, Utc};
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use proofroom_types::{CommentStatus, MediaStatus, Priority, ProjectStatus};

fn color_enabled() -> bool {
    std::io::stdout().is_terminal()
}

pub fn heading(text: &str) -> String {
    if color_enabled() {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

pub fn dim(text: &str) -> String {
    if color_enabled() {
        text.dimmed().to_string()
    } else {
        text.to_string()
    }
}

pub fn project_status(status: ProjectStatus) -> String {
    let label = status.label();
    if !color_enabled() {
        return label.to_string();
    }
    match status {
        ProjectStatus::Active => label.green().to_string(),
        ProjectStatus::InReview => label.yellow().to_string(),
        ProjectStatus::AwaitingFeedback => label.cyan().to_string(),
        ProjectStatus::Completed => label.dimmed().to_string(),
    }
}

pub fn media_status(status: MediaStatus) -> String {
    let label = status.label();
    if !color_enabled() {
        return label.to_string();
    }
    match status {
        MediaStatus::UnderReview => label.yellow().to_string(),
        MediaStatus::Approved => label.green().to_string(),
        MediaStatus::NotApproved => label.red().to_string(),
    }
}

pub fn comment_status(status: CommentStatus) -> String {
    let label = status.label();
    if !color_enabled() {
        return label.to_string();
    }
    match status {
        CommentStatus::New => label.blue().to_string(),
        CommentStatus::WorkInProgress => label.yellow().to_string(),
        CommentStatus::Complete => label.green().to_string(),
    }
}

pub fn priority(priority: Priority) -> String {
    let label = priority.label();
    if !color_enabled() {
        return label.to_string();
    }
    match priority {
        Priority::Urgent => label.red().to_string(),
        Priority::High => label.yellow().to_string(),
        Priority::Normal => label.to_string(),
    }
}

/// Relative timestamp for list displays: "Just now", "5 minutes ago",
/// "3 hours ago", "2 days ago", then the date.
pub fn relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - timestamp;
    let seconds = elapsed.num_seconds();
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if seconds < 60 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{} {} ago", minutes, if minutes == 1 { "minute" } else { "minutes" })
    } else if hours < 24 {
        format!("{} {} ago", hours, if hours == 1 { "hour" } else { "hours" })
    } else if days < 7 {
        format!("{} {} ago", days, if days == 1 { "day" } else { "days" })
    } else {
        timestamp.format("%b %-d, %Y").to_string()
    }
}
