use chrono::{Duration, Utc};
use proofroom_core::NewProject;

/// Standard test listing, due in two days
pub fn test_house() -> NewProject {
    project("Test House", "A", "a@x.com", 2)
}

pub fn project(name: &str, client: &str, email: &str, days_out: i64) -> NewProject {
    NewProject {
        id: None,
        name: name.to_string(),
        client: client.to_string(),
        client_email: email.to_string(),
        deadline: Utc::now() + Duration::days(days_out),
        status: None,
        progress: None,
    }
}
