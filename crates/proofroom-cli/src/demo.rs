use chrono::{Duration, Utc};
use proofroom_core::NewProject;
use proofroom_types::{ProjectId, ProjectStatus};

/// Demo listings seeded by `proofroom init --demo`
pub fn demo_projects() -> Vec<NewProject> {
    let day = |days: i64| Utc::now() + Duration::days(days);
    vec![
        NewProject {
            id: Some(ProjectId::new("sunset-ridge-luxury")),
            name: "Sunset Ridge Luxury Estate".to_string(),
            client: "John Smith".to_string(),
            client_email: "john.smith@example.com".to_string(),
            deadline: day(2),
            status: Some(ProjectStatus::InReview),
            progress: Some(30),
        },
        NewProject {
            id: Some(ProjectId::new("downtown-loft-condo")),
            name: "Downtown Loft Condo Tour".to_string(),
            client: "Sarah Johnson".to_string(),
            client_email: "sarah.johnson@example.com".to_string(),
            deadline: day(1),
            status: Some(ProjectStatus::Active),
            progress: Some(85),
        },
        NewProject {
            id: Some(ProjectId::new("mountain-view-family")),
            name: "Mountain View Family Home".to_string(),
            client: "Mike Davis".to_string(),
            client_email: "mike.davis@example.com".to_string(),
            deadline: day(7),
            status: Some(ProjectStatus::AwaitingFeedback),
            progress: Some(10),
        },
        NewProject {
            id: Some(ProjectId::new("oceanfront-villa")),
            name: "Oceanfront Villa Premium Listing".to_string(),
            client: "Emily Chen".to_string(),
            client_email: "emily.chen@example.com".to_string(),
            deadline: day(5),
            status: Some(ProjectStatus::Active),
            progress: Some(50),
        },
    ]
}
