use crate::output;
use anyhow::Result;
use chrono::Utc;
use proofroom_sdk::Proofroom;
use proofroom_types::ProjectId;

pub fn handle(desk: &Proofroom, project: &str, mark_read: bool) -> Result<()> {
    let project = ProjectId::new(project);
    let feed = desk.notifications();

    let notices = feed.list(&project)?;
    if notices.is_empty() {
        println!("No notifications for {}", project);
        return Ok(());
    }

    let now = Utc::now();
    for notice in &notices {
        let marker = if notice.read { " " } else { "*" };
        println!(
            "{} {}  {}",
            marker,
            notice.message,
            output::dim(&output::relative_time(notice.timestamp, now)),
        );
    }
    println!("{} unread", feed.unread_count(&project)?);

    if mark_read {
        feed.mark_all_read(&project)?;
        println!("Marked all read");
    }
    Ok(())
}
