use crate::args::Decision;
use crate::output;
use anyhow::{Result, bail};
use proofroom_sdk::Proofroom;
use proofroom_types::{MediaStatus, ProjectId};

pub fn handle(
    desk: &Proofroom,
    project: &str,
    decision: Decision,
    media_id: Option<&str>,
    by: Option<&str>,
) -> Result<()> {
    let project = ProjectId::new(project);

    let media_id = match media_id {
        Some(id) => id.to_string(),
        None => match desk.media().current(&project)? {
            Some(current) => current.id,
            None => bail!("no media uploaded for {}", project),
        },
    };

    let status = match decision {
        Decision::Approve => MediaStatus::Approved,
        Decision::Reject => MediaStatus::NotApproved,
        Decision::Reset => MediaStatus::UnderReview,
    };

    let media = desk.media().set_status(&project, &media_id, status, by)?;
    println!(
        "{} v{} is now {}",
        media.file_name,
        media.version,
        output::media_status(media.status)
    );

    if let Some(updated) = desk.projects().get(&project)? {
        println!(
            "Project {} is {}",
            updated.id,
            output::project_status(updated.status)
        );
    }
    Ok(())
}
