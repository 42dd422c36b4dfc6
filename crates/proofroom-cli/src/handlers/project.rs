use crate::args::ProjectCommands;
use crate::output;
use anyhow::{Result, bail};
use chrono::Utc;
use proofroom_core::{NewProject, SortOrder};
use proofroom_sdk::Proofroom;
use proofroom_types::{Project, ProjectId};

pub fn handle(desk: &Proofroom, command: ProjectCommands) -> Result<()> {
    match command {
        ProjectCommands::Add {
            name,
            client,
            email,
            deadline,
        } => {
            let project = desk.projects().create(NewProject {
                id: None,
                name,
                client,
                client_email: email,
                deadline,
                status: None,
                progress: None,
            })?;
            println!("Created {} ({})", project.name, project.id);
            Ok(())
        }
        ProjectCommands::List { by_priority } => {
            let now = Utc::now();
            let projects = if by_priority {
                desk.projects().list_by_priority(now)?
            } else {
                desk.projects().list()?
            };
            if projects.is_empty() {
                println!("No projects yet");
                return Ok(());
            }
            for project in &projects {
                print_row(project);
            }
            Ok(())
        }
        ProjectCommands::Show { id } => show(desk, &ProjectId::new(id)),
        ProjectCommands::Rm { id } => {
            let id = ProjectId::new(id);
            if desk.projects().delete(&id)? {
                println!("Deleted {} and everything filed under it", id);
                Ok(())
            } else {
                bail!("project not found: {}", id);
            }
        }
    }
}

fn print_row(project: &Project) {
    let now = Utc::now();
    println!(
        "{}  {}  [{}] {}  {}  {}%",
        output::heading(&project.name),
        output::dim(project.id.as_str()),
        output::priority(project.priority(now)),
        output::project_status(project.status),
        project.deadline_label(now),
        project.progress,
    );
}

fn show(desk: &Proofroom, id: &ProjectId) -> Result<()> {
    let Some(project) = desk.projects().get(id)? else {
        bail!("project not found: {}", id);
    };
    let now = Utc::now();

    println!("{} ({})", output::heading(&project.name), project.id);
    println!("  Client:   {} <{}>", project.client, project.client_email);
    println!(
        "  Status:   {}  [{}]",
        output::project_status(project.status),
        output::priority(project.priority(now))
    );
    println!(
        "  Deadline: {} ({})",
        project.deadline.format("%Y-%m-%d"),
        project.deadline_label(now)
    );
    println!("  Progress: {}%", project.progress);

    let versions = desk.media().list(id)?;
    if versions.is_empty() {
        println!("  Media:    none uploaded");
    } else {
        println!("  Media:");
        for media in &versions {
            println!(
                "    v{}  {}  {}  {}",
                media.version,
                media.file_name,
                output::media_status(media.status),
                output::dim(&output::relative_time(media.uploaded_at, now)),
            );
        }
    }

    let comments = desk.comments().list(id, SortOrder::OldestFirst)?;
    println!("  Comments: {}", comments.len());
    println!(
        "  Unread notices: {}",
        desk.notifications().unread_count(id)?
    );
    Ok(())
}
