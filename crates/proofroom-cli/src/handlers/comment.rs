use crate::args::CommentCommands;
use crate::output;
use anyhow::Result;
use chrono::Utc;
use proofroom_core::SortOrder;
use proofroom_sdk::Proofroom;
use proofroom_types::ProjectId;

pub fn handle(desk: &Proofroom, command: CommentCommands) -> Result<()> {
    match command {
        CommentCommands::Add {
            project,
            text,
            role,
            name,
        } => {
            let comment = desk.comments().post(
                &ProjectId::new(project),
                &text,
                role.into(),
                name.as_deref(),
            )?;
            match &comment.version {
                Some(version) => println!("Posted {} (on {})", comment.id, version),
                None => println!("Posted {}", comment.id),
            }
            Ok(())
        }
        CommentCommands::List {
            project,
            newest_first,
        } => {
            let order = if newest_first {
                SortOrder::NewestFirst
            } else {
                SortOrder::OldestFirst
            };
            let comments = desk.comments().list(&ProjectId::new(project), order)?;
            if comments.is_empty() {
                println!("No comments yet");
                return Ok(());
            }
            let now = Utc::now();
            for comment in &comments {
                println!(
                    "{} {} ({}, {}) [{}]",
                    output::dim(&comment.id),
                    output::heading(&comment.author_name),
                    comment.author,
                    output::dim(&output::relative_time(comment.timestamp, now)),
                    output::comment_status(comment.status),
                );
                println!("    {}", comment.text);
            }
            Ok(())
        }
        CommentCommands::Status {
            project,
            comment,
            status,
        } => {
            let updated =
                desk.comments()
                    .set_status(&ProjectId::new(project), &comment, status.into())?;
            println!(
                "{} is now {}",
                updated.id,
                output::comment_status(updated.status)
            );
            Ok(())
        }
    }
}
