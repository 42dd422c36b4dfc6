use anyhow::Result;
use proofroom_sdk::Proofroom;
use proofroom_sync::{ChangeOrigin, EntityKind};

/// Stream change events until interrupted. Duplicate deliveries across the
/// event and poll paths are expected; each line is just an invitation to
/// reload.
pub fn handle(desk: &Proofroom, only: Option<EntityKind>) -> Result<()> {
    let mut builder = desk.watch();
    if let Some(kind) = only {
        builder = builder.only(kind);
    }
    let watch = builder.start()?;

    println!("Watching for changes (Ctrl-C to stop)");
    for event in watch.events().iter() {
        let origin = match event.origin {
            ChangeOrigin::Mutation => "event",
            ChangeOrigin::Poll => "poll",
            ChangeOrigin::Remote => "remote",
        };
        let subject = match &event.project_id {
            Some(id) => id.to_string(),
            None => "project list".to_string(),
        };
        println!("[{}] {:?} changed: {}", origin, event.kind, subject);
    }
    Ok(())
}
