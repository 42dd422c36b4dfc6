use crate::demo::demo_projects;
use anyhow::Result;
use proofroom_core::Error;
use proofroom_sdk::Proofroom;

pub fn handle(desk: &Proofroom, demo: bool) -> Result<()> {
    if let Some(dir) = desk.data_dir() {
        println!("Workspace ready at {}", dir.display());
    } else {
        println!("Workspace ready");
    }

    if demo {
        let registry = desk.projects();
        let mut seeded = 0;
        for project in demo_projects() {
            match registry.create(project) {
                Ok(_) => seeded += 1,
                // Re-running init --demo should not duplicate listings
                Err(Error::Validation(_)) => {}
                Err(err) => return Err(err.into()),
            }
        }
        println!("Seeded {} demo listings", seeded);
    }

    Ok(())
}
