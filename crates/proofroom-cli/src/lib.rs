pub mod args;
pub mod demo;
pub mod handlers;
pub mod output;

pub use args::{Cli, Commands};

use anyhow::Result;
use proofroom_sdk::{Proofroom, resolve_data_dir};

pub fn run(cli: Cli) -> Result<()> {
    let data_dir = resolve_data_dir(cli.path.as_deref())?;
    let desk = Proofroom::open(data_dir)?;

    match cli.command {
        Commands::Init { demo } => handlers::init::handle(&desk, demo),
        Commands::Project { command } => handlers::project::handle(&desk, command),
        Commands::Upload {
            kind,
            project,
            file,
            notes,
        } => handlers::upload::handle(&desk, kind.into(), &project, &file, notes.as_deref()),
        Commands::Review {
            project,
            decision,
            media,
            by,
        } => handlers::review::handle(&desk, &project, decision, media.as_deref(), by.as_deref()),
        Commands::Comment { command } => handlers::comment::handle(&desk, command),
        Commands::Notices { project, read } => handlers::notices::handle(&desk, &project, read),
        Commands::Watch { only } => handlers::watch::handle(&desk, only.map(Into::into)),
    }
}
