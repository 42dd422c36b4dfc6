use anyhow::{Context, Result, bail};
use proofroom_sdk::Proofroom;
use proofroom_types::{MediaKind, ProjectId};
use std::path::Path;

const MAX_PHOTO_BYTES: u64 = 50 * 1024 * 1024;
const MAX_VIDEO_BYTES: u64 = 500 * 1024 * 1024;

const PHOTO_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "webp", "heic"];
const VIDEO_EXTENSIONS: [&str; 5] = ["mp4", "mov", "avi", "webm", "mkv"];

pub fn handle(
    desk: &Proofroom,
    kind: MediaKind,
    project: &str,
    file: &Path,
    notes: Option<&str>,
) -> Result<()> {
    let project = ProjectId::new(project);
    if desk.projects().get(&project)?.is_none() {
        bail!("project not found: {}", project);
    }

    validate(kind, file)?;

    let file_name = file
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("unusable file name: {}", file.display()))?;
    let locator = file
        .canonicalize()
        .with_context(|| format!("cannot resolve {}", file.display()))?;

    let media = desk.media().add_version(
        &project,
        kind,
        file_name,
        &locator.to_string_lossy(),
        notes,
    )?;

    println!(
        "Uploaded {} as version {} ({})",
        media.file_name, media.version, media.id
    );
    Ok(())
}

/// Boundary validation the core intentionally does not do: extension class
/// and the 50MB photo / 500MB video ceilings.
fn validate(kind: MediaKind, file: &Path) -> Result<()> {
    let extension = file
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let allowed: &[&str] = match kind {
        MediaKind::Photo => &PHOTO_EXTENSIONS,
        MediaKind::Video => &VIDEO_EXTENSIONS,
    };
    if !allowed.contains(&extension.as_str()) {
        bail!(
            "'{}' does not look like a {} file (expected one of: {})",
            file.display(),
            kind,
            allowed.join(", ")
        );
    }

    let size = std::fs::metadata(file)
        .with_context(|| format!("cannot read {}", file.display()))?
        .len();
    let ceiling = match kind {
        MediaKind::Photo => MAX_PHOTO_BYTES,
        MediaKind::Video => MAX_VIDEO_BYTES,
    };
    if size > ceiling {
        bail!(
            "{} is {:.1} MB, over the {} MB {} limit",
            file.display(),
            size as f64 / 1024.0 / 1024.0,
            ceiling / 1024 / 1024,
            kind
        );
    }

    Ok(())
}
