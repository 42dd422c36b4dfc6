pub mod comments;
pub mod error;
pub mod media;
pub mod notifications;
pub mod registry;

pub use comments::{CommentThread, SortOrder};
pub use error::{Error, Result};
pub use media::MediaLibrary;
pub use notifications::NotificationFeed;
pub use registry::{NewProject, ProjectPatch, ProjectRegistry};
