pub mod bus;
pub mod event;
pub mod poller;
pub mod remote;

pub use bus::ChangeBus;
pub use event::{ChangeEvent, ChangeOrigin, EntityKind};
pub use poller::{PollIntervals, RefreshTimer};
pub use remote::RemoteFeed;
