use crate::bus::ChangeBus;
use crate::event::{ChangeEvent, ChangeOrigin, EntityKind};
use anyhow::Result;
use proofroom_store::{RemoteBackend, namespaces};
use proofroom_types::ProjectId;
use std::sync::Arc;
use std::thread::JoinHandle;

/// Pump from a remote backend's push subscription into the change bus.
/// Notices for this process's own writes come through too; there is no
/// de-duplication against the mutation path, consumers reload state either
/// way. The pump thread ends when the backend drops its sender side.
pub struct RemoteFeed {
    _handle: JoinHandle<()>,
}

impl RemoteFeed {
    pub fn start(remote: &Arc<dyn RemoteBackend>, bus: Arc<ChangeBus>) -> Result<Self> {
        let rx = remote.subscribe();
        let handle = std::thread::Builder::new()
            .name("proofroom-remote-feed".to_string())
            .spawn(move || {
                for change in rx.iter() {
                    let Some(kind) = EntityKind::from_namespace(&change.namespace) else {
                        tracing::debug!(namespace = %change.namespace, "ignoring notice for unknown namespace");
                        continue;
                    };
                    let project_id =
                        if kind == EntityKind::Project && change.key == namespaces::GLOBAL_KEY {
                            None
                        } else {
                            Some(ProjectId::new(change.key.as_str()))
                        };
                    bus.publish(ChangeEvent {
                        kind,
                        project_id,
                        origin: ChangeOrigin::Remote,
                    });
                }
            })?;

        Ok(Self { _handle: handle })
    }
}
