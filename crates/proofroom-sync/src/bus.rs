use crate::event::{ChangeEvent, EntityKind};
use std::sync::Mutex;
use std::sync::mpsc::{Receiver, Sender, channel};

struct Subscriber {
    kind: Option<EntityKind>,
    tx: Sender<ChangeEvent>,
}

/// In-process fan-out for change events. One bus per wired store; every
/// mutating service call publishes here, and the refresh timer / remote feed
/// publish their backstop events into the same channel so consumers have a
/// single thing to listen to.
///
/// Event delivery wins over polling: a subscriber reacting to a mutation
/// event will usually have reloaded before the next poll tick fires for the
/// same change. The redundant tick is by contract a no-op re-render.
#[derive(Default)]
pub struct ChangeBus {
    subscribers: Mutex<Vec<Subscriber>>,
}

impl ChangeBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to every change event
    pub fn subscribe(&self) -> Receiver<ChangeEvent> {
        self.register(None)
    }

    /// Subscribe to changes of a single entity kind
    pub fn subscribe_to(&self, kind: EntityKind) -> Receiver<ChangeEvent> {
        self.register(Some(kind))
    }

    pub fn publish(&self, event: ChangeEvent) {
        self.subscribers.lock().unwrap().retain(|subscriber| {
            if let Some(kind) = subscriber.kind {
                if kind != event.kind {
                    return true;
                }
            }
            subscriber.tx.send(event.clone()).is_ok()
        });
    }

    fn register(&self, kind: Option<EntityKind>) -> Receiver<ChangeEvent> {
        let (tx, rx) = channel();
        self.subscribers.lock().unwrap().push(Subscriber { kind, tx });
        rx
    }
}
