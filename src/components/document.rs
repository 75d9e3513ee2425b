use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Identifies one registered listener
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct ListenerId(u64);

/// The host document. Views register here to hear about visibility
/// changes and have to remove themselves again when they go away.
#[derive(Clone, Default)]
pub struct Document {
    listeners: Arc<Mutex<im::HashMap<ListenerId, flume::Sender<bool>>>>,
    next_id: Arc<AtomicU64>,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl Document {
    /// The listener receives `hidden` on every change
    pub fn add_visibility_listener(&self, listener: flume::Sender<bool>) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::SeqCst));
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.insert(id, listener);
        }
        id
    }

    pub fn remove_visibility_listener(&self, id: ListenerId) {
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.remove(&id);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().map(|l| l.len()).unwrap_or_default()
    }

    pub fn set_hidden(&self, hidden: bool) {
        let listeners = match self.listeners.lock() {
            Ok(listeners) => listeners.clone(),
            Err(_) => return,
        };
        for listener in listeners.values() {
            let _ = listener.send(hidden);
        }
    }
}
