//! Callback Module - Per-Copy Observer Set
//!
//! External observers (statistics dashboards, event streams, offline
//! animation) can register to be notified synchronously every time the
//! collector relocates an object. Callbacks must not allocate through
//! the collector or mutate the object graph; nothing in this module
//! enforces that, it is a documented contract the host must honor.

use crate::address::Address;
use crate::collector::Generation;

pub type CallbackId = usize;

/// The event delivered to a registered copy callback.
#[derive(Debug, Clone, Copy)]
pub struct CopyEvent {
    pub size: usize,
    pub src: Address,
    pub dest: Address,
    pub src_gen: Generation,
    pub dest_gen: Generation,
}

/// A registry of copy callbacks, keyed by an opaque id handed back from
/// [`CallbackSet::add`].
#[derive(Default)]
pub struct CallbackSet {
    next_id: CallbackId,
    callbacks: Vec<(CallbackId, Box<dyn FnMut(&CopyEvent)>)>,
}

impl CallbackSet {
    pub fn new() -> Self {
        CallbackSet {
            next_id: 0,
            callbacks: Vec::new(),
        }
    }

    pub fn add(&mut self, callback: impl FnMut(&CopyEvent) + 'static) -> CallbackId {
        let id = self.next_id;
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Returns whether an entry with `id` was present and removed.
    pub fn remove(&mut self, id: CallbackId) -> bool {
        match self.callbacks.iter().position(|(cid, _)| *cid == id) {
            Some(pos) => {
                self.callbacks.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Invoke every registered callback with `event`, in registration
    /// order.
    pub fn notify(&mut self, event: &CopyEvent) {
        for (_, callback) in &mut self.callbacks {
            callback(event);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }
}
