//! Payload-free "changed" notification.
//!
//! Listeners are called synchronously in registration order. They carry no
//! data; a listener re-reads whatever engine state it needs. A listener must
//! not step the engine from inside the callback.

/// Handle returned by [`ChangeEmitter::add_listener`], used for removal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Default)]
pub struct ChangeEmitter {
    listeners: Vec<(ListenerId, Box<dyn FnMut()>)>,
    next_id: u64,
}

impl ChangeEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener
    pub fn add_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut() + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener, returns false if it was not registered
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn emit(&mut self) {
        for (_, listener) in self.listeners.iter_mut() {
            listener();
        }
    }
}

impl std::fmt::Debug for ChangeEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeEmitter")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
