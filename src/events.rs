// Change notification for stores

use crate::filter::TaskFilter;
use crate::models::{Task, TaskId, Theme};

/// Handle returned by `subscribe`, used to unsubscribe later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Something that changed in a `TaskStore`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskEvent {
    Added(Task),
    Deleted(TaskId),
    Updated(TaskId),
    Toggled { id: TaskId, completed: bool },
    FilterChanged(TaskFilter),
}

/// Emitted by `ThemeStore` after a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeChanged(pub Theme);

type Listener<E> = Box<dyn FnMut(&E) + Send>;

/// Listener registry; listeners run in subscription order
pub struct Subscribers<E> {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener<E>)>,
}

impl<E> Subscribers<E> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&E) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the subscription was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    pub fn notify(&mut self, event: &E) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }
    }
}

impl<E> Default for Subscribers<E> {
    fn default() -> Self {
        Self::new()
    }
}
