// Task store: ordered task collection plus view filter, mirrored to a key-value backend

use crate::codec::{self, TASKS_KEY};
use crate::error::ValidationError;
use crate::events::{SubscriptionId, Subscribers, TaskEvent};
use crate::filter::TaskFilter;
use crate::ids::IdGenerator;
use crate::kv::KeyValueStore;
use crate::models::{Task, TaskId};
use tracing::{debug, info, warn};

/// Task collection and active filter
///
/// Every mutating operation rewrites the whole collection under the `tasks`
/// key. Persistence failures are logged and otherwise ignored; the in-memory
/// state stays authoritative for the session.
pub struct TaskStore<K: KeyValueStore> {
    kv: K,
    tasks: Vec<Task>,
    filter: TaskFilter,
    ids: IdGenerator,
    subscribers: Subscribers<TaskEvent>,
}

impl<K: KeyValueStore> TaskStore<K> {
    /// Load the persisted collection from `kv`
    ///
    /// Missing, unreadable or malformed data starts an empty store.
    pub fn open(kv: K) -> Self {
        Self::open_with_ids(kv, IdGenerator::new())
    }

    pub fn open_with_ids(kv: K, mut ids: IdGenerator) -> Self {
        let tasks = match kv.get(TASKS_KEY) {
            Ok(Some(raw)) => codec::decode_tasks(&raw).unwrap_or_default(),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = ?e, "Failed to read stored tasks, starting empty");
                Vec::new()
            }
        };

        for task in &tasks {
            ids.observe(task.id);
        }

        info!(count = tasks.len(), "Opened task store");

        Self {
            kv,
            tasks,
            filter: TaskFilter::default(),
            ids,
            subscribers: Subscribers::new(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> TaskFilter {
        self.filter
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Append a new incomplete task
    ///
    /// Title and description must be non-empty after trimming; they are stored
    /// as given.
    pub fn add_task(&mut self, title: &str, description: &str) -> Result<TaskId, ValidationError> {
        ValidationError::check(title, description)?;

        let task = Task::new(self.ids.next(), title, description);
        let id = task.id;
        debug!(id, "add_task");

        self.tasks.push(task.clone());
        self.persist();
        self.subscribers.notify(&TaskEvent::Added(task));

        Ok(id)
    }

    /// Remove a task; returns false if no task had this id
    pub fn delete_task(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        let removed = self.tasks.len() != before;
        debug!(id, removed, "delete_task");

        self.persist();
        if removed {
            self.subscribers.notify(&TaskEvent::Deleted(id));
        }
        removed
    }

    /// Replace a task's description as given; returns false if no task had this id
    pub fn update_task(&mut self, id: TaskId, description: &str) -> bool {
        let updated = match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.description = description.to_string();
                true
            }
            None => false,
        };
        debug!(id, updated, "update_task");

        self.persist();
        if updated {
            self.subscribers.notify(&TaskEvent::Updated(id));
        }
        updated
    }

    /// Flip a task's completion flag; returns false if no task had this id
    pub fn toggle_completed(&mut self, id: TaskId) -> bool {
        let completed = self.tasks.iter_mut().find(|t| t.id == id).map(|task| {
            task.completed = !task.completed;
            task.completed
        });
        debug!(id, ?completed, "toggle_completed");

        self.persist();
        match completed {
            Some(completed) => {
                self.subscribers.notify(&TaskEvent::Toggled { id, completed });
                true
            }
            None => false,
        }
    }

    /// Change the view filter (not persisted)
    pub fn set_filter(&mut self, filter: TaskFilter) {
        if self.filter == filter {
            return;
        }
        debug!(%filter, "set_filter");
        self.filter = filter;
        self.subscribers.notify(&TaskEvent::FilterChanged(filter));
    }

    /// Tasks selected by the current filter, in collection order
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.filter.apply(&self.tasks)
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&TaskEvent) + Send + 'static,
    {
        self.subscribers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    fn persist(&mut self) {
        let raw = match codec::encode_tasks(&self.tasks) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = ?e, "Failed to encode tasks, not persisted");
                return;
            }
        };

        if let Err(e) = self.kv.set(TASKS_KEY, &raw) {
            warn!(error = ?e, "Failed to persist tasks");
        }
    }
}
