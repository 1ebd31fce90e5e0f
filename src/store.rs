// Task store: task state + automatic persistence + change notification

use crate::models::{Language, Task, TaskId};
use crate::state::{StoreError, TaskState};
use crate::storage::SlotStorage;
use crate::view;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Slot key the store saves under unless told otherwise
pub const DEFAULT_STORAGE_KEY: &str = "todo-storage";

/// Something observable happened to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    TaskAdded { id: TaskId },
    TaskToggled { id: TaskId, completed: bool },
    TaskEdited { id: TaskId },
    TaskDeleted { id: TaskId },
    LanguageChanged { language: Language },
    /// The in-memory change stands, but was not saved
    PersistFailed { error: String },
}

/// Handle returned by `subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&StoreEvent)>;

/// Authoritative holder of tasks and the language preference
///
/// Every state-changing operation writes a full snapshot to `storage` under
/// `key`. A failed write never fails the operation; see `last_persist_error`.
/// If the snapshot could not be read at open, writes are skipped for the
/// lifetime of the store so the unread data is never overwritten.
pub struct TaskStore<S: SlotStorage> {
    state: TaskState,
    storage: S,
    key: String,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
    last_persist_error: Option<String>,
    read_only: bool,
}

impl<S: SlotStorage> TaskStore<S> {
    /// Open the store, rehydrating from the default slot if it holds a snapshot
    pub fn open(storage: S) -> Self {
        Self::open_with_key(storage, DEFAULT_STORAGE_KEY)
    }

    /// Open the store against a specific slot key
    ///
    /// A missing or malformed snapshot yields the default state. An unreadable
    /// one also yields the default state, but the store then keeps changes in
    /// memory only.
    pub fn open_with_key(storage: S, key: &str) -> Self {
        let mut load_error = None;
        let state = match storage.load(key) {
            Ok(Some(json)) => match TaskState::from_json(&json) {
                Ok(state) => {
                    info!(key, tasks = state.tasks.len(), language = %state.language, "Restored task store");
                    state
                }
                Err(e) => {
                    warn!(key, error = %e, "Persisted snapshot is malformed, starting empty");
                    TaskState::default()
                }
            },
            Ok(None) => {
                debug!(key, "No persisted snapshot, starting empty");
                TaskState::default()
            }
            Err(e) => {
                let error = format!("{:#}", e);
                warn!(key, error = %error, "Failed to read persisted snapshot; starting empty without saving");
                load_error = Some(format!("snapshot could not be read, saving disabled: {}", error));
                TaskState::default()
            }
        };

        Self {
            state,
            storage,
            key: key.to_string(),
            subscribers: Vec::new(),
            next_subscription: 0,
            read_only: load_error.is_some(),
            last_persist_error: load_error,
        }
    }

    // ========================================================================
    // Reads
    // ========================================================================

    pub fn tasks(&self) -> &[Task] {
        &self.state.tasks
    }

    pub fn language(&self) -> Language {
        self.state.language
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.state.get(id)
    }

    pub fn snapshot(&self) -> &TaskState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Tasks due on `date`, in storage order
    pub fn tasks_for_date(&self, date: &str) -> Vec<&Task> {
        self.state.tasks_for_date(date)
    }

    /// Tasks due on `date`, ordered for display
    pub fn day_view(&self, date: &str) -> Vec<&Task> {
        view::sorted_for_display(self.tasks_for_date(date))
    }

    /// Error from the most recent save, cleared by the next successful one
    pub fn last_persist_error(&self) -> Option<&str> {
        self.last_persist_error.as_deref()
    }

    /// True when the snapshot could not be read at open and nothing will be saved
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Create a task and return its id
    pub fn add_task(&mut self, text: &str, date: &str, time: Option<&str>) -> Result<TaskId, StoreError> {
        let id = self.generate_id();
        self.state.add_task(id.clone(), text, date, time)?;
        debug!(id = %id, date, time = ?time, "Added task");

        self.persist();
        self.emit(StoreEvent::TaskAdded { id: id.clone() });
        Ok(id)
    }

    /// Flip completion. Unknown ids are ignored; returns whether a task changed.
    pub fn toggle_task(&mut self, id: &str) -> bool {
        if !self.state.toggle_task(id) {
            debug!(id, "toggle_task: no such task");
            return false;
        }
        let completed = self.state.get(id).is_some_and(|t| t.completed);

        self.persist();
        self.emit(StoreEvent::TaskToggled {
            id: id.to_string(),
            completed,
        });
        true
    }

    /// Remove a task. Unknown ids are ignored; returns whether a task was removed.
    pub fn delete_task(&mut self, id: &str) -> bool {
        if !self.state.delete_task(id) {
            debug!(id, "delete_task: no such task");
            return false;
        }

        self.persist();
        self.emit(StoreEvent::TaskDeleted { id: id.to_string() });
        true
    }

    /// Replace a task's text. Unknown ids are ignored (`Ok(false)`).
    pub fn edit_task(&mut self, id: &str, new_text: &str) -> Result<bool, StoreError> {
        if !self.state.edit_task(id, new_text)? {
            debug!(id, "edit_task: no such task");
            return Ok(false);
        }

        self.persist();
        self.emit(StoreEvent::TaskEdited { id: id.to_string() });
        Ok(true)
    }

    pub fn set_language(&mut self, language: Language) {
        if !self.state.set_language(language) {
            return;
        }

        self.persist();
        self.emit(StoreEvent::LanguageChanged { language });
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    /// Call `callback` after every observable change
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Returns false if the subscription was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn generate_id(&self) -> TaskId {
        loop {
            let id = Uuid::now_v7().to_string();
            if !self.state.contains(&id) {
                return id;
            }
        }
    }

    fn emit(&mut self, event: StoreEvent) {
        for (_, callback) in self.subscribers.iter_mut() {
            callback(&event);
        }
    }

    fn persist(&mut self) {
        if self.read_only {
            let error = self
                .last_persist_error
                .clone()
                .unwrap_or_else(|| "saving disabled".to_string());
            debug!(key = %self.key, "Store is read-only, skipping save");
            self.emit(StoreEvent::PersistFailed { error });
            return;
        }

        let result = self
            .state
            .to_json()
            .map_err(eyre::Report::from)
            .and_then(|json| self.storage.save(&self.key, &json));

        match result {
            Ok(()) => {
                self.last_persist_error = None;
            }
            Err(e) => {
                let error = format!("{:#}", e);
                warn!(key = %self.key, error = %error, "Failed to persist task store; changes kept in memory only");
                self.last_persist_error = Some(error.clone());
                self.emit(StoreEvent::PersistFailed { error });
            }
        }
    }
}
