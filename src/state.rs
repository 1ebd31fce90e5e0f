// Pure task state and its transitions (no storage)

use crate::models::{Language, Task, TaskId, is_valid_date, is_valid_time};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::warn;

/// Errors returned by mutating operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Complete store state, also the persisted snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskState {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub language: Language,
}

impl TaskState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a persisted snapshot
    ///
    /// Entries with an invalid date/time or a duplicate id are dropped so the
    /// returned state always satisfies the task invariants.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut state: TaskState = serde_json::from_str(json)?;
        state.discard_invalid();
        Ok(state)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    fn discard_invalid(&mut self) {
        let mut seen = HashSet::new();
        self.tasks.retain(|task| {
            if !task.is_well_formed() {
                warn!(id = %task.id, date = %task.date, time = ?task.time, "Skipping malformed task");
                return false;
            }
            if !seen.insert(task.id.clone()) {
                warn!(id = %task.id, "Skipping task with duplicate id");
                return false;
            }
            true
        });
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Append a new, incomplete task under the given id
    ///
    /// The id must not already be present; text is stored trimmed.
    pub fn add_task(&mut self, id: TaskId, text: &str, date: &str, time: Option<&str>) -> Result<&Task, StoreError> {
        let text = validate_text(text)?;
        if !is_valid_date(date) {
            return Err(StoreError::InvalidInput(format!("date must be YYYY-MM-DD: {:?}", date)));
        }
        if let Some(time) = time.filter(|t| !is_valid_time(t)) {
            return Err(StoreError::InvalidInput(format!("time must be HH:MM: {:?}", time)));
        }
        if self.contains(&id) {
            return Err(StoreError::InvalidInput(format!("duplicate task id: {}", id)));
        }

        self.tasks.push(Task {
            id,
            text: text.to_string(),
            completed: false,
            date: date.to_string(),
            time: time.map(str::to_string),
        });
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Flip completion; returns false if no task has this id
    pub fn toggle_task(&mut self, id: &str) -> bool {
        match self.get_mut(id) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        }
    }

    /// Remove a task; returns false if no task has this id
    pub fn delete_task(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Replace a task's text; returns Ok(false) if no task has this id
    pub fn edit_task(&mut self, id: &str, new_text: &str) -> Result<bool, StoreError> {
        let text = validate_text(new_text)?;
        match self.get_mut(id) {
            Some(task) => {
                task.text = text.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Returns true if the language actually changed
    pub fn set_language(&mut self, language: Language) -> bool {
        let changed = self.language != language;
        self.language = language;
        changed
    }

    /// Tasks due on `date`, in storage order
    pub fn tasks_for_date(&self, date: &str) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.date == date).collect()
    }
}

fn validate_text(text: &str) -> Result<&str, StoreError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(StoreError::InvalidInput("task text cannot be empty".to_string()));
    }
    Ok(trimmed)
}
