//! Checklist model for the todo widget.
//!
//! # Invariants
//! - Item titles are trimmed and never blank.
//! - Toggle and delete address items by ID; unknown IDs change nothing.

use crate::model::feed::ModelValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub due_date: Option<String>,
}

/// Titled checklist kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub title: String,
    items: Vec<TodoItem>,
}

impl TodoList {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
        }
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    /// Appends an open item; a blank due date is stored as `None`.
    ///
    /// # Errors
    /// - `EmptyField("title")` when the title is blank after trimming.
    pub fn add(
        &mut self,
        title: &str,
        due_date: Option<&str>,
    ) -> Result<&TodoItem, ModelValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ModelValidationError::EmptyField("title"));
        }

        let due_date = due_date
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        self.items.push(TodoItem {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            completed: false,
            due_date,
        });
        Ok(&self.items[self.items.len() - 1])
    }

    /// Flips completion for `id`. Returns whether an item matched.
    pub fn toggle(&mut self, id: &str) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.completed = !item.completed;
                true
            }
            None => false,
        }
    }

    /// Removes `id`. Returns whether an item matched.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    pub fn remaining(&self) -> usize {
        self.items.iter().filter(|item| !item.completed).count()
    }
}
