//! Session-scoped, in-memory task collection.
//!
//! The store is an owned value handed to whoever renders it; there is no
//! global instance and nothing is written to disk.

use log::debug;

use crate::model::Task;

#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task. Ids are not deduplicated; the factory guarantees them.
    pub fn add(&mut self, task: Task) {
        debug!("store: add {} ({})", task.id, task.name);
        self.tasks.push(task);
    }

    /// Flip `completed` on the task with `id`. Returns whether one matched;
    /// an unknown id leaves the store untouched. `updated_at` is not refreshed.
    pub fn toggle_completion(&mut self, id: &str) -> bool {
        match self.tasks.iter_mut().find(|t| t.id.as_str() == id) {
            Some(task) => {
                task.completed = !task.completed;
                debug!("store: {} completed={}", task.id, task.completed);
                true
            }
            None => {
                debug!("store: toggle for unknown id {id} ignored");
                false
            }
        }
    }

    /// Tasks in insertion order.
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }
}
