// Task sequence operations and the session store

use crate::error::{StoreError, StoreResult};
use crate::filter::{Filter, apply_filters};
use crate::models::{NewTask, Task};
use crate::storage;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Next id for a task sequence: one past the largest id, or 1 when empty
///
/// Ids freed by deletion are never handed out again, unless the largest id
/// is `u64::MAX`; then the smallest positive id not in use is returned.
pub fn generate_unique_id(tasks: &[Task]) -> u64 {
    match tasks.iter().map(|t| t.id).max() {
        None => 1,
        Some(max) => max.checked_add(1).unwrap_or_else(|| lowest_free_id(tasks)),
    }
}

fn lowest_free_id(tasks: &[Task]) -> u64 {
    let taken: HashSet<u64> = tasks.iter().map(|t| t.id).collect();
    // A slice cannot hold u64::MAX distinct ids, so one of these is free
    (1..=u64::MAX).find(|id| !taken.contains(id)).unwrap_or(1)
}

/// Append a new task with a fresh id and return it
pub fn add_task(tasks: &mut Vec<Task>, new: NewTask) -> &Task {
    let id = generate_unique_id(tasks);
    tasks.push(new.into_task(id));
    debug!(id, "add_task");
    &tasks[tasks.len() - 1]
}

/// Flip the completion flag of a task, returning the new value
pub fn toggle_completed(tasks: &mut [Task], id: u64) -> Option<bool> {
    let task = tasks.iter_mut().find(|t| t.id == id)?;
    task.completed = !task.completed;
    debug!(id, completed = task.completed, "toggle_completed");
    Some(task.completed)
}

/// Remove a task, returning it
pub fn delete_task(tasks: &mut Vec<Task>, id: u64) -> Option<Task> {
    let index = tasks.iter().position(|t| t.id == id)?;
    debug!(id, "delete_task");
    Some(tasks.remove(index))
}

/// A task file opened for one session
///
/// The full sequence is read on open and written back after every
/// mutation. Nothing is cached between sessions.
pub struct Store {
    path: PathBuf,
    tasks: Vec<Task>,
}

impl Store {
    /// Load the task file at `path`; a missing file opens as an empty store
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let tasks = storage::load_tasks(&path)?;
        info!(file = ?path, count = tasks.len(), "Opened task store");
        Ok(Self { path, tasks })
    }

    /// Path of the backing task file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks matching every filter, in stored order
    pub fn list(&self, filters: &[Filter]) -> Vec<&Task> {
        apply_filters(&self.tasks, filters)
    }

    /// Create a task and save the sequence
    pub fn add(&mut self, new: NewTask) -> StoreResult<Task> {
        let task = add_task(&mut self.tasks, new).clone();
        if let Err(e) = self.save() {
            // Keep memory in step with the file
            self.tasks.pop();
            return Err(e);
        }
        info!(id = task.id, title = %task.title, "Added task");
        Ok(task)
    }

    /// Flip completion of a task and save; returns the new completion state
    pub fn toggle(&mut self, id: u64) -> StoreResult<bool> {
        let Some(completed) = toggle_completed(&mut self.tasks, id) else {
            warn!(id, "Toggle of unknown task");
            return Err(StoreError::NotFound(id));
        };
        if let Err(e) = self.save() {
            toggle_completed(&mut self.tasks, id);
            return Err(e);
        }
        info!(id, completed, "Toggled task");
        Ok(completed)
    }

    /// Delete a task and save; returns the removed task
    pub fn delete(&mut self, id: u64) -> StoreResult<Task> {
        let Some(index) = self.tasks.iter().position(|t| t.id == id) else {
            warn!(id, "Delete of unknown task");
            return Err(StoreError::NotFound(id));
        };
        let removed = self.tasks.remove(index);
        if let Err(e) = self.save() {
            self.tasks.insert(index, removed);
            return Err(e);
        }
        info!(id, "Deleted task");
        Ok(removed)
    }

    /// Re-read the task file, discarding in-memory state
    pub fn reload(&mut self) -> StoreResult<()> {
        self.tasks = storage::load_tasks(&self.path)?;
        Ok(())
    }

    fn save(&self) -> StoreResult<()> {
        storage::save_tasks(&self.tasks, &self.path)
    }
}
