// Task file operations

use crate::error::{StoreError, StoreResult};
use crate::models::Task;
use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Default task file, relative to the working directory
pub const DEFAULT_TASKS_FILE: &str = "tasks.json";

/// Read the full task sequence from a JSON file
///
/// A file that does not exist yields an empty sequence. A file that exists
/// but does not decode as an array of tasks is reported as corrupt rather
/// than treated as empty. Any other I/O failure is a read error.
pub fn load_tasks(path: &Path) -> StoreResult<Vec<Task>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            // File doesn't exist yet, nothing saved so far
            debug!(file = ?path, "Task file missing, starting empty");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let tasks: Vec<Task> = serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })?;

    check_ids(&tasks, path)?;

    info!(file = ?path, count = tasks.len(), "Loaded tasks");
    Ok(tasks)
}

/// Write the full task sequence, replacing the file atomically
///
/// The sequence is written to a temporary file next to `path`, flushed to
/// disk and renamed over the target, so a crash never leaves a half-written
/// task file behind.
pub fn save_tasks(tasks: &[Task], path: &Path) -> StoreResult<()> {
    check_ids(tasks, path)?;

    let write_err = |source: io::Error| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let json = serde_json::to_string_pretty(tasks).map_err(|e| write_err(e.into()))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(json.as_bytes()).map_err(write_err)?;
    tmp.write_all(b"\n").map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?; // Ensure data is flushed to disk
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    info!(file = ?path, count = tasks.len(), "Saved tasks");
    Ok(())
}

/// Ids must be positive and pairwise distinct
fn check_ids(tasks: &[Task], path: &Path) -> StoreResult<()> {
    let mut seen = HashSet::with_capacity(tasks.len());
    for task in tasks {
        if task.id == 0 {
            return Err(StoreError::InvalidId {
                path: path.to_path_buf(),
                id: task.id,
            });
        }
        if !seen.insert(task.id) {
            return Err(StoreError::DuplicateId {
                path: path.to_path_buf(),
                id: task.id,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Priority};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn sample_tasks() -> Vec<Task> {
        vec![
            Task {
                id: 1,
                title: "Task A".to_string(),
                description: "Alpha".to_string(),
                priority: Priority::High,
                category: Category::Work,
                due_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                completed: false,
                created_at: NaiveDate::from_ymd_opt(2024, 4, 20)
                    .unwrap()
                    .and_hms_opt(9, 30, 0),
            },
            Task {
                id: 2,
                title: "Task B".to_string(),
                description: String::new(),
                priority: Priority::Low,
                category: Category::Other,
                due_date: NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
                completed: true,
                created_at: None,
            },
        ]
    }

    #[test]
    fn test_save_and_load_tasks() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasks.json");

        let tasks = sample_tasks();
        save_tasks(&tasks, &path).unwrap();

        let loaded = load_tasks(&path).unwrap();
        assert_eq!(loaded, tasks);
    }

    #[test]
    fn test_load_tasks_missing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("non-existent.json");

        let tasks = load_tasks(&path).unwrap();
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_save_overwrites_existing_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasks.json");

        save_tasks(&sample_tasks(), &path).unwrap();
        save_tasks(&sample_tasks()[..1], &path).unwrap();

        let loaded = load_tasks(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, 1);
    }

    #[test]
    fn test_save_writes_json_array() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasks.json");

        save_tasks(&sample_tasks(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array[0]["due_date"], "2024-05-01");
        assert_eq!(array[0]["created_at"], "2024-04-20 09:30:00");
        assert_eq!(array[1]["priority"], "Low");

        // No temp files left next to the task file
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_load_malformed_json_is_corrupt() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasks.json");
        fs::write(&path, "{malformed json").unwrap();

        let err = load_tasks(&path).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[test]
    fn test_load_wrong_shape_is_corrupt() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasks.json");

        // Unknown priority value
        fs::write(
            &path,
            r#"[{"id":1,"title":"t","description":"","priority":"Urgent","category":"Work","due_date":"2024-01-01","completed":false}]"#,
        )
        .unwrap();
        assert!(matches!(load_tasks(&path), Err(StoreError::Corrupt { .. })));

        // Bad date format
        fs::write(
            &path,
            r#"[{"id":1,"title":"t","description":"","priority":"Low","category":"Work","due_date":"01/02/2024","completed":false}]"#,
        )
        .unwrap();
        assert!(matches!(load_tasks(&path), Err(StoreError::Corrupt { .. })));

        // Object instead of array
        fs::write(&path, r#"{"id":1}"#).unwrap();
        assert!(matches!(load_tasks(&path), Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn test_load_duplicate_ids_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasks.json");
        fs::write(
            &path,
            r#"[
  {"id":4,"title":"a","description":"","priority":"Low","category":"Work","due_date":"2024-01-01"},
  {"id":4,"title":"b","description":"","priority":"Low","category":"Work","due_date":"2024-01-02"}
]"#,
        )
        .unwrap();

        let err = load_tasks(&path).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId { id: 4, .. }));
    }

    #[test]
    fn test_save_duplicate_ids_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasks.json");

        let mut tasks = sample_tasks();
        tasks[1].id = 1;
        let err = save_tasks(&tasks, &path).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId { id: 1, .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_load_zero_id_is_corrupt() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasks.json");
        fs::write(
            &path,
            r#"[{"id":0,"title":"t","description":"","priority":"Low","category":"Work","due_date":"2024-01-01"}]"#,
        )
        .unwrap();

        assert!(matches!(load_tasks(&path), Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn test_save_zero_id_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasks.json");

        let mut tasks = sample_tasks();
        tasks[0].id = 0;
        let err = save_tasks(&tasks, &path).unwrap_err();
        assert!(matches!(err, StoreError::InvalidId { id: 0, .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_load_max_id_accepted() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasks.json");

        let mut tasks = sample_tasks();
        tasks[0].id = u64::MAX;
        save_tasks(&tasks, &path).unwrap();
        assert_eq!(load_tasks(&path).unwrap(), tasks);
    }

    #[test]
    fn test_load_unknown_field_is_corrupt() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasks.json");
        let content = r#"[{"id":1,"title":"t","description":"","priority":"Low","category":"Work","due_date":"2024-01-01","tags":["keep"]}]"#;
        fs::write(&path, content).unwrap();

        assert!(matches!(load_tasks(&path), Err(StoreError::Corrupt { .. })));
        // The file is left as it was
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn test_load_unreadable_path_is_read_error() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("not-a-dir");
        fs::write(&blocker, "plain file").unwrap();

        // A path beneath a regular file cannot be stat'ed, which is not "missing"
        let err = load_tasks(&blocker.join("tasks.json")).unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));

        let err = load_tasks(temp.path()).unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing").join("tasks.json");

        let err = save_tasks(&sample_tasks(), &path).unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
    }

    #[test]
    fn test_save_and_load_empty_sequence() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasks.json");

        save_tasks(&[], &path).unwrap();
        assert!(path.exists());
        assert!(load_tasks(&path).unwrap().is_empty());
    }
}
