// tasktrack - Personal task tracking over a flat JSON task file

pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod storage;
pub mod store;

// Re-export main types for convenience
pub use config::Config;
pub use error::{StoreError, StoreResult};
pub use filter::{
    Filter, apply_filters, categories_in_use, filter_by_category, filter_by_completion, filter_by_priority,
    get_overdue_tasks, overdue_as_of, search_tasks,
};
pub use models::{Category, NewTask, Priority, Task};
pub use storage::{DEFAULT_TASKS_FILE, load_tasks, save_tasks};
pub use store::{Store, add_task, delete_task, generate_unique_id, toggle_completed};
