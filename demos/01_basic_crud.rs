//! Example 01: Basic CRUD Operations
//!
//! This example demonstrates adding, completing, and deleting tasks with a
//! `Store`, and shows that every change is written to the task file.
//!
//! Run with: cargo run --example 01_basic_crud

use chrono::Days;
use eyre::Result;
use tasktrack::models::today;
use tasktrack::{Category, NewTask, Priority, Store, load_tasks};

fn main() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let path = temp_dir.path().join("tasks.json");

    println!("tasktrack Basic CRUD Example");
    println!("============================\n");

    // A missing file opens as an empty store
    let mut store = Store::open(&path)?;
    println!("Opened {:?} with {} tasks\n", store.path(), store.tasks().len());

    // Create
    println!("Adding tasks...");
    let report = store.add(NewTask {
        title: "Write report".to_string(),
        description: "Quarterly numbers".to_string(),
        priority: Priority::High,
        category: Category::Work,
        due_date: today().checked_add_days(Days::new(2)).unwrap_or_else(today),
    })?;
    let groceries = store.add(NewTask {
        title: "Buy groceries".to_string(),
        description: String::new(),
        priority: Priority::Low,
        category: Category::Personal,
        due_date: today(),
    })?;
    println!("  Added #{} {}", report.id, report.title);
    println!("  Added #{} {}\n", groceries.id, groceries.title);

    // Read
    if let Some(task) = store.get(report.id) {
        println!("Read #{}: {} (due {}, {})\n", task.id, task.title, task.due_date, task.priority);
    }

    // Update
    let completed = store.toggle(groceries.id)?;
    println!("Toggled #{} -> completed = {}\n", groceries.id, completed);

    // Delete
    let removed = store.delete(report.id)?;
    println!("Deleted #{} {}\n", removed.id, removed.title);

    // Every mutation was saved, so the file matches memory
    let on_disk = load_tasks(&path)?;
    println!("Task file now holds {} task(s):", on_disk.len());
    for task in &on_disk {
        println!("  - #{} {} (completed={})", task.id, task.title, task.completed);
    }
    println!("\nRaw file:\n{}", std::fs::read_to_string(&path)?);

    println!("Example complete!");
    Ok(())
}
