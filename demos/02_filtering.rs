//! Example 02: Filtering and Searching
//!
//! This example demonstrates the pure query functions over a task sequence
//! and combining criteria with `Filter`.
//!
//! Run with: cargo run --example 02_filtering

use chrono::Days;
use eyre::Result;
use tasktrack::models::today;
use tasktrack::{
    Category, Filter, NewTask, Priority, Task, add_task, apply_filters, filter_by_category, filter_by_completion,
    filter_by_priority, get_overdue_tasks, search_tasks, toggle_completed,
};

fn show(label: &str, tasks: &[&Task]) {
    println!("{}", label);
    for task in tasks {
        println!(
            "   - #{} {} ({} | {} | due {})",
            task.id, task.title, task.priority, task.category, task.due_date
        );
    }
    println!("   Found: {} tasks\n", tasks.len());
}

fn main() -> Result<()> {
    println!("tasktrack Filtering Example");
    println!("===========================\n");

    let yesterday = today().checked_sub_days(Days::new(1)).unwrap_or_else(today);
    let mut tasks = Vec::new();
    for (title, description, priority, category, due_date) in [
        ("Fix critical bug", "Crash on startup", Priority::High, Category::Work, yesterday),
        ("Write documentation", "User guide", Priority::Medium, Category::Work, today()),
        ("Study for exam", "Chapters 3-5", Priority::High, Category::School, today()),
        ("Call plumber", "Kitchen sink", Priority::Low, Category::Personal, yesterday),
    ] {
        add_task(
            &mut tasks,
            NewTask {
                title: title.to_string(),
                description: description.to_string(),
                priority,
                category,
                due_date,
            },
        );
    }
    toggle_completed(&mut tasks, 4);

    show("1. Priority = High:", &filter_by_priority(&tasks, Priority::High));
    show("2. Category = Work:", &filter_by_category(&tasks, Category::Work));
    show("3. Completed:", &filter_by_completion(&tasks, true));
    show("4. Search \"exam\" (case-sensitive):", &search_tasks(&tasks, "exam"));
    show("5. Overdue:", &get_overdue_tasks(&tasks));

    // Criteria combine with AND
    let filters = vec![
        Filter::Category(Category::Work),
        Filter::Priority(Priority::High),
        Filter::Completed(false),
    ];
    let label = format!(
        "6. {}:",
        filters.iter().map(|f| f.to_string()).collect::<Vec<_>>().join(" AND ")
    );
    show(&label, &apply_filters(&tasks, &filters));

    println!("Example complete!");
    Ok(())
}
