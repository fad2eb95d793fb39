// Query filtering over task sequences
//
// Every function here is pure: it borrows the sequence and returns the
// matching tasks in their original order.

use crate::models::{Category, Priority, Task, today};
use chrono::NaiveDate;
use std::fmt;
use tracing::debug;

/// A single criterion a task must satisfy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Priority(Priority),
    Category(Category),
    Completed(bool),
    /// Case-sensitive substring of title or description
    Search(String),
    /// Due strictly before the given date and not completed
    OverdueAsOf(NaiveDate),
}

impl Filter {
    /// Overdue relative to today's local date
    pub fn overdue() -> Self {
        Filter::OverdueAsOf(today())
    }

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Filter::Priority(p) => task.priority == *p,
            Filter::Category(c) => task.category == *c,
            Filter::Completed(done) => task.completed == *done,
            Filter::Search(query) => task.title.contains(query.as_str()) || task.description.contains(query.as_str()),
            Filter::OverdueAsOf(date) => !task.completed && task.due_date < *date,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Priority(p) => write!(f, "priority = {}", p),
            Filter::Category(c) => write!(f, "category = {}", c),
            Filter::Completed(done) => write!(f, "completed = {}", done),
            Filter::Search(query) => write!(f, "text contains {:?}", query),
            Filter::OverdueAsOf(date) => write!(f, "overdue as of {}", date),
        }
    }
}

/// Keep the tasks matching every filter; no filters keeps everything
pub fn apply_filters<'a>(tasks: &'a [Task], filters: &[Filter]) -> Vec<&'a Task> {
    let matched: Vec<&Task> = tasks
        .iter()
        .filter(|task| filters.iter().all(|f| f.matches(task)))
        .collect();
    debug!(
        total = tasks.len(),
        matched = matched.len(),
        filters = filters.len(),
        "apply_filters"
    );
    matched
}

fn select<'a>(tasks: &'a [Task], filter: Filter) -> Vec<&'a Task> {
    tasks.iter().filter(|task| filter.matches(task)).collect()
}

pub fn filter_by_priority(tasks: &[Task], priority: Priority) -> Vec<&Task> {
    select(tasks, Filter::Priority(priority))
}

pub fn filter_by_category(tasks: &[Task], category: Category) -> Vec<&Task> {
    select(tasks, Filter::Category(category))
}

pub fn filter_by_completion(tasks: &[Task], completed: bool) -> Vec<&Task> {
    select(tasks, Filter::Completed(completed))
}

/// Exact substring match on title or description; an empty query matches all tasks
pub fn search_tasks<'a>(tasks: &'a [Task], query: &str) -> Vec<&'a Task> {
    select(tasks, Filter::Search(query.to_string()))
}

/// Incomplete tasks due before today (local calendar date)
pub fn get_overdue_tasks(tasks: &[Task]) -> Vec<&Task> {
    overdue_as_of(tasks, today())
}

/// Incomplete tasks due strictly before `date`; a task due on `date` is not overdue
pub fn overdue_as_of(tasks: &[Task], date: NaiveDate) -> Vec<&Task> {
    select(tasks, Filter::OverdueAsOf(date))
}

/// Distinct categories present in the sequence, in first-seen order
pub fn categories_in_use(tasks: &[Task]) -> Vec<Category> {
    let mut seen = Vec::new();
    for task in tasks {
        if !seen.contains(&task.category) {
            seen.push(task.category);
        }
    }
    seen
}
