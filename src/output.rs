use chrono::{DateTime, Utc};

use crate::model::Task;

/// Shown in place of the list when there are no tasks.
pub const EMPTY_LIST_MESSAGE: &str = "All done! \u{1f525}";

fn format_date(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

pub fn format_hours(hours: f64) -> String {
    format!("{hours}h")
}

pub fn format_task_line(task: &Task) -> String {
    let due = task
        .due_date
        .as_ref()
        .map(|d| format!("  (due {})", format_date(d)))
        .unwrap_or_default();
    format!("{} {}{}", task.checkbox(), task.name, due)
}

pub fn format_task_detail(task: &Task) -> String {
    let mut out = String::new();
    out.push_str(&format!("ID:          {}\n", task.id));
    out.push_str(&format!("Name:        {}\n", task.name));
    out.push_str(&format!(
        "Description: {}\n",
        task.description.as_deref().unwrap_or("No description")
    ));
    out.push_str(&format!("Completed:   {}\n", task.completed));
    match &task.due_date {
        Some(due) => out.push_str(&format!("Due:         {}\n", format_timestamp(due))),
        None => out.push_str("Due:         No due date\n"),
    }
    match task.time_estimate {
        Some(hours) => out.push_str(&format!("Estimate:    {}\n", format_hours(hours))),
        None => out.push_str("Estimate:    No estimate\n"),
    }
    out.push_str(&format!(
        "Importance:  {} ({})\n",
        task.importance,
        task.importance.importance_label()
    ));
    out.push_str(&format!(
        "Difficulty:  {} ({})\n",
        task.difficulty,
        task.difficulty.difficulty_label()
    ));
    out.push_str(&format!(
        "List:        {}\n",
        task.list_id.as_deref().unwrap_or("None")
    ));
    out.push_str(&format!(
        "Parent:      {}\n",
        task.parent.as_ref().map(|p| p.as_str()).unwrap_or("None")
    ));
    out.push_str(&format!("Created:     {}\n", format_timestamp(&task.created_at)));
    out.push_str(&format!("Updated:     {}\n", format_timestamp(&task.updated_at)));
    out
}

pub fn format_task_list(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return format!("{EMPTY_LIST_MESSAGE}\n");
    }
    let mut out = String::new();
    for task in tasks {
        out.push_str(&format_task_line(task));
        out.push('\n');
    }
    out
}
