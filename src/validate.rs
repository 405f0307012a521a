use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::model::{IdGenerator, Rating, Task};

/// Default estimate offered by the creation form, in hours.
pub const DEFAULT_TIME_ESTIMATE: f64 = 0.5;

/// Why raw form input was rejected. Nothing is created or stored on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Task name is required")]
    InvalidName,

    #[error("Deadline must be in the future")]
    InvalidDeadline,
}

/// Raw fields collected by the creation form.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskInput {
    pub name: String,
    pub description: String,
    /// `YYYY-MM-DD`, an RFC 3339 timestamp, or empty for no deadline.
    pub due_date: String,
    pub importance: Rating,
    pub difficulty: Rating,
    pub time_estimate: f64,
}

impl Default for TaskInput {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            due_date: String::new(),
            importance: Rating::DEFAULT,
            difficulty: Rating::DEFAULT,
            time_estimate: DEFAULT_TIME_ESTIMATE,
        }
    }
}

/// Validate a task name: must contain something other than whitespace.
/// Returns the trimmed name.
pub fn validate_name(name: &str) -> Result<&str, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidName);
    }
    Ok(trimmed)
}

/// Parse deadline text. A bare date means midnight UTC of that day.
pub fn parse_due_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0)?;
        return Some(Utc.from_utc_datetime(&midnight));
    }
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

/// Validate deadline text against `now`. Empty text means no deadline.
/// Unparseable text is rejected the same way as a past deadline.
pub fn validate_deadline(
    text: &str,
    now: DateTime<Utc>,
) -> Result<Option<DateTime<Utc>>, ValidationError> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    match parse_due_date(text) {
        Some(due) if due > now => Ok(Some(due)),
        _ => Err(ValidationError::InvalidDeadline),
    }
}

/// Sanitise the estimate field: anything that is not a finite,
/// non-negative number becomes zero.
pub fn parse_hours(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(v) => sanitize_hours(v),
        Err(_) => 0.0,
    }
}

fn sanitize_hours(value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        0.0
    }
}

/// Turns raw form input into tasks with fresh ids.
#[derive(Debug, Default)]
pub struct TaskFactory {
    ids: IdGenerator,
}

impl TaskFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, input: &TaskInput) -> Result<Task, ValidationError> {
        self.create_at(input, Utc::now())
    }

    /// Validate `input` as of `now` and build a task. Name is checked
    /// before the deadline.
    pub fn create_at(
        &mut self,
        input: &TaskInput,
        now: DateTime<Utc>,
    ) -> Result<Task, ValidationError> {
        let name = validate_name(&input.name)?;
        let due_date = validate_deadline(&input.due_date, now)?;

        let description = input.description.trim();
        Ok(Task {
            id: self.ids.next_id(now),
            name: name.to_string(),
            completed: false,
            due_date,
            importance: input.importance,
            difficulty: input.difficulty,
            time_estimate: Some(sanitize_hours(input.time_estimate)),
            description: (!description.is_empty()).then(|| description.to_string()),
            list_id: None,
            parent: None,
            subtasks: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }
}
