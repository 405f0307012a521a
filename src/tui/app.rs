use chrono::{DateTime, Utc};
use log::info;
use ratatui::widgets::ListState;

use crate::config::Config;
use crate::model::{Rating, Task};
use crate::store::TaskStore;
use crate::validate::{parse_hours, TaskFactory, TaskInput, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub title: String,
    pub subtitle: String,
}

/// Values a freshly opened creation form starts with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormDefaults {
    pub importance: Rating,
    pub difficulty: Rating,
    pub time_estimate: f64,
}

impl Default for FormDefaults {
    fn default() -> Self {
        let input = TaskInput::default();
        Self {
            importance: input.importance,
            difficulty: input.difficulty,
            time_estimate: input.time_estimate,
        }
    }
}

impl FormDefaults {
    pub fn from_config(config: &Config) -> Self {
        Self {
            importance: config.form.importance(),
            difficulty: config.form.difficulty(),
            time_estimate: config.form.time_estimate(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Description,
    Estimate,
    Deadline,
    Importance,
    Difficulty,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Name,
        FormField::Description,
        FormField::Estimate,
        FormField::Deadline,
        FormField::Importance,
        FormField::Difficulty,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Task Name:",
            FormField::Description => "Description:",
            FormField::Estimate => "Estimated Time (hours):",
            FormField::Deadline => "Deadline (YYYY-MM-DD):",
            FormField::Importance => "Importance:",
            FormField::Difficulty => "Difficulty:",
        }
    }

    pub fn is_rating(self) -> bool {
        matches!(self, FormField::Importance | FormField::Difficulty)
    }

    fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Description,
            FormField::Description => FormField::Estimate,
            FormField::Estimate => FormField::Deadline,
            FormField::Deadline => FormField::Importance,
            FormField::Importance => FormField::Difficulty,
            FormField::Difficulty => FormField::Name,
        }
    }

    fn prev(self) -> Self {
        match self {
            FormField::Name => FormField::Difficulty,
            FormField::Description => FormField::Name,
            FormField::Estimate => FormField::Description,
            FormField::Deadline => FormField::Estimate,
            FormField::Importance => FormField::Deadline,
            FormField::Difficulty => FormField::Importance,
        }
    }
}

/// The field a validation error is displayed under.
pub fn error_field(error: ValidationError) -> FormField {
    match error {
        ValidationError::InvalidName => FormField::Name,
        ValidationError::InvalidDeadline => FormField::Deadline,
    }
}

/// State of the "Create a new task" dialog.
pub struct TaskForm {
    pub name: String,
    pub description: String,
    pub estimate: String,
    pub deadline: String,
    pub importance: Rating,
    pub difficulty: Rating,
    pub focused: FormField,
    pub error: Option<ValidationError>,
}

impl TaskForm {
    pub fn new(defaults: FormDefaults) -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            estimate: defaults.time_estimate.to_string(),
            deadline: String::new(),
            importance: defaults.importance,
            difficulty: defaults.difficulty,
            focused: FormField::Name,
            error: None,
        }
    }

    /// Text buffer of the focused field; `None` on rating fields.
    fn focused_buf_mut(&mut self) -> Option<&mut String> {
        match self.focused {
            FormField::Name => Some(&mut self.name),
            FormField::Description => Some(&mut self.description),
            FormField::Estimate => Some(&mut self.estimate),
            FormField::Deadline => Some(&mut self.deadline),
            FormField::Importance | FormField::Difficulty => None,
        }
    }

    fn focused_rating_mut(&mut self) -> Option<&mut Rating> {
        match self.focused {
            FormField::Importance => Some(&mut self.importance),
            FormField::Difficulty => Some(&mut self.difficulty),
            _ => None,
        }
    }

    /// The error shown under `field`, if any.
    pub fn error_for(&self, field: FormField) -> Option<ValidationError> {
        self.error.filter(|e| error_field(*e) == field)
    }

    /// Editing the field an error points at dismisses the error.
    fn touch(&mut self) {
        if self.error_for(self.focused).is_some() {
            self.error = None;
        }
    }

    pub fn next_field(&mut self) {
        self.focused = self.focused.next();
    }

    pub fn prev_field(&mut self) {
        self.focused = self.focused.prev();
    }

    pub fn insert_char(&mut self, c: char) {
        if self.focused.is_rating() {
            match c {
                '1'..='5' => {
                    if let Some(v) = c.to_digit(10).and_then(|d| Rating::new(d as u8)) {
                        if let Some(r) = self.focused_rating_mut() {
                            *r = v;
                        }
                    }
                }
                '+' | 'l' => self.increment(),
                '-' | 'h' => self.decrement(),
                _ => {}
            }
            return;
        }
        if self.focused == FormField::Estimate && !(c.is_ascii_digit() || c == '.') {
            return;
        }
        if let Some(buf) = self.focused_buf_mut() {
            buf.push(c);
        }
        self.touch();
    }

    pub fn backspace(&mut self) {
        if let Some(buf) = self.focused_buf_mut() {
            buf.pop();
        }
        self.touch();
    }

    pub fn clear_field(&mut self) {
        if let Some(buf) = self.focused_buf_mut() {
            buf.clear();
        }
        self.touch();
    }

    pub fn increment(&mut self) {
        if let Some(r) = self.focused_rating_mut() {
            *r = r.increment();
        }
    }

    pub fn decrement(&mut self) {
        if let Some(r) = self.focused_rating_mut() {
            *r = r.decrement();
        }
    }

    pub fn to_input(&self) -> TaskInput {
        TaskInput {
            name: self.name.clone(),
            description: self.description.clone(),
            due_date: self.deadline.clone(),
            importance: self.importance,
            difficulty: self.difficulty,
            time_estimate: parse_hours(&self.estimate),
        }
    }
}

pub struct App {
    pub store: TaskStore,
    factory: TaskFactory,
    pub header: Header,
    defaults: FormDefaults,
    pub cursor: usize,
    pub list_state: ListState,
    pub show_detail: bool,
    pub show_help: bool,
    pub add_form: Option<TaskForm>,
}

impl App {
    pub fn new(store: TaskStore, header: Header, defaults: FormDefaults) -> Self {
        let mut app = App {
            store,
            factory: TaskFactory::new(),
            header,
            defaults,
            cursor: 0,
            list_state: ListState::default(),
            show_detail: false,
            show_help: false,
            add_form: None,
        };
        app.clamp_cursor();
        app
    }

    pub fn into_store(self) -> TaskStore {
        self.store
    }

    pub fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.list_state.select(Some(self.cursor));
        }
    }

    pub fn move_down(&mut self) {
        if !self.store.is_empty() && self.cursor < self.store.len() - 1 {
            self.cursor += 1;
            self.list_state.select(Some(self.cursor));
        }
    }

    /// Clamp cursor after the list changes.
    fn clamp_cursor(&mut self) {
        if self.store.is_empty() {
            self.cursor = 0;
            self.list_state.select(None);
        } else {
            if self.cursor >= self.store.len() {
                self.cursor = self.store.len() - 1;
            }
            self.list_state.select(Some(self.cursor));
        }
    }

    pub fn selected(&self) -> Option<&Task> {
        self.store.list().get(self.cursor)
    }

    pub fn toggle_selected(&mut self) {
        let Some(id) = self.selected().map(|t| t.id.clone()) else {
            return;
        };
        self.store.toggle_completion(id.as_str());
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn enter_add_mode(&mut self) {
        self.add_form = Some(TaskForm::new(self.defaults));
    }

    pub fn cancel_add_mode(&mut self) {
        self.add_form = None;
    }

    pub fn submit_add(&mut self) {
        self.submit_add_at(Utc::now());
    }

    /// Validate the open form as of `now`. On success the task is stored
    /// and the dialog closes; on failure the dialog stays open with the
    /// error attached and the store is untouched.
    pub fn submit_add_at(&mut self, now: DateTime<Utc>) {
        let Some(form) = self.add_form.as_mut() else {
            return;
        };
        match self.factory.create_at(&form.to_input(), now) {
            Ok(task) => {
                info!("task added: {} ({})", task.name, task.id);
                self.store.add(task);
                self.add_form = None;
                self.clamp_cursor();
            }
            Err(e) => {
                info!("task rejected: {e}");
                form.error = Some(e);
                form.focused = error_field(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
    }

    fn app() -> App {
        App::new(
            TaskStore::new(),
            Header {
                title: "t".into(),
                subtitle: "s".into(),
            },
            FormDefaults::default(),
        )
    }

    fn type_str(form: &mut TaskForm, s: &str) {
        for c in s.chars() {
            form.insert_char(c);
        }
    }

    fn add(app: &mut App, name: &str) {
        app.enter_add_mode();
        type_str(app.add_form.as_mut().unwrap(), name);
        app.submit_add_at(now());
    }

    #[test]
    fn form_starts_from_defaults() {
        let form = TaskForm::new(FormDefaults::default());
        assert_eq!(form.estimate, "0.5");
        assert_eq!(form.importance, Rating::DEFAULT);
        assert_eq!(form.difficulty, Rating::DEFAULT);
        assert_eq!(form.focused, FormField::Name);
    }

    #[test]
    fn field_cycle_wraps() {
        let mut form = TaskForm::new(FormDefaults::default());
        for _ in 0..FormField::ALL.len() {
            form.next_field();
        }
        assert_eq!(form.focused, FormField::Name);
        form.prev_field();
        assert_eq!(form.focused, FormField::Difficulty);
    }

    #[test]
    fn estimate_field_only_takes_numbers() {
        let mut form = TaskForm::new(FormDefaults::default());
        form.focused = FormField::Estimate;
        form.clear_field();
        type_str(&mut form, "1a.5x");
        assert_eq!(form.estimate, "1.5");
        assert_eq!(form.to_input().time_estimate, 1.5);
    }

    #[test]
    fn rating_keys() {
        let mut form = TaskForm::new(FormDefaults::default());
        form.focused = FormField::Importance;
        form.insert_char('5');
        assert_eq!(form.importance.get(), 5);
        form.increment();
        assert_eq!(form.importance.get(), 5);
        form.insert_char('-');
        form.insert_char('h');
        assert_eq!(form.importance.get(), 3);
        form.insert_char('9');
        assert_eq!(form.importance.get(), 3);
        form.next_field();
        form.decrement();
        assert_eq!(form.difficulty.get(), 2);
    }

    #[test]
    fn submit_adds_and_closes() {
        let mut app = app();
        add(&mut app, "Buy milk");
        assert!(app.add_form.is_none());
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.store.list()[0].name, "Buy milk");
        assert_eq!(app.store.list()[0].time_estimate, Some(0.5));
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn empty_name_keeps_form_open() {
        let mut app = app();
        add(&mut app, "   ");
        let form = app.add_form.as_ref().unwrap();
        assert_eq!(form.error, Some(ValidationError::InvalidName));
        assert_eq!(form.error_for(FormField::Name), Some(ValidationError::InvalidName));
        assert_eq!(form.error_for(FormField::Deadline), None);
        assert!(app.store.is_empty());
    }

    #[test]
    fn past_deadline_focuses_deadline() {
        let mut app = app();
        app.enter_add_mode();
        let form = app.add_form.as_mut().unwrap();
        type_str(form, "Buy milk");
        form.focused = FormField::Deadline;
        type_str(form, "2026-05-31");
        app.submit_add_at(now());

        let form = app.add_form.as_mut().unwrap();
        assert_eq!(form.error, Some(ValidationError::InvalidDeadline));
        assert_eq!(form.focused, FormField::Deadline);
        assert!(app.store.is_empty());

        // Editing the deadline dismisses its error.
        form.backspace();
        assert!(form.error.is_none());
    }

    #[test]
    fn editing_other_field_keeps_error() {
        let mut app = app();
        add(&mut app, "");
        let form = app.add_form.as_mut().unwrap();
        form.focused = FormField::Description;
        form.insert_char('x');
        assert_eq!(form.error, Some(ValidationError::InvalidName));
    }

    #[test]
    fn retry_after_rejection_succeeds() {
        let mut app = app();
        add(&mut app, "");
        type_str(app.add_form.as_mut().unwrap(), "Call mom");
        app.submit_add_at(now());
        assert!(app.add_form.is_none());
        assert_eq!(app.store.len(), 1);
    }

    #[test]
    fn reopened_form_is_reset() {
        let mut app = app();
        add(&mut app, "first");
        app.enter_add_mode();
        assert!(app.add_form.as_ref().unwrap().name.is_empty());
    }

    #[test]
    fn toggle_selected_task() {
        let mut app = app();
        add(&mut app, "a");
        add(&mut app, "b");
        app.move_down();
        app.toggle_selected();
        assert!(!app.store.list()[0].completed);
        assert!(app.store.list()[1].completed);
        app.toggle_selected();
        assert!(!app.store.list()[1].completed);
    }

    #[test]
    fn toggle_on_empty_list_is_noop() {
        let mut app = app();
        app.toggle_selected();
        assert!(app.store.is_empty());
        assert!(app.selected().is_none());
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut app = app();
        app.move_down();
        assert_eq!(app.cursor, 0);
        add(&mut app, "a");
        add(&mut app, "b");
        app.move_down();
        app.move_down();
        assert_eq!(app.cursor, 1);
        app.move_up();
        app.move_up();
        assert_eq!(app.cursor, 0);
    }
}
