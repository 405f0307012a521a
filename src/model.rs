use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque task identifier, unique within a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Issues time-derived ids (epoch milliseconds).
///
/// Ids are strictly increasing per generator: when the clock has not moved
/// past the last issued value, the next id is `last + 1`.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: Option<i64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self, now: DateTime<Utc>) -> TaskId {
        let millis = now.timestamp_millis();
        let value = match self.last {
            Some(last) if millis <= last => last + 1,
            _ => millis,
        };
        self.last = Some(value);
        TaskId(value.to_string())
    }
}

/// A 1-5 rating used for importance and difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: Rating = Rating(1);
    pub const MAX: Rating = Rating(5);
    pub const DEFAULT: Rating = Rating(3);

    pub fn new(value: u8) -> Option<Self> {
        (1..=5).contains(&value).then_some(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn increment(self) -> Self {
        Self((self.0 + 1).min(Self::MAX.0))
    }

    pub fn decrement(self) -> Self {
        Self((self.0 - 1).max(Self::MIN.0))
    }

    pub fn importance_label(self) -> &'static str {
        match self.0 {
            1 => "Minimal",
            2 => "Low",
            3 => "Moderate",
            4 => "High",
            _ => "Critical",
        }
    }

    pub fn difficulty_label(self) -> &'static str {
        match self.0 {
            1 => "Very Easy",
            2 => "Easy",
            3 => "Moderate",
            4 => "Hard",
            _ => "Very Hard",
        }
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for Rating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::new(value).ok_or_else(|| format!("rating {value} is out of range: must be 1-5"))
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> u8 {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub completed: bool,
    pub due_date: Option<DateTime<Utc>>,
    pub importance: Rating,
    pub difficulty: Rating,
    /// Hours, fractional allowed.
    pub time_estimate: Option<f64>,
    pub description: Option<String>,
    /// Reserved for list grouping; never checked against a list.
    pub list_id: Option<String>,
    /// Reserved for hierarchical grouping; never set by current operations.
    pub parent: Option<TaskId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtasks: Vec<Task>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Checkbox marker for list output.
    pub fn checkbox(&self) -> &'static str {
        if self.completed {
            "[x]"
        } else {
            "[ ]"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn ids_follow_the_clock() {
        let mut ids = IdGenerator::new();
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        assert_eq!(ids.next_id(now).as_str(), "1700000000000");
        let later = Utc.timestamp_millis_opt(1_700_000_000_500).unwrap();
        assert_eq!(ids.next_id(later).as_str(), "1700000000500");
    }

    #[test]
    fn ids_stay_unique_within_one_millisecond() {
        let mut ids = IdGenerator::new();
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let a = ids.next_id(now);
        let b = ids.next_id(now);
        let c = ids.next_id(now);
        assert_eq!(a.as_str(), "1700000000000");
        assert_eq!(b.as_str(), "1700000000001");
        assert_eq!(c.as_str(), "1700000000002");
    }

    #[test]
    fn ids_never_go_backwards() {
        let mut ids = IdGenerator::new();
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let earlier = Utc.timestamp_millis_opt(1_600_000_000_000).unwrap();
        ids.next_id(now);
        assert_eq!(ids.next_id(earlier).as_str(), "1700000000001");
    }

    #[test]
    fn rating_bounds() {
        assert!(Rating::new(0).is_none());
        assert!(Rating::new(6).is_none());
        for v in 1..=5 {
            assert_eq!(Rating::new(v).map(Rating::get), Some(v));
        }
    }

    #[test]
    fn rating_steps_saturate() {
        assert_eq!(Rating::MAX.increment(), Rating::MAX);
        assert_eq!(Rating::MIN.decrement(), Rating::MIN);
        assert_eq!(Rating::DEFAULT.increment().get(), 4);
        assert_eq!(Rating::DEFAULT.decrement().get(), 2);
    }

    #[test]
    fn rating_rejects_out_of_range_json() {
        assert!(serde_json::from_str::<Rating>("4").is_ok());
        assert!(serde_json::from_str::<Rating>("9").is_err());
    }

    #[test]
    fn labels() {
        assert_eq!(Rating::MAX.importance_label(), "Critical");
        assert_eq!(Rating::MIN.difficulty_label(), "Very Easy");
    }
}
