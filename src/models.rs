// Data models for taskboard

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Task identifier (creation time in milliseconds, made unique by `IdGenerator`)
pub type TaskId = i64;

/// A user-created task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    pub fn new(id: TaskId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            completed: false,
        }
    }

    /// Creation time derived from the id, if it is a valid millisecond timestamp
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.id)
    }
}

/// Display theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme: {}", other)),
        }
    }
}

/// Helper function to get current timestamp in milliseconds
pub fn now_ms() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_ms() {
        let ts = now_ms();
        // Should be reasonable timestamp (after year 2020)
        assert!(ts > 1_600_000_000_000);
    }

    #[test]
    fn test_new_task_is_incomplete() {
        let task = Task::new(1, "Buy milk", "2% milk, 1 gallon");
        assert!(!task.completed);
        assert_eq!(task.title, "Buy milk");
    }

    #[test]
    fn test_task_serialization_layout() {
        let task = Task::new(42, "Title", "Desc");
        let json = serde_json::to_string(&task).unwrap();
        assert_eq!(json, r#"{"id":42,"title":"Title","description":"Desc","completed":false}"#);
    }

    #[test]
    fn test_created_at_from_id() {
        let task = Task::new(1_700_000_000_000, "t", "d");
        let created = task.created_at().unwrap();
        assert_eq!(created.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_theme_toggle_alternates() {
        let theme = Theme::default();
        assert_eq!(theme, Theme::Light);
        assert_eq!(theme.toggled(), Theme::Dark);
        assert_eq!(theme.toggled().toggled(), Theme::Light);
    }

    #[test]
    fn test_theme_parse_and_display() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!(Theme::Light.to_string(), "light");
        assert!("blue".parse::<Theme>().is_err());
    }
}
