// Persisted layout for tasks and theme
//
// key `tasks` holds a JSON array of task objects, key `theme` holds a bare
// `light`/`dark` string.

use crate::models::{Task, Theme};
use eyre::{Context, Result};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, warn};

pub const TASKS_KEY: &str = "tasks";
pub const THEME_KEY: &str = "theme";

/// Serialize the whole collection
pub fn encode_tasks(tasks: &[Task]) -> Result<String> {
    serde_json::to_string(tasks).context("Failed to serialize tasks")
}

/// Parse a stored task list
///
/// Returns `None` if the value is not a JSON array or any element fails to
/// parse as a task, so a partly readable list is never rewritten without the
/// rest. Every element of a valid array is kept, in order.
pub fn decode_tasks(raw: &str) -> Option<Vec<Task>> {
    let items: Vec<Value> = match serde_json::from_str(raw) {
        Ok(Value::Array(items)) => items,
        Ok(other) => {
            warn!(kind = json_kind(&other), "Stored tasks are not a JSON array, ignoring");
            return None;
        }
        Err(e) => {
            warn!(error = ?e, "Failed to parse stored tasks, ignoring");
            return None;
        }
    };

    let mut seen = HashSet::new();
    let mut tasks = Vec::with_capacity(items.len());

    for (index, item) in items.into_iter().enumerate() {
        let task: Task = match serde_json::from_value(item) {
            Ok(t) => t,
            Err(e) => {
                warn!(index, error = ?e, "Failed to parse stored task, ignoring stored tasks");
                return None;
            }
        };

        if !seen.insert(task.id) {
            warn!(index, id = task.id, "Duplicate task id in storage");
        }

        tasks.push(task);
    }

    debug!(count = tasks.len(), "Decoded stored tasks");
    Some(tasks)
}

pub fn encode_theme(theme: Theme) -> &'static str {
    theme.as_str()
}

/// Parse a stored theme; unknown values yield `None`
pub fn decode_theme(raw: &str) -> Option<Theme> {
    match raw.trim().parse() {
        Ok(theme) => Some(theme),
        Err(e) => {
            warn!(value = raw, error = %e, "Unrecognized stored theme, ignoring");
            None
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tasks_round_trip_preserves_order() {
        let mut second = Task::new(20, "Second", "two");
        second.completed = true;
        let tasks = vec![Task::new(30, "First", "one"), second, Task::new(10, "Third", "three")];

        let raw = encode_tasks(&tasks).unwrap();
        let decoded = decode_tasks(&raw).unwrap();
        assert_eq!(decoded, tasks);
    }

    #[test]
    fn test_decode_browser_layout() {
        let raw = r#"[{"id":1700000000000,"title":"Buy milk","description":"2% milk, 1 gallon","completed":false}]"#;
        let tasks = decode_tasks(raw).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, 1_700_000_000_000);
        assert_eq!(tasks[0].description, "2% milk, 1 gallon");
    }

    #[test]
    fn test_decode_malformed_is_none() {
        assert!(decode_tasks("{malformed json}").is_none());
        assert!(decode_tasks("").is_none());
        assert!(decode_tasks(r#"{"id":1}"#).is_none());
        assert!(decode_tasks("null").is_none());
    }

    #[test]
    fn test_decode_bad_element_rejects_whole_list() {
        let raw = r#"[
            {"id":1,"title":"a","description":"a","completed":true},
            {"id":2,"title":"b","description":"b","completed":"yes"}
        ]"#;
        assert!(decode_tasks(raw).is_none());
        assert!(decode_tasks(r#"[{"id":"oops"}]"#).is_none());
    }

    #[test]
    fn test_decode_keeps_every_element() {
        let raw = r#"[
            {"id":1,"title":"a","description":"a","completed":true},
            {"id":1,"title":"dup","description":"dup","completed":false},
            {"id":2,"title":"b","description":"b"}
        ]"#;
        let tasks = decode_tasks(raw).unwrap();
        let titles: Vec<_> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "dup", "b"]);
        assert!(tasks[0].completed);
        assert!(!tasks[2].completed);
    }

    #[test]
    fn test_theme_codec() {
        assert_eq!(encode_theme(Theme::Dark), "dark");
        assert_eq!(decode_theme("dark"), Some(Theme::Dark));
        assert_eq!(decode_theme("light\n"), Some(Theme::Light));
        assert_eq!(decode_theme("\"dark\""), None);
        assert_eq!(decode_theme("sepia"), None);
    }
}
