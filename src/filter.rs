// View filtering for the task collection

use crate::models::Task;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Selects which tasks are visible; never changes the collection itself
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskFilter {
    #[default]
    All,
    Completed,
    Incomplete,
}

impl TaskFilter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Completed => task.completed,
            TaskFilter::Incomplete => !task.completed,
        }
    }

    /// Apply the filter to a slice, preserving order
    pub fn apply(self, tasks: &[Task]) -> Vec<&Task> {
        tasks.iter().filter(|t| self.matches(t)).collect()
    }
}

impl fmt::Display for TaskFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskFilter::All => write!(f, "all"),
            TaskFilter::Completed => write!(f, "completed"),
            TaskFilter::Incomplete => write!(f, "incomplete"),
        }
    }
}

impl FromStr for TaskFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(TaskFilter::All),
            "completed" => Ok(TaskFilter::Completed),
            "incomplete" => Ok(TaskFilter::Incomplete),
            other => Err(format!("unknown filter: {} (expected all, completed or incomplete)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Task> {
        let mut done = Task::new(2, "b", "b");
        done.completed = true;
        vec![Task::new(1, "a", "a"), done, Task::new(3, "c", "c")]
    }

    #[test]
    fn test_filter_all_keeps_everything() {
        let tasks = sample();
        let ids: Vec<_> = TaskFilter::All.apply(&tasks).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_filter_completed_and_incomplete() {
        let tasks = sample();
        let done: Vec<_> = TaskFilter::Completed.apply(&tasks).iter().map(|t| t.id).collect();
        let open: Vec<_> = TaskFilter::Incomplete.apply(&tasks).iter().map(|t| t.id).collect();
        assert_eq!(done, vec![2]);
        assert_eq!(open, vec![1, 3]);
    }

    #[test]
    fn test_filter_parse_and_display() {
        for filter in [TaskFilter::All, TaskFilter::Completed, TaskFilter::Incomplete] {
            assert_eq!(filter.to_string().parse::<TaskFilter>().unwrap(), filter);
        }
        assert!("done".parse::<TaskFilter>().is_err());
        assert_eq!(TaskFilter::default(), TaskFilter::All);
    }
}
