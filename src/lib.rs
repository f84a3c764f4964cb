// taskboard - Task list and theme state with best-effort key-value persistence

pub mod codec;
pub mod config;
pub mod error;
pub mod events;
pub mod filter;
pub mod ids;
pub mod kv;
pub mod models;
pub mod store;
pub mod theme;

// Re-export main types for convenience
pub use config::{Backend, Config};
pub use error::ValidationError;
pub use events::{SubscriptionId, TaskEvent, ThemeChanged};
pub use filter::TaskFilter;
pub use ids::IdGenerator;
pub use kv::{FileKv, KeyValueStore, MemoryKv, SqliteKv};
pub use models::{Task, TaskId, Theme, now_ms};
pub use store::TaskStore;
pub use theme::ThemeStore;
