// TaskMaster - dated task list with a persistent task store

pub mod config;
pub mod i18n;
pub mod models;
pub mod state;
pub mod storage;
pub mod store;
pub mod view;

// Re-export main types for convenience
pub use config::{Backend, Config};
pub use models::{Language, Task, TaskId};
pub use state::{StoreError, TaskState};
pub use storage::{FileStorage, MemoryStorage, SlotStorage, SqliteStorage};
pub use store::{DEFAULT_STORAGE_KEY, StoreEvent, SubscriptionId, TaskStore};
