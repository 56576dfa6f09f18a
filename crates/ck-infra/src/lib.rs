pub mod storage;
pub mod time;

pub use storage::{FileKeyValueStore, InMemoryKeyValueStore};
pub use time::SystemClock;
