//! Port interfaces for the application layer
//!
//! Ports define the contract between the use cases and the infrastructure
//! that backs them (key-value storage, wall clock, system clipboard).

mod clipboard;
mod clock;
pub mod kv_store;

pub use clipboard::SystemClipboardPort;
pub use clock::ClockPort;
pub use kv_store::KeyValueStorePort;
