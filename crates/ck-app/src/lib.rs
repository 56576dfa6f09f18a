//! ClipKeep application layer
//!
//! Use cases over the core ports: the history store, tag registry, settings,
//! browsing, import/export and clipboard capture.

mod app;
pub mod deps;
mod repo;
pub mod usecases;

#[cfg(test)]
mod testing;

pub use app::App;
pub use deps::AppDeps;
pub use usecases::*;
