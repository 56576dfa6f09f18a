pub mod paths;
pub mod tracing;
pub mod wiring;

pub use paths::AppPaths;
pub use wiring::build_app;
