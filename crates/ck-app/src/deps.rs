//! # Application Dependencies
//!
//! Plain parameter grouping for [`App`](crate::App) construction: no build
//! steps, no defaults, no hidden logic.

use std::sync::Arc;

use ck_core::ports::{ClockPort, KeyValueStorePort, SystemClipboardPort};

pub struct AppDeps {
    pub store: Arc<dyn KeyValueStorePort>,
    pub clock: Arc<dyn ClockPort>,
    pub clipboard: Arc<dyn SystemClipboardPort>,
}
