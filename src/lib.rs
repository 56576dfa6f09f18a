//! Process-level wiring for the clipboard history popup: tracing setup,
//! data locations, adapter wiring and the background message handler.

pub mod bootstrap;
pub mod message;
