use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use ck_core::ports::SystemClipboardPort;
use ck_core::ClipboardError;
use clipboard_rs::{Clipboard, ClipboardContext};
use tokio::task::spawn_blocking;
use tracing::debug;

/// System clipboard backed by `clipboard-rs`.
pub struct ClipboardRsAdapter {
    inner: Arc<Mutex<ClipboardContext>>,
}

impl ClipboardRsAdapter {
    pub fn new() -> Result<Self> {
        let context = ClipboardContext::new()
            .map_err(|e| anyhow!("ClipboardContext::new failed: {e}"))?;
        Ok(Self {
            inner: Arc::new(Mutex::new(context)),
        })
    }
}

#[async_trait]
impl SystemClipboardPort for ClipboardRsAdapter {
    async fn read_text(&self) -> Result<String, ClipboardError> {
        let inner = Arc::clone(&self.inner);
        let text = spawn_blocking(move || {
            let ctx = inner
                .lock()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            ctx.get_text().map_err(|e| classify_error(&e.to_string()))
        })
        .await
        .map_err(|e| ClipboardError::Unavailable(e.to_string()))??;

        debug!(len = text.len(), "read text from system clipboard");
        Ok(text)
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let inner = Arc::clone(&self.inner);
        let text = text.to_string();
        spawn_blocking(move || {
            let ctx = inner
                .lock()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            ctx.set_text(text).map_err(|e| classify_error(&e.to_string()))
        })
        .await
        .map_err(|e| ClipboardError::Unavailable(e.to_string()))?
    }
}

/// Stand-in for hosts without a usable clipboard (headless sessions).
pub struct UnavailableClipboard {
    reason: String,
}

impl UnavailableClipboard {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl SystemClipboardPort for UnavailableClipboard {
    async fn read_text(&self) -> Result<String, ClipboardError> {
        Err(ClipboardError::Unavailable(self.reason.clone()))
    }

    async fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable(self.reason.clone()))
    }
}

/// The backends only report strings; access refusals are recognized by wording.
fn classify_error(message: &str) -> ClipboardError {
    let lower = message.to_lowercase();
    if lower.contains("permission") || lower.contains("denied") || lower.contains("not allowed") {
        ClipboardError::PermissionDenied(message.to_string())
    } else {
        ClipboardError::Unavailable(message.to_string())
    }
}
