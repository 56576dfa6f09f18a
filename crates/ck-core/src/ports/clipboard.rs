use async_trait::async_trait;

use crate::error::ClipboardError;

/// Plain-text access to the system clipboard.
#[async_trait]
pub trait SystemClipboardPort: Send + Sync {
    /// Fails with [`ClipboardError::PermissionDenied`] when the host refuses access.
    async fn read_text(&self) -> Result<String, ClipboardError>;

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}
