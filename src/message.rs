//! Background message handling.
//!
//! Requests arrive as one JSON object per line, e.g.
//! `{"action":"exportClipboard"}`, and are answered with a
//! [`MessageResponse`].

use ck_app::App;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info_span, warn, Instrument};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum BackgroundMessage {
    ExportClipboard,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MessageResponse {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Answers one raw request line. Malformed or unknown requests get an
/// error response rather than an `Err`.
pub async fn handle_message(app: &App, raw: &str) -> MessageResponse {
    let message: BackgroundMessage = match serde_json::from_str(raw) {
        Ok(message) => message,
        Err(e) => {
            warn!(error = %e, "rejected background message");
            return MessageResponse::err(format!("unsupported message: {e}"));
        }
    };

    dispatch(app, message)
        .instrument(info_span!("message.handle"))
        .await
}

async fn dispatch(app: &App, message: BackgroundMessage) -> MessageResponse {
    match message {
        BackgroundMessage::ExportClipboard => MessageResponse::ok(app.history.raw_entries().await),
    }
}
