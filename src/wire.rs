//! Message protocol between host logic and the embedded renderer
//!
//! Both directions use tagged JSON with a `type` field. The renderer is an
//! opaque collaborator: everything it needs arrives through these messages.

use serde::{Deserialize, Serialize};

use crate::panel::FileId;

/// Renderer → host messages
#[derive(Debug, Clone, PartialEq)]
pub enum InboundMessage {
    /// One-time signal that the renderer can accept preview payloads
    RendererReady,
    /// Anything with a tag we don't recognize; logged and ignored
    Unknown { kind: String },
}

impl InboundMessage {
    /// Parse a raw JSON message from the renderer.
    ///
    /// Unrecognized `type` tags parse successfully as [`Unknown`] so the
    /// caller can log them; malformed JSON or a missing tag is an error.
    ///
    /// [`Unknown`]: InboundMessage::Unknown
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        #[derive(Deserialize)]
        struct Tagged {
            #[serde(rename = "type")]
            kind: String,
        }

        let tagged: Tagged = serde_json::from_str(raw)?;
        Ok(match tagged.kind.as_str() {
            "renderer_ready" => InboundMessage::RendererReady,
            _ => InboundMessage::Unknown { kind: tagged.kind },
        })
    }
}

/// Host → renderer messages
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// Load and render the given file
    Preview { data: PreviewPayload },
}

/// Payload of [`OutboundMessage::Preview`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewPayload {
    /// Raw file identity, echoed back by the renderer in its own state
    pub uri: String,
    /// Renderer-addressable URL for the file's bytes
    pub path: String,
}

impl OutboundMessage {
    /// Build a preview message for a file, resolving a renderer-addressable
    /// URL for its bytes.
    pub fn preview(file: &FileId) -> Self {
        OutboundMessage::Preview {
            data: PreviewPayload {
                uri: file.as_str().to_string(),
                path: file_url(file),
            },
        }
    }
}

/// `file://` URL for a previewed file's bytes.
///
/// Backslashes become forward slashes, so a Windows path like
/// `C:\anims\a.json` turns into `file:///C:/anims/a.json`, and bytes
/// outside the URL path set are percent-encoded.
fn file_url(file: &FileId) -> String {
    let path = file.as_str().replace('\\', "/");
    let absolute = if path.starts_with('/') {
        path
    } else {
        format!("/{path}")
    };

    let mut encoded = String::with_capacity(absolute.len());
    for byte in absolute.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' => encoded.push(byte as char),
            b'/' | b'-' | b'.' | b'_' | b'~' | b':' => encoded.push(byte as char),
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    format!("file://{encoded}")
}
