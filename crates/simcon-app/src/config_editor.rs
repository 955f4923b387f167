//! Config editor state machine
//!
//! ```text
//!   Viewing --edit--> Editing --save(valid)--> Saving --ok--> Viewing
//!      ^                 |  ^                    |
//!      +-----cancel------+  +-------failure------+
//! ```
//!
//! The last-saved copy only changes on a successful save acknowledgment or
//! a fetch from the server. The working buffer survives every failure
//! unchanged.

use serde_json::Value;
use simcon_client::ApiError;
use simcon_core::ControlResponse;

use crate::text_buffer::TextBuffer;

/// Shown when the buffer is not valid JSON
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON format. Please check your syntax.";

/// Fallback notice when the server acknowledges a save without a message
pub const SAVE_SUCCESS_FALLBACK: &str = "Configuration saved successfully";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Viewing,
    Editing,
    Saving,
}

#[derive(Debug, Clone)]
pub struct ConfigEditor {
    mode: EditorMode,
    saved: Option<Value>,
    buffer: TextBuffer,
    pending: Option<Value>,
    pub error: Option<String>,
    pub loading: bool,
}

impl Default for ConfigEditor {
    fn default() -> Self {
        Self {
            mode: EditorMode::Viewing,
            saved: None,
            buffer: TextBuffer::default(),
            pending: None,
            error: None,
            loading: true,
        }
    }
}

impl ConfigEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == EditorMode::Editing
    }

    /// Last configuration known to be stored on the server
    pub fn saved(&self) -> Option<&Value> {
        self.saved.as_ref()
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> Option<&mut TextBuffer> {
        match self.mode {
            EditorMode::Editing => Some(&mut self.buffer),
            _ => None,
        }
    }

    /// Apply a fetched configuration.
    ///
    /// While editing or saving only the last-saved copy changes; the buffer
    /// is never touched.
    pub fn apply_fetch(&mut self, result: Result<Value, ApiError>) {
        self.loading = false;
        match result {
            Ok(value) => {
                self.saved = Some(value);
                if self.mode == EditorMode::Viewing {
                    self.error = None;
                }
            }
            Err(e) => {
                if self.mode == EditorMode::Viewing {
                    self.error = Some(e.user_message());
                } else {
                    tracing::warn!("Config fetch failed while editing: {}", e);
                }
            }
        }
    }

    /// Viewing -> Editing with the buffer seeded from the last-saved copy.
    ///
    /// Refused until a configuration has been loaded.
    pub fn begin_edit(&mut self) -> bool {
        if self.mode != EditorMode::Viewing {
            return false;
        }
        let Some(saved) = &self.saved else {
            return false;
        };
        self.buffer = TextBuffer::from_text(&pretty(saved));
        self.error = None;
        self.mode = EditorMode::Editing;
        true
    }

    /// Editing -> Viewing, discarding the buffer. No network involved.
    pub fn cancel(&mut self) -> bool {
        if self.mode != EditorMode::Editing {
            return false;
        }
        self.mode = EditorMode::Viewing;
        self.error = None;
        true
    }

    /// Restore the buffer from the last-saved copy, staying in Editing.
    pub fn revert(&mut self) -> bool {
        if self.mode != EditorMode::Editing {
            return false;
        }
        if let Some(saved) = &self.saved {
            self.buffer = TextBuffer::from_text(&pretty(saved));
        }
        self.error = None;
        true
    }

    /// Parse the buffer for saving.
    ///
    /// On invalid JSON the editor stays in Editing with
    /// [`INVALID_JSON_MESSAGE`] and nothing is sent.
    pub fn validate(&mut self) -> Option<Value> {
        if self.mode != EditorMode::Editing {
            return None;
        }
        match serde_json::from_str::<Value>(&self.buffer.text()) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!("Config buffer rejected: {}", e);
                self.error = Some(INVALID_JSON_MESSAGE.to_string());
                None
            }
        }
    }

    /// Editing -> Saving with the parsed value awaiting acknowledgment.
    pub fn begin_save(&mut self, value: Value) {
        self.pending = Some(value);
        self.error = None;
        self.mode = EditorMode::Saving;
    }

    /// Saving -> Viewing (promoting the pending value) or back to Editing.
    ///
    /// Returns the success notice text.
    pub fn finish_save(&mut self, result: Result<ControlResponse, ApiError>) -> Option<String> {
        if self.mode != EditorMode::Saving {
            return None;
        }
        match result {
            Ok(response) => {
                self.saved = self.pending.take();
                self.mode = EditorMode::Viewing;
                self.error = None;
                let message = response.message.trim();
                Some(if message.is_empty() {
                    SAVE_SUCCESS_FALLBACK.to_string()
                } else {
                    message.to_string()
                })
            }
            Err(e) => {
                self.pending = None;
                self.mode = EditorMode::Editing;
                self.error = Some(e.user_message());
                None
            }
        }
    }

    /// Saving -> Editing after the action lock expired.
    pub fn abandon_save(&mut self, message: impl Into<String>) {
        if self.mode == EditorMode::Saving {
            self.pending = None;
            self.mode = EditorMode::Editing;
            self.error = Some(message.into());
        }
    }
}

/// Pretty-printed JSON with two-space indentation
pub fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
