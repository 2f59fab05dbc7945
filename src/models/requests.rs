//! Request DTOs for the guestbook API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Request body for creating an entry (POST /api/entries)
///
/// Missing fields deserialize as empty strings so that they are rejected by
/// [`CreateEntryRequest::validate`] rather than by the JSON decoder.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateEntryRequest {
    /// Author name
    #[serde(default)]
    pub name: String,
    /// Message body
    #[serde(default)]
    pub message: String,
}

impl CreateEntryRequest {
    /// Creates a new request from its parts.
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid. Both
    /// fields must be non-empty after trimming.
    pub fn validate(&self) -> Option<String> {
        if self.name.trim().is_empty() || self.message.trim().is_empty() {
            return Some("Name and message are required".to_string());
        }
        None
    }
}
