//! Structured error types for card persistence.
//!
//! Rendering has no error path. Errors come only from reading records:
//! text that is not JSON, JSON that is not a card, and file access in the CLI.

use thiserror::Error;

/// The unified error type returned by the loading and import functions.
#[derive(Debug, Error)]
pub enum CardError {
    /// A record parsed but is not a card: a required part is missing or a
    /// field has the wrong shape.
    #[error("Invalid card format: {0}")]
    InvalidFormat(String),

    /// Imported text could not be read as a record at all.
    #[error("Failed to parse card: {message}{}", hint_suffix(.hint))]
    ParseError {
        message: String,
        hint: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn hint_suffix(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

impl CardError {
    /// A parse error with no underlying JSON error.
    pub fn parse(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CardError::ParseError {
            message: message.into(),
            hint: hint.into(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for CardError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the card record schema. Check field names and types.".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input. Is the file truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        CardError::ParseError {
            message: e.to_string(),
            hint,
            source: Some(e),
        }
    }
}
