//! Opaque pagination cursors
//!
//! A cursor is the standard base64 encoding of an entity's primary key in
//! decimal. It names a row, not a position, so it stays meaningful when rows
//! are inserted ahead of it. Keys are not validated on encode.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

/// Errors produced when a client sends back a cursor we cannot read
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorError {
    /// Not base64 at all
    #[error("cursor is not valid base64: {0}")]
    InvalidEncoding(String),

    /// Decodes, but not to an integer key
    #[error("cursor does not encode an id: {0}")]
    InvalidKey(String),
}

/// Encode a primary key as an opaque cursor
pub fn encode_cursor(id: i32) -> String {
    STANDARD.encode(id.to_string())
}

/// Recover the primary key from a cursor
pub fn decode_cursor(cursor: &str) -> Result<i32, CursorError> {
    let bytes = STANDARD
        .decode(cursor)
        .map_err(|_| CursorError::InvalidEncoding(cursor.to_string()))?;
    let text =
        String::from_utf8(bytes).map_err(|_| CursorError::InvalidKey(cursor.to_string()))?;
    text.trim()
        .parse()
        .map_err(|_| CursorError::InvalidKey(cursor.to_string()))
}
