//! Error types for fragment consolidation.

use thiserror::Error;

/// Result type alias for the consolidation library.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors that can occur while building, scoring or exporting fragments and objects.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Malformed box ({x1}, {y1}, {x2}, {y2}): width and height must be positive")]
    MalformedBox { x1: f32, y1: f32, x2: f32, y2: f32 },

    #[error("Fragment {identity} ends at frame {end_frame} before it starts at frame {start_frame}")]
    InvertedFrames {
        identity: u64,
        start_frame: u32,
        end_frame: u32,
    },

    #[error("Object {0} already exists; fragment identities must be unique")]
    DuplicateIdentity(u64),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Assignment failed: {0}")]
    Assignment(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LedgerError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
