//! Error types for the roost-tui crate

use std::io;
use thiserror::Error;

/// Result type alias for roost-tui operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for roost-tui
#[derive(Error, Debug)]
pub enum Error {
    /// Terminal I/O errors
    #[error("Terminal I/O error: {0}")]
    Io(#[from] io::Error),

    /// The terminal input stream ended
    #[error("Terminal input closed")]
    InputClosed,
}
