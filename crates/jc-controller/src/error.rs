//! Error types for the controller session

use crate::controller::ControllerKind;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for controller operations
pub type ControllerResult<T> = Result<T, ControllerError>;

/// Errors that can occur while driving an emulated controller
#[derive(Debug, Error)]
pub enum ControllerError {
    /// Button name not present on this controller kind
    #[error("unknown button '{key}' for {kind}")]
    UnknownButton { key: String, kind: ControllerKind },

    /// Failed to read an SPI flash dump
    #[error("failed to read SPI flash dump {path}: {source}")]
    ReadFlash {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// SPI flash dump has the wrong size
    #[error("SPI flash dump is {actual} bytes, expected {expected}")]
    FlashSize { expected: usize, actual: usize },

    /// Failed to write to the input-event capture file
    #[error("failed to write capture file {path}: {source}")]
    Capture {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
