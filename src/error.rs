//! Error handling for doseview
//!
//! This module defines the crate error type and a Result alias for use
//! throughout the application.

use thiserror::Error;

/// Main error type for doseview operations
#[derive(Error, Debug)]
pub enum DoseViewError {
    /// Errors raised by the serial port layer
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// The serial stream ended or the device went away
    #[error("Transport closed: {0}")]
    TransportClosed(String),

    /// No serial device is attached to resolve against
    #[error("No serial device detected")]
    NoDevice,

    /// A numeric device index pointed past the enumerated ports
    #[error("No serial device at index {index} ({available} detected)")]
    DeviceIndex { index: usize, available: usize },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for doseview operations
pub type Result<T> = std::result::Result<T, DoseViewError>;
