//! Transport error types

use thiserror::Error;

/// Errors that can occur during transport operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Control transfer completed with the wrong byte count
    #[error("Short write: expected {expected} bytes, transferred {actual}")]
    ShortWrite { expected: usize, actual: usize },

    /// Status poll returned the wrong byte count
    #[error("Short read: expected {expected} bytes, received {actual}")]
    ShortRead { expected: usize, actual: usize },

    /// The underlying transfer primitive failed
    #[error("Device error: {0}")]
    DeviceError(String),

    // Discovery / open errors
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),
}

impl TransportError {
    /// Failure of a SET_REPORT or GET_REPORT transfer on an open channel.
    ///
    /// Always `DeviceError`: the discovery/open variants (`DeviceNotFound`,
    /// `PermissionDenied`) never come out of a transfer.
    pub fn transfer_failed(e: impl std::fmt::Display) -> Self {
        TransportError::DeviceError(e.to_string())
    }
}

impl From<rusb::Error> for TransportError {
    fn from(e: rusb::Error) -> Self {
        match e {
            rusb::Error::Access => TransportError::PermissionDenied(e.to_string()),
            rusb::Error::NoDevice => TransportError::DeviceNotFound(e.to_string()),
            _ => TransportError::DeviceError(e.to_string()),
        }
    }
}

impl From<hidapi::HidError> for TransportError {
    fn from(e: hidapi::HidError) -> Self {
        let msg = e.to_string();
        if msg.contains("Permission denied") || msg.contains("EPERM") {
            TransportError::PermissionDenied(msg)
        } else {
            TransportError::DeviceError(msg)
        }
    }
}
