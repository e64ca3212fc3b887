//! Headset interface error types

use nari_transport::TransportError;
use thiserror::Error;

/// Errors from headset operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeadsetError {
    /// Transport layer error
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Caller payload has the wrong shape
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation not available on this attribute or interface
    #[error("Not supported: {0}")]
    NotSupported(String),
}
