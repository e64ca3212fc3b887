//! Command handlers for the CLI application.
//!
//! This module organizes command handlers by category:
//! - `query`: Read-only commands (list, info, status)
//! - `set`: Lighting commands (none, static, brightness)
//! - `attr`: Named attribute access (attr list, attr read, attr write)

pub mod attr;
pub mod query;
pub mod set;

use nari_driver::DriverConfig;
use nari_headset::{open_headset, HeadsetError, HeadsetSession};
use nari_transport::{discovery_for, TransportError};

/// Result type for command handlers
pub type CommandResult = anyhow::Result<()>;

/// Resolved connection settings (config file merged with CLI flags)
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    pub config: DriverConfig,
    pub monitor: bool,
}

/// Open the preferred headset and attach a session to it
pub fn open_session(opts: &ConnectOptions) -> Result<HeadsetSession, HeadsetError> {
    let discovery = discovery_for(opts.config.backend, opts.config.timeout(), opts.monitor);
    open_headset(discovery.as_ref(), opts.config.product_id)
}

/// Open a headset and run a closure with it.
/// Prints a note and returns Ok(()) if no device is attached; any other open
/// failure (e.g. permission denied) is returned as is.
pub fn with_session<F>(opts: &ConnectOptions, f: F) -> CommandResult
where
    F: FnOnce(&HeadsetSession) -> CommandResult,
{
    match open_session(opts) {
        Ok(session) => f(&session),
        Err(e) => open_failure(e),
    }
}

fn open_failure(e: HeadsetError) -> CommandResult {
    match e {
        HeadsetError::Transport(TransportError::DeviceNotFound(msg)) => {
            eprintln!("No device found: {msg}");
            Ok(())
        }
        e => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_device_is_not_an_error() {
        let e = HeadsetError::Transport(TransportError::DeviceNotFound(
            "No supported headset found".into(),
        ));
        assert!(open_failure(e).is_ok());
    }

    #[test]
    fn test_permission_denied_is_reported() {
        let e = HeadsetError::Transport(TransportError::PermissionDenied("Access denied".into()));
        let err = open_failure(e).unwrap_err();
        assert!(err.to_string().contains("Permission denied: Access denied"));
        assert!(matches!(
            err.downcast_ref::<HeadsetError>(),
            Some(HeadsetError::Transport(TransportError::PermissionDenied(_)))
        ));
    }
}
