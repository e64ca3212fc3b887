//! Discovery helpers for opening headset sessions.

use std::time::Duration;

use nari_transport::protocol::control;
use nari_transport::{discovery_for, Backend, ControlTransport, DeviceDiscovery, DiscoveredDevice};

use crate::error::HeadsetError;
use crate::HeadsetSession;

/// List all connected headsets
pub fn list_headsets(backend: Backend) -> Result<Vec<DiscoveredDevice>, HeadsetError> {
    let discovery = discovery_for(
        backend,
        Duration::from_millis(control::DEFAULT_TIMEOUT_MS),
        false,
    );
    Ok(discovery.list_devices()?)
}

/// Open the first headset (preferring `pid`) and attach a session to it
pub fn open_headset(
    discovery: &dyn DeviceDiscovery,
    pid: Option<u16>,
) -> Result<HeadsetSession, HeadsetError> {
    let (info, channel) = discovery.open_first(pid)?;
    Ok(HeadsetSession::attach(ControlTransport::new(channel), info))
}
