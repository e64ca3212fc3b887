//! Common types for transport layer

use std::ffi::CString;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::protocol::{self, FRAME_SIZE};

/// Transport backend used to reach the control interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Raw USB control transfers via libusb
    #[default]
    Usb,
    /// HID feature reports via hidraw
    Hid,
}

impl Backend {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Usb => "usb",
            Self::Hid => "hid",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "usb" | "libusb" => Ok(Self::Usb),
            "hid" | "hidraw" => Ok(Self::Hid),
            _ => Err(format!("unknown backend: \"{s}\". Use usb or hid")),
        }
    }
}

/// Device identification information
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransportDeviceInfo {
    /// USB Vendor ID
    pub vid: u16,
    /// USB Product ID
    pub pid: u16,
    /// Interface number of the control channel
    pub interface_number: u8,
    /// bInterfaceProtocol, if the backend can see it (hidraw cannot)
    pub interface_protocol: Option<u8>,
    /// Backend that opened (or will open) the device
    pub backend: Backend,
    /// Device path or bus location (backend-specific)
    pub device_path: String,
    /// Product name if available
    pub product_name: Option<String>,
}

/// Discovered device that can be opened
#[derive(Debug, Clone)]
pub struct DiscoveredDevice {
    /// Device information
    pub info: TransportDeviceInfo,
    pub(crate) locator: DeviceLocator,
}

/// Backend-specific handle for reopening a discovered device
#[derive(Debug, Clone)]
pub(crate) enum DeviceLocator {
    Usb { bus: u8, address: u8 },
    Hid { path: CString },
}

/// Raw status report returned by a poll.
///
/// Only byte 0 (the report id) has a known meaning; the rest is kept as an
/// opaque blob for logging.
#[derive(Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    bytes: [u8; FRAME_SIZE],
}

impl StatusSnapshot {
    pub fn new(bytes: [u8; FRAME_SIZE]) -> Self {
        Self { bytes }
    }

    /// Report id (byte 0)
    pub fn report_id(&self) -> u8 {
        self.bytes[0]
    }

    pub fn as_bytes(&self) -> &[u8; FRAME_SIZE] {
        &self.bytes
    }

    /// Hex dump, 16 bytes per row
    pub fn hex_rows(&self) -> Vec<String> {
        self.bytes.chunks(16).map(protocol::hex).collect()
    }
}

impl fmt::Debug for StatusSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusSnapshot")
            .field("report_id", &format_args!("0x{:02x}", self.report_id()))
            .field("bytes", &protocol::hex(&self.bytes))
            .finish()
    }
}

impl fmt::Display for StatusSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex_rows().join("\n"))
    }
}
