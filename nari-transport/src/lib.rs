//! Transport layer for Razer Nari headset communication
//!
//! This crate owns the vendor wire protocol and the raw control channel:
//!
//! - Report building (fixed 64-byte frames with the protocol header)
//! - USB control transfers via libusb (`rusb`)
//! - HID feature reports via hidraw (`hidapi`)
//! - Settle delays after every write
//!
//! ```text
//! [UsbControlChannel / HidFeatureChannel]  ← implements ControlChannel (raw I/O)
//!                 |
//!         [ControlTransport]                ← frame copy, settle delay, length checks
//!                 |
//!          [HeadsetSession]                 ← exclusive access, settings cache
//! ```

pub mod channel;
pub mod device_registry;
pub mod error;
pub mod printer;
pub mod protocol;
pub mod transport;
pub mod types;

mod discovery;
mod hid_feature;
mod usb_control;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use channel::ControlChannel;
pub use device_registry::{DeviceModel, SUPPORTED_PIDS, VENDOR_ID};
pub use error::TransportError;
pub use printer::MonitorChannel;
pub use protocol::{
    build_brightness_report, build_color_report, build_poll_report, ReportKind, RequestReport,
    FRAME_SIZE,
};
pub use transport::ControlTransport;
pub use types::{Backend, DiscoveredDevice, StatusSnapshot, TransportDeviceInfo};

pub use discovery::{discovery_for, DeviceDiscovery, HidDiscovery, UsbDiscovery};
pub use hid_feature::HidFeatureChannel;
pub use usb_control::UsbControlChannel;
