//! High-level session for Razer Nari headsets
//!
//! A `HeadsetSession` owns the control transport of one attached headset and
//! is the only way to reach it. Every protocol exchange (build, transfer,
//! settle) runs under the session lock, so concurrent callers never
//! interleave frames on the wire. Settings the device cannot report back
//! (color, brightness) are cached here after each confirmed write.

pub mod error;
pub mod led;

mod open;

pub use error::HeadsetError;
pub use led::{RgbColor, StaticColor, BRIGHTNESS_OFF};
pub use open::{list_headsets, open_headset};

// Re-exported for consumers of the session
pub use nari_transport::{DeviceModel, StatusSnapshot, TransportDeviceInfo};

use nari_transport::device_registry::INTERFACE_PROTOCOL_NONE;
use nari_transport::{build_brightness_report, build_color_report, ControlTransport};
use parking_lot::{Mutex, RwLock};
use tracing::{info, warn};

/// Last confirmed settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsCache {
    pub color: RgbColor,
    pub brightness: u8,
}

/// Per-device session
pub struct HeadsetSession {
    info: TransportDeviceInfo,
    model: DeviceModel,
    /// Held for exactly one exchange
    transport: Mutex<ControlTransport>,
    settings: RwLock<SettingsCache>,
    last_status: RwLock<Option<StatusSnapshot>>,
}

impl HeadsetSession {
    /// Create a session without touching the device
    ///
    /// # Arguments
    /// * `transport` - Transport over the headset's control channel
    /// * `info` - Identity of the bound device
    pub fn new(transport: ControlTransport, info: TransportDeviceInfo) -> Self {
        Self {
            model: DeviceModel::from_pid(info.pid),
            info,
            transport: Mutex::new(transport),
            settings: RwLock::new(SettingsCache::default()),
            last_status: RwLock::new(None),
        }
    }

    /// Create a session and run the initial status poll.
    ///
    /// A failed poll is logged; the session is still usable.
    pub fn attach(transport: ControlTransport, info: TransportDeviceInfo) -> Self {
        let session = Self::new(transport, info);
        if let Err(e) = session.request_status() {
            warn!("Initial status poll failed: {}", e);
        }
        session
    }

    /// Get device information
    pub fn info(&self) -> &TransportDeviceInfo {
        &self.info
    }

    /// Get model family
    pub fn model(&self) -> DeviceModel {
        self.model
    }

    /// Check if the bound interface carries the control protocol.
    ///
    /// Backends that cannot see bInterfaceProtocol only open the control
    /// interface, so an unknown protocol counts as a match.
    pub fn exposes_attributes(&self) -> bool {
        self.info
            .interface_protocol
            .unwrap_or(INTERFACE_PROTOCOL_NONE)
            == INTERFACE_PROTOCOL_NONE
    }

    /// Run one protocol exchange with exclusive access to the transport.
    ///
    /// The lock is released when `op` returns, on success and error alike.
    pub fn with_exclusive_access<R>(&self, op: impl FnOnce(&mut ControlTransport) -> R) -> R {
        let mut transport = self.transport.lock();
        op(&mut transport)
    }

    // === LED Control ===

    /// Switch the lighting off
    pub fn set_effect_none(&self) -> Result<(), HeadsetError> {
        self.set_brightness(BRIGHTNESS_OFF)
    }

    /// Set lighting brightness
    pub fn set_brightness(&self, level: u8) -> Result<(), HeadsetError> {
        self.with_exclusive_access(|transport| -> Result<(), HeadsetError> {
            let report = build_brightness_report(level);
            transport.send_control(&report, false)?;
            self.settings.write().brightness = level;
            Ok(())
        })
    }

    /// Set a static color
    ///
    /// # Arguments
    /// * `r`, `g`, `b` - Color components
    /// * `intensity` - Optional fourth byte; unverified device behavior
    pub fn set_static_color(
        &self,
        r: u8,
        g: u8,
        b: u8,
        intensity: Option<u8>,
    ) -> Result<(), HeadsetError> {
        self.with_exclusive_access(|transport| -> Result<(), HeadsetError> {
            let mut report = build_color_report(r, g, b);
            if let Some(intensity) = intensity {
                report = report.with_intensity(intensity);
            }
            transport.send_control(&report, false)?;
            self.settings.write().color = RgbColor::new(r, g, b);
            Ok(())
        })
    }

    /// Apply a parsed static color payload
    pub fn apply_static_color(&self, color: StaticColor) -> Result<(), HeadsetError> {
        let (r, g, b) = color.color.as_tuple();
        self.set_static_color(r, g, b, color.intensity)
    }

    /// Get the last confirmed static color (the device never reports it)
    pub fn get_static_color(&self) -> RgbColor {
        self.settings.read().color
    }

    /// Get the last confirmed brightness
    pub fn brightness(&self) -> u8 {
        self.settings.read().brightness
    }

    /// Get all cached settings
    pub fn settings(&self) -> SettingsCache {
        *self.settings.read()
    }

    // === Status ===

    /// Poll the device status and keep it as the last observed snapshot
    pub fn request_status(&self) -> Result<StatusSnapshot, HeadsetError> {
        self.with_exclusive_access(|transport| -> Result<StatusSnapshot, HeadsetError> {
            let status = transport.read_status()?;
            info!("{} status report:", self.model.name());
            for row in status.hex_rows() {
                info!("\t{}", row);
            }
            *self.last_status.write() = Some(status.clone());
            Ok(status)
        })
    }

    /// Last observed status snapshot
    pub fn last_status(&self) -> Option<StatusSnapshot> {
        self.last_status.read().clone()
    }
}

impl Drop for HeadsetSession {
    fn drop(&mut self) {
        info!(
            "{} disconnected ({})",
            self.model.name(),
            self.info.device_path
        );
    }
}
