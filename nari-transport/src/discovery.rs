//! Device discovery for Razer Nari headsets

use std::time::Duration;

use hidapi::HidApi;
use tracing::{debug, info};

use crate::channel::ControlChannel;
use crate::device_registry::{self, VENDOR_ID};
use crate::error::TransportError;
use crate::hid_feature::HidFeatureChannel;
use crate::printer::MonitorChannel;
use crate::protocol::control;
use crate::types::{Backend, DeviceLocator, DiscoveredDevice, TransportDeviceInfo};
use crate::usb_control::UsbControlChannel;

/// Device discovery abstraction
pub trait DeviceDiscovery: Send + Sync {
    /// List currently attached headsets (control interface only)
    fn list_devices(&self) -> Result<Vec<DiscoveredDevice>, TransportError>;

    /// Open the control channel of a specific device
    fn open_device(
        &self,
        device: &DiscoveredDevice,
    ) -> Result<Box<dyn ControlChannel>, TransportError>;

    /// Open the first headset, preferring `pid` when given
    fn open_first(
        &self,
        pid: Option<u16>,
    ) -> Result<(TransportDeviceInfo, Box<dyn ControlChannel>), TransportError> {
        let devices = self.list_devices()?;
        let device = pid
            .and_then(|pid| devices.iter().find(|d| d.info.pid == pid))
            .or_else(|| devices.first())
            .ok_or_else(|| {
                TransportError::DeviceNotFound("No supported headset found".into())
            })?;

        info!(
            "Opening {} ({:04x}:{:04x}) at {}",
            device_registry::DeviceModel::from_pid(device.info.pid).name(),
            device.info.vid,
            device.info.pid,
            device.info.device_path
        );
        let channel = self.open_device(device)?;
        Ok((device.info.clone(), channel))
    }
}

/// Create the discovery for a backend
///
/// # Arguments
/// * `backend` - libusb control transfers or hidraw feature reports
/// * `timeout` - Control transfer timeout (libusb only)
/// * `monitor` - Wrap opened channels with `MonitorChannel`
pub fn discovery_for(backend: Backend, timeout: Duration, monitor: bool) -> Box<dyn DeviceDiscovery> {
    match backend {
        Backend::Usb => Box::new(UsbDiscovery::new(timeout).with_monitor(monitor)),
        Backend::Hid => Box::new(HidDiscovery::new().with_monitor(monitor)),
    }
}

fn wrap(channel: Box<dyn ControlChannel>, monitor: bool) -> Box<dyn ControlChannel> {
    if monitor {
        MonitorChannel::wrap(channel)
    } else {
        channel
    }
}

/// libusb discovery: walks the bus and reads interface descriptors
pub struct UsbDiscovery {
    timeout: Duration,
    monitor: bool,
}

impl UsbDiscovery {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            monitor: false,
        }
    }

    pub fn with_monitor(mut self, monitor: bool) -> Self {
        self.monitor = monitor;
        self
    }

    fn interface_protocol(device: &rusb::Device<rusb::GlobalContext>) -> Option<u8> {
        let config = device.active_config_descriptor().ok()?;
        let interface = config
            .interfaces()
            .find(|i| i.number() == control::INTERFACE)?;
        let descriptor = interface.descriptors().next()?;
        Some(descriptor.protocol_code())
    }
}

impl DeviceDiscovery for UsbDiscovery {
    fn list_devices(&self) -> Result<Vec<DiscoveredDevice>, TransportError> {
        let mut found = Vec::new();

        for device in rusb::devices()?.iter() {
            let descriptor = match device.device_descriptor() {
                Ok(d) => d,
                Err(e) => {
                    debug!("Skipping device without descriptor: {}", e);
                    continue;
                }
            };
            if !device_registry::is_supported(descriptor.vendor_id(), descriptor.product_id()) {
                continue;
            }

            let (bus, address) = (device.bus_number(), device.address());
            found.push(DiscoveredDevice {
                info: TransportDeviceInfo {
                    vid: descriptor.vendor_id(),
                    pid: descriptor.product_id(),
                    interface_number: control::INTERFACE,
                    interface_protocol: Self::interface_protocol(&device),
                    backend: Backend::Usb,
                    device_path: format!("usb:{bus:03}:{address:03}"),
                    product_name: None,
                },
                locator: DeviceLocator::Usb { bus, address },
            });
        }

        debug!("Found {} headsets via libusb", found.len());
        Ok(found)
    }

    fn open_device(
        &self,
        device: &DiscoveredDevice,
    ) -> Result<Box<dyn ControlChannel>, TransportError> {
        let DeviceLocator::Usb { bus, address } = device.locator else {
            return Err(TransportError::DeviceNotFound(format!(
                "{} is not a libusb device",
                device.info.device_path
            )));
        };

        let usb_device = rusb::devices()?
            .iter()
            .find(|d| d.bus_number() == bus && d.address() == address)
            .ok_or_else(|| TransportError::DeviceNotFound(device.info.device_path.clone()))?;

        let channel = UsbControlChannel::open(&usb_device, control::INTERFACE, self.timeout)?;
        Ok(wrap(Box::new(channel), self.monitor))
    }
}

/// hidraw discovery via hidapi
pub struct HidDiscovery {
    /// Known VID/PID pairs to look for
    known_devices: Vec<(u16, u16)>,
    monitor: bool,
}

impl Default for HidDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

impl HidDiscovery {
    pub fn new() -> Self {
        Self {
            known_devices: device_registry::SUPPORTED_PIDS
                .iter()
                .map(|&pid| (VENDOR_ID, pid))
                .collect(),
            monitor: false,
        }
    }

    pub fn with_monitor(mut self, monitor: bool) -> Self {
        self.monitor = monitor;
        self
    }

    /// Check if a device matches our known devices
    fn is_known_device(&self, vid: u16, pid: u16) -> bool {
        self.known_devices.contains(&(vid, pid))
    }

    /// Check if this node is the control interface
    fn is_control_interface(device_info: &hidapi::DeviceInfo) -> bool {
        device_info.interface_number() == control::INTERFACE as i32
    }
}

impl DeviceDiscovery for HidDiscovery {
    fn list_devices(&self) -> Result<Vec<DiscoveredDevice>, TransportError> {
        let api = HidApi::new()?;

        let found: Vec<DiscoveredDevice> = api
            .device_list()
            .filter(|d| self.is_known_device(d.vendor_id(), d.product_id()))
            .filter(|d| Self::is_control_interface(d))
            .map(|d| DiscoveredDevice {
                info: TransportDeviceInfo {
                    vid: d.vendor_id(),
                    pid: d.product_id(),
                    interface_number: control::INTERFACE,
                    // hidraw does not expose bInterfaceProtocol
                    interface_protocol: None,
                    backend: Backend::Hid,
                    device_path: d.path().to_string_lossy().into_owned(),
                    product_name: d.product_string().map(str::to_owned),
                },
                locator: DeviceLocator::Hid {
                    path: d.path().to_owned(),
                },
            })
            .collect();

        debug!("Found {} headsets via hidapi", found.len());
        Ok(found)
    }

    fn open_device(
        &self,
        device: &DiscoveredDevice,
    ) -> Result<Box<dyn ControlChannel>, TransportError> {
        let DeviceLocator::Hid { path } = &device.locator else {
            return Err(TransportError::DeviceNotFound(format!(
                "{} is not a hidraw device",
                device.info.device_path
            )));
        };

        let api = HidApi::new()?;
        let hid_device = api.open_path(path)?;
        Ok(wrap(
            Box::new(HidFeatureChannel::new(hid_device)),
            self.monitor,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hid_discovery_knows_all_pids() {
        let discovery = HidDiscovery::new();
        for &pid in device_registry::SUPPORTED_PIDS {
            assert!(discovery.is_known_device(VENDOR_ID, pid));
        }
        assert!(!discovery.is_known_device(0x046d, 0xc52b));
    }

    #[test]
    #[ignore] // requires hardware
    fn test_list_devices() {
        let discovery = discovery_for(Backend::Hid, Duration::from_secs(1), false);
        assert!(discovery.list_devices().is_ok());
    }
}
