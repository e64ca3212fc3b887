//! USB control-transfer channel for direct libusb access
//!
//! Issues the class requests on interface 5 exactly as the headset expects
//! them: SET_REPORT `21 09 FF03 0500 4000` and GET_REPORT
//! `A1 01 0103 0500 4000`.

use std::time::Duration;

use rusb::{Device, DeviceHandle, GlobalContext};
use tracing::debug;

use crate::channel::ControlChannel;
use crate::error::TransportError;
use crate::protocol::{control, FRAME_SIZE};

/// Control channel over a claimed USB interface
pub struct UsbControlChannel {
    handle: DeviceHandle<GlobalContext>,
    interface: u8,
    timeout: Duration,
}

impl UsbControlChannel {
    /// Open a device and claim its control interface
    ///
    /// The kernel HID driver is detached from the interface while the
    /// channel is open and reattached when it is dropped.
    ///
    /// # Arguments
    /// * `device` - USB device to open
    /// * `interface` - Interface number of the control channel
    /// * `timeout` - Bound for each control transfer
    pub fn open(
        device: &Device<GlobalContext>,
        interface: u8,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let mut handle = device.open()?;

        match handle.set_auto_detach_kernel_driver(true) {
            Ok(()) | Err(rusb::Error::NotSupported) => {}
            Err(e) => return Err(e.into()),
        }
        handle.claim_interface(interface)?;
        debug!(
            "Claimed interface {} on bus {:03} device {:03}",
            interface,
            device.bus_number(),
            device.address()
        );

        Ok(Self {
            handle,
            interface,
            timeout,
        })
    }
}

impl ControlChannel for UsbControlChannel {
    fn set_report(&mut self, frame: &[u8; FRAME_SIZE]) -> Result<usize, TransportError> {
        let result = self.handle.write_control(
            control::REQUEST_TYPE_OUT,
            control::SET_REPORT,
            control::SET_VALUE,
            self.interface as u16,
            frame,
            self.timeout,
        );
        transfer_result(result)
    }

    fn get_report(&mut self, buf: &mut [u8; FRAME_SIZE]) -> Result<usize, TransportError> {
        let result = self.handle.read_control(
            control::REQUEST_TYPE_IN,
            control::GET_REPORT,
            control::GET_VALUE,
            self.interface as u16,
            buf,
            self.timeout,
        );
        transfer_result(result)
    }
}

/// Map a completed control transfer; unplug and access faults mid-transfer
/// are device errors, not open errors
fn transfer_result(result: rusb::Result<usize>) -> Result<usize, TransportError> {
    result.map_err(TransportError::transfer_failed)
}

impl Drop for UsbControlChannel {
    fn drop(&mut self) {
        if let Err(e) = self.handle.release_interface(self.interface) {
            debug!("Failed to release interface {}: {}", self.interface, e);
        }
    }
}
