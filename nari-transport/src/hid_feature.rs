//! HID feature-report channel for hidraw access
//!
//! Uses the kernel's HID driver instead of claiming the interface. The first
//! frame byte (0xFF) is the report id, so SET_REPORT goes out with wValue
//! 0x03FF and the full 64-byte frame, same as the libusb channel.
//!
//! Two differences from the libusb channel: hidapi's `send_feature_report`
//! returns no byte count, so writes on this backend never produce
//! `ShortWrite`; and hidraw feature ioctls have no caller-set timeout, so
//! `--timeout-ms` does not apply here. Reads are still length-checked.

use hidapi::HidDevice;

use crate::channel::ControlChannel;
use crate::error::TransportError;
use crate::protocol::FRAME_SIZE;

/// Control channel over a hidraw node
pub struct HidFeatureChannel {
    device: HidDevice,
}

impl HidFeatureChannel {
    /// Wrap an opened HID device (the interface 5 node)
    pub fn new(device: HidDevice) -> Self {
        Self { device }
    }
}

impl ControlChannel for HidFeatureChannel {
    fn set_report(&mut self, frame: &[u8; FRAME_SIZE]) -> Result<usize, TransportError> {
        // hidapi reports success or failure only; a completed ioctl moved
        // the whole buffer.
        transfer_result(self.device.send_feature_report(frame).map(|()| frame.len()))
    }

    fn get_report(&mut self, buf: &mut [u8; FRAME_SIZE]) -> Result<usize, TransportError> {
        transfer_result(self.device.get_feature_report(buf))
    }
}

/// Any hidraw failure on an open node is a device error, including EPERM
fn transfer_result(result: hidapi::HidResult<usize>) -> Result<usize, TransportError> {
    result.map_err(TransportError::transfer_failed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_faults_map_to_device_error() {
        let err = hidapi::HidError::HidApiError {
            message: "hid_send_feature_report: Permission denied".into(),
        };
        assert!(matches!(
            transfer_result(Err(err)),
            Err(TransportError::DeviceError(_))
        ));
        assert_eq!(transfer_result(Ok(64)), Ok(64));
    }
}
