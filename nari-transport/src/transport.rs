//! Control transport: one request or poll per call, with settle delays
//!
//! `ControlTransport` wraps a raw `ControlChannel` and adds the parts of the
//! protocol the channel knows nothing about: copying the report into a fixed
//! transfer buffer, the mandatory settle delay after writes, and exact
//! length checks. It never retries; retry is caller policy.

use std::time::Duration;

use tracing::{debug, warn};

use crate::channel::ControlChannel;
use crate::error::TransportError;
use crate::protocol::{self, control, RequestReport, FRAME_SIZE};
use crate::types::StatusSnapshot;

/// Blocking wait used for the settle delay
pub type SettleFn = Box<dyn Fn(Duration) + Send>;

/// Transport over a single control channel
pub struct ControlTransport {
    channel: Box<dyn ControlChannel>,
    settle: SettleFn,
}

impl ControlTransport {
    /// Create a transport that sleeps the calling thread for settle delays
    pub fn new(channel: Box<dyn ControlChannel>) -> Self {
        Self {
            channel,
            settle: Box::new(std::thread::sleep),
        }
    }

    /// Replace the settle wait (tests use a recording no-op)
    pub fn with_settle<F>(mut self, settle: F) -> Self
    where
        F: Fn(Duration) + Send + 'static,
    {
        self.settle = Box::new(settle);
        self
    }

    /// Send a request report and wait for the device to settle
    ///
    /// # Arguments
    /// * `report` - Request to send; always transferred as a full 64-byte frame
    /// * `skip_delay` - Skip the `length * 15` ms settle wait
    pub fn send_control(
        &mut self,
        report: &RequestReport,
        skip_delay: bool,
    ) -> Result<(), TransportError> {
        let buf = report.frame();
        debug!(
            "Sending {} report: {}",
            report.kind(),
            protocol::hex(&buf[..protocol::offset::INTENSITY + 1])
        );

        let result = self.channel.set_report(&buf);

        // Settle regardless of the transfer result
        if !skip_delay {
            (self.settle)(report.settle_delay());
        }

        match result {
            Ok(len) if len == FRAME_SIZE => Ok(()),
            Ok(len) => {
                warn!("Device data transfer failed: {len} of {FRAME_SIZE} bytes written");
                Err(TransportError::ShortWrite {
                    expected: FRAME_SIZE,
                    actual: len,
                })
            }
            Err(e) => {
                warn!("Device data transfer failed: {e}");
                Err(e)
            }
        }
    }

    /// Fetch the status feature report
    pub fn read_status(&mut self) -> Result<StatusSnapshot, TransportError> {
        let mut buf = [0u8; FRAME_SIZE];
        buf[0] = control::STATUS_REPORT_ID;

        let len = self.channel.get_report(&mut buf).map_err(|e| {
            warn!("Failed to send GET_REPORT request: {e}");
            e
        })?;
        if len != FRAME_SIZE {
            warn!("Failed to send GET_REPORT request: {len} of {FRAME_SIZE} bytes read");
            return Err(TransportError::ShortRead {
                expected: FRAME_SIZE,
                actual: len,
            });
        }

        let status = StatusSnapshot::new(buf);
        debug!("Got status report 0x{:02x}", status.report_id());
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{build_brightness_report, build_color_report};
    use crate::testing::{Call, RecordingChannel, Reply};

    fn transport() -> (ControlTransport, crate::testing::ChannelRecorder) {
        let (channel, recorder) = RecordingChannel::new();
        let transport = ControlTransport::new(Box::new(channel)).with_settle(recorder.settle_fn());
        (transport, recorder)
    }

    #[test]
    fn test_send_full_frame_then_settle() {
        let (mut transport, recorder) = transport();
        let report = build_color_report(0x10, 0x20, 0x30);

        transport.send_control(&report, false).unwrap();

        assert_eq!(
            recorder.calls(),
            vec![
                Call::SetReport(report.frame()),
                Call::Settle(Duration::from_millis(960)),
            ]
        );
    }

    #[test]
    fn test_skip_delay() {
        let (mut transport, recorder) = transport();
        transport
            .send_control(&build_brightness_report(3), true)
            .unwrap();

        assert_eq!(recorder.calls().len(), 1);
        assert_eq!(recorder.settles(), Vec::<Duration>::new());
    }

    #[test]
    fn test_short_write_is_error() {
        let (mut transport, recorder) = transport();
        recorder.push_set_reply(Reply::Count(12));

        let err = transport
            .send_control(&build_brightness_report(0), false)
            .unwrap_err();

        assert_eq!(
            err,
            TransportError::ShortWrite {
                expected: 64,
                actual: 12
            }
        );
        // Settle still applies
        assert_eq!(recorder.settles(), vec![Duration::from_millis(960)]);
    }

    #[test]
    fn test_long_write_is_error() {
        let (mut transport, recorder) = transport();
        recorder.push_set_reply(Reply::Count(65));

        let err = transport
            .send_control(&build_brightness_report(0), true)
            .unwrap_err();
        assert!(matches!(err, TransportError::ShortWrite { actual: 65, .. }));
    }

    #[test]
    fn test_device_error_passes_through() {
        let (mut transport, recorder) = transport();
        recorder.push_set_reply(Reply::Fail(TransportError::DeviceError("pipe".into())));

        let err = transport
            .send_control(&build_color_report(1, 2, 3), true)
            .unwrap_err();
        assert_eq!(err, TransportError::DeviceError("pipe".into()));
        // No retry
        assert_eq!(recorder.frames().len(), 1);
    }

    #[test]
    fn test_read_status() {
        let (mut transport, recorder) = transport();
        let mut bytes = [0u8; FRAME_SIZE];
        bytes[0] = 0x01;
        bytes[5] = 0x42;
        recorder.push_status(bytes);

        let status = transport.read_status().unwrap();
        assert_eq!(status.as_bytes(), &bytes);
        assert_eq!(recorder.calls(), vec![Call::GetReport]);
    }

    #[test]
    fn test_short_read_is_error() {
        let (mut transport, recorder) = transport();
        recorder.push_get_reply(Reply::Count(32));

        let err = transport.read_status().unwrap_err();
        assert_eq!(
            err,
            TransportError::ShortRead {
                expected: 64,
                actual: 32
            }
        );
    }

    #[test]
    fn test_read_status_requests_report_id() {
        let (mut transport, _recorder) = transport();
        let status = transport.read_status().unwrap();
        // The recording channel leaves the caller's report id in place
        assert_eq!(status.report_id(), control::STATUS_REPORT_ID);
    }
}
