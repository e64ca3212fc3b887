//! MonitorChannel middleware for watching control traffic
//!
//! Wraps any `ControlChannel` and prints every frame passing through it.
//!
//! # Example
//!
//! ```ignore
//! use nari_transport::{ControlTransport, MonitorChannel};
//!
//! let channel = MonitorChannel::wrap(channel);
//! let transport = ControlTransport::new(channel);
//! // Now all requests and status reports will be printed
//! ```

use crossterm::style::Stylize;

use crate::channel::ControlChannel;
use crate::error::TransportError;
use crate::protocol::{self, ReportKind, FRAME_SIZE};

/// Transfer direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// SET_REPORT, host to device
    Out,
    /// GET_REPORT, device to host
    In,
}

/// Channel middleware that prints all transfers
pub struct MonitorChannel {
    inner: Box<dyn ControlChannel>,
}

impl MonitorChannel {
    /// Wrap a channel with printing middleware
    pub fn wrap(channel: Box<dyn ControlChannel>) -> Box<dyn ControlChannel> {
        Box::new(Self { inner: channel })
    }
}

/// Format one transfer as a single plain-text line
pub fn format_transfer(
    direction: Direction,
    frame: &[u8],
    result: &Result<usize, TransportError>,
) -> String {
    let label = match direction {
        Direction::Out => {
            let kind = ReportKind::detect(frame).map_or("UNKNOWN", |k| k.name());
            format!(">> SET_REPORT {kind:<10}")
        }
        Direction::In => format!("<< GET_REPORT id=0x{:02x}", frame.first().copied().unwrap_or(0)),
    };
    let status = match result {
        Ok(len) => format!("[{len}]"),
        Err(e) => format!("[error: {e}]"),
    };
    format!("{label} {status} {}", protocol::hex(frame))
}

fn print_transfer(direction: Direction, frame: &[u8], result: &Result<usize, TransportError>) {
    let line = format_transfer(direction, frame, result);
    match (direction, result) {
        (_, Err(_)) => println!("{}", line.red()),
        (_, Ok(len)) if *len != FRAME_SIZE => println!("{}", line.yellow()),
        (Direction::Out, Ok(_)) => println!("{}", line.cyan()),
        (Direction::In, Ok(_)) => println!("{}", line.green()),
    }
}

impl ControlChannel for MonitorChannel {
    fn set_report(&mut self, frame: &[u8; FRAME_SIZE]) -> Result<usize, TransportError> {
        let result = self.inner.set_report(frame);
        print_transfer(Direction::Out, frame, &result);
        result
    }

    fn get_report(&mut self, buf: &mut [u8; FRAME_SIZE]) -> Result<usize, TransportError> {
        let result = self.inner.get_report(buf);
        let len = match &result {
            Ok(len) => (*len).min(FRAME_SIZE),
            Err(_) => 1,
        };
        print_transfer(Direction::In, &buf[..len], &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::build_color_report;

    #[test]
    fn test_format_set_report() {
        let report = build_color_report(0x10, 0x20, 0x30);
        let line = format_transfer(Direction::Out, report.arguments(), &Ok(64));
        assert!(line.starts_with(">> SET_REPORT COLOR"));
        assert!(line.contains("[64]"));
        assert!(line.contains("ff 0a 00 ff 04 12 f1 05 72 10 20 30"));
    }

    #[test]
    fn test_format_failed_get_report() {
        let line = format_transfer(
            Direction::In,
            &[0x01],
            &Err(TransportError::DeviceError("timeout".into())),
        );
        assert!(line.starts_with("<< GET_REPORT id=0x01"));
        assert!(line.contains("error: Device error: timeout"));
    }

    #[test]
    fn test_monitor_passes_results_through() {
        let (channel, recorder) = crate::testing::RecordingChannel::new();
        recorder.push_set_reply(crate::testing::Reply::Count(10));
        let mut monitored = MonitorChannel::wrap(Box::new(channel));

        let frame = build_color_report(1, 2, 3).frame();
        assert_eq!(monitored.set_report(&frame), Ok(10));
        assert_eq!(recorder.frames(), vec![frame]);
    }
}
