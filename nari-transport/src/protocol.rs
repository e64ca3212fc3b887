//! Protocol constants and report building for Razer Nari headsets
//!
//! Every request is a 64-byte frame that starts with the same five header
//! bytes, followed by a four-byte sub-header naming the command family and
//! the command payload.
//!
//! ```text
//! [0..5)   FF 0A 00 FF 04      protocol header
//! [5..9)   12 F1 xx yy         sub-header (brightness / color)
//! [9..)    payload             level, or R G B [intensity]
//! ```

use std::fmt;
use std::time::Duration;

/// Size of every frame on the wire (request and response)
pub const FRAME_SIZE: usize = 64;

/// Nominal transfer length recorded in every request report
pub const REPORT_LENGTH: u8 = 64;

/// Fixed protocol header at bytes 0..5 of every request.
///
/// Byte 0 doubles as the HID report id (0xFF) on the feature-report backend.
pub const HEADER: [u8; 5] = [0xFF, 0x0A, 0x00, 0xFF, 0x04];

/// Command-family sub-headers (bytes 5..9)
pub mod subheader {
    /// Brightness / effect level
    pub const BRIGHTNESS: [u8; 4] = [0x12, 0xF1, 0x03, 0x71];
    /// Static RGB color
    pub const COLOR: [u8; 4] = [0x12, 0xF1, 0x05, 0x72];
}

/// Byte offsets inside a request frame
pub mod offset {
    pub const SUBHEADER: usize = 5;
    pub const PAYLOAD: usize = 9;
    /// Optional fourth color byte (unverified device behavior)
    pub const INTENSITY: usize = 12;
}

/// USB control-transfer fields
pub mod control {
    /// HID SET_REPORT bRequest
    pub const SET_REPORT: u8 = 0x09;
    /// HID GET_REPORT bRequest
    pub const GET_REPORT: u8 = 0x01;
    /// bmRequestType: class | interface | host-to-device
    pub const REQUEST_TYPE_OUT: u8 = 0x21;
    /// bmRequestType: class | interface | device-to-host
    pub const REQUEST_TYPE_IN: u8 = 0xA1;
    /// wValue for requests (feature report, id 0xFF)
    pub const SET_VALUE: u16 = 0x03FF;
    /// wValue for status polls (feature report, id 0x01)
    pub const GET_VALUE: u16 = 0x0301;
    /// Report id of the status feature report
    pub const STATUS_REPORT_ID: u8 = 0x01;
    /// Control interface number
    pub const INTERFACE: u8 = 5;
    /// Control transfer timeout (ms), matches USB_CTRL_SET_TIMEOUT
    pub const DEFAULT_TIMEOUT_MS: u64 = 5000;
}

/// Settle time per unit of declared report length (ms)
pub const SETTLE_MS_PER_UNIT: u64 = 15;

/// Command family of a request report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Bare template, header only
    Poll,
    Brightness,
    Color,
}

impl ReportKind {
    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Poll => "POLL",
            Self::Brightness => "BRIGHTNESS",
            Self::Color => "COLOR",
        }
    }

    /// Identify the command family from a raw frame
    pub fn detect(frame: &[u8]) -> Option<Self> {
        if frame.len() < offset::PAYLOAD || frame[..HEADER.len()] != HEADER {
            return None;
        }
        match &frame[offset::SUBHEADER..offset::PAYLOAD] {
            s if s == subheader::BRIGHTNESS => Some(Self::Brightness),
            s if s == subheader::COLOR => Some(Self::Color),
            [0, 0, 0, 0] => Some(Self::Poll),
            _ => None,
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fully specified request frame.
///
/// Built fresh for every exchange and never mutated in place; the only
/// modifier, [`RequestReport::with_intensity`], consumes the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestReport {
    kind: ReportKind,
    arguments: [u8; FRAME_SIZE],
    length: u8,
}

impl RequestReport {
    /// Command family
    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    /// Argument bytes, exactly as sent on the wire
    pub fn arguments(&self) -> &[u8; FRAME_SIZE] {
        &self.arguments
    }

    /// Declared transfer length used for the settle delay
    pub fn length(&self) -> u8 {
        self.length
    }

    /// Copy of the frame for a transfer buffer
    pub fn frame(&self) -> [u8; FRAME_SIZE] {
        self.arguments
    }

    /// Time the device needs before it accepts the next command
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.length as u64 * SETTLE_MS_PER_UNIT)
    }

    /// Append the fourth "intensity" byte of a color write at offset 12.
    ///
    /// Unverified device behavior: the byte is kept for compatibility with
    /// existing clients, no effect on hardware has been observed.
    pub fn with_intensity(mut self, intensity: u8) -> Self {
        self.arguments[offset::INTENSITY] = intensity;
        self
    }

    fn with_subheader(mut self, kind: ReportKind, subheader: [u8; 4]) -> Self {
        self.kind = kind;
        self.arguments[offset::SUBHEADER..offset::PAYLOAD].copy_from_slice(&subheader);
        self
    }

    fn with_payload(mut self, payload: &[u8]) -> Self {
        let len = payload.len().min(FRAME_SIZE - offset::PAYLOAD);
        self.arguments[offset::PAYLOAD..offset::PAYLOAD + len].copy_from_slice(&payload[..len]);
        self
    }
}

/// Build the shared template: zeroed frame with the protocol header
pub fn build_poll_report() -> RequestReport {
    let mut arguments = [0u8; FRAME_SIZE];
    arguments[..HEADER.len()].copy_from_slice(&HEADER);
    RequestReport {
        kind: ReportKind::Poll,
        arguments,
        length: REPORT_LENGTH,
    }
}

/// Build a brightness report. Level 0 switches the lighting off.
pub fn build_brightness_report(level: u8) -> RequestReport {
    build_poll_report()
        .with_subheader(ReportKind::Brightness, subheader::BRIGHTNESS)
        .with_payload(&[level])
}

/// Build a static color report
pub fn build_color_report(r: u8, g: u8, b: u8) -> RequestReport {
    build_poll_report()
        .with_subheader(ReportKind::Color, subheader::COLOR)
        .with_payload(&[r, g, b])
}

/// Format bytes as space-separated hex
pub fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}
