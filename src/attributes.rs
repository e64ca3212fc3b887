//! Named attribute surface over a headset session
//!
//! Each attribute maps to one session operation. Payloads are raw bytes, the
//! way a sysfs file would see them: reads return the bytes a reader gets,
//! writes return the number of bytes consumed.

use std::fmt;
use std::str::FromStr;

use nari_headset::{HeadsetError, HeadsetSession, StaticColor};

/// Version string reported by the `version` attribute
pub const DRIVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Attributes exposed on the control interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// No-op read/write probe
    Test,
    Version,
    DeviceType,
    /// Write-only trigger for a status poll
    RequestReport,
    /// Write-only trigger that switches the lighting off
    MatrixEffectNone,
    /// RGB (3 bytes) or RGB + intensity (4 bytes); reads return the cached RGB
    MatrixEffectStatic,
}

impl Attribute {
    /// All attributes in exposure order
    pub const ALL: &'static [Attribute] = &[
        Attribute::Test,
        Attribute::Version,
        Attribute::DeviceType,
        Attribute::RequestReport,
        Attribute::MatrixEffectNone,
        Attribute::MatrixEffectStatic,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Test => "test",
            Attribute::Version => "version",
            Attribute::DeviceType => "device_type",
            Attribute::RequestReport => "request_report",
            Attribute::MatrixEffectNone => "matrix_effect_none",
            Attribute::MatrixEffectStatic => "matrix_effect_static",
        }
    }

    /// Unix permission bits of the attribute file
    pub fn mode(&self) -> u32 {
        match self {
            Attribute::Test | Attribute::MatrixEffectStatic => 0o660,
            Attribute::Version | Attribute::DeviceType => 0o440,
            Attribute::RequestReport | Attribute::MatrixEffectNone => 0o220,
        }
    }

    pub fn is_readable(&self) -> bool {
        self.mode() & 0o400 != 0
    }

    pub fn is_writable(&self) -> bool {
        self.mode() & 0o200 != 0
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Attribute {
    type Err = HeadsetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Attribute::ALL
            .iter()
            .copied()
            .find(|a| a.name() == s)
            .ok_or_else(|| HeadsetError::InvalidArgument(format!("unknown attribute '{s}'")))
    }
}

/// Attributes available on this session's interface
///
/// Only the interface without a boot protocol carries the control
/// attributes; other interfaces expose none.
pub fn exposed_attributes(session: &HeadsetSession) -> &'static [Attribute] {
    if session.exposes_attributes() {
        Attribute::ALL
    } else {
        &[]
    }
}

fn check_exposed(session: &HeadsetSession, attr: Attribute) -> Result<(), HeadsetError> {
    if session.exposes_attributes() {
        Ok(())
    } else {
        Err(HeadsetError::NotSupported(format!(
            "{attr}: interface does not expose attributes"
        )))
    }
}

/// Read an attribute
pub fn read_attribute(session: &HeadsetSession, attr: Attribute) -> Result<Vec<u8>, HeadsetError> {
    check_exposed(session, attr)?;

    let bytes = match attr {
        Attribute::Test => b"\n".to_vec(),
        Attribute::Version => format!("{DRIVER_VERSION}\n").into_bytes(),
        Attribute::DeviceType => format!("{}\n", session.model().name()).into_bytes(),
        Attribute::MatrixEffectStatic => {
            let (r, g, b) = session.get_static_color().as_tuple();
            vec![r, g, b]
        }
        Attribute::RequestReport | Attribute::MatrixEffectNone => {
            return Err(HeadsetError::NotSupported(format!("{attr} is write-only")));
        }
    };
    Ok(bytes)
}

/// Write an attribute, returning the number of payload bytes consumed
pub fn write_attribute(
    session: &HeadsetSession,
    attr: Attribute,
    payload: &[u8],
) -> Result<usize, HeadsetError> {
    check_exposed(session, attr)?;

    match attr {
        Attribute::Test => {}
        Attribute::RequestReport => {
            session.request_status()?;
        }
        Attribute::MatrixEffectNone => session.set_effect_none()?,
        Attribute::MatrixEffectStatic => {
            let color = StaticColor::from_payload(payload)?;
            session.apply_static_color(color)?;
        }
        Attribute::Version | Attribute::DeviceType => {
            return Err(HeadsetError::NotSupported(format!("{attr} is read-only")));
        }
    }
    Ok(payload.len())
}
