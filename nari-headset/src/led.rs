//! LED and RGB lighting types

use std::fmt;

use crate::error::HeadsetError;

/// Brightness level that switches the lighting off ("none" effect)
pub const BRIGHTNESS_OFF: u8 = 0;

/// RGB color value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    /// Create a new RGB color
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn as_tuple(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A static color write: RGB plus the optional intensity byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticColor {
    pub color: RgbColor,
    /// Unverified device behavior, sent at frame offset 12
    pub intensity: Option<u8>,
}

impl StaticColor {
    /// Parse a raw attribute payload: exactly `R G B` or `R G B I`
    pub fn from_payload(payload: &[u8]) -> Result<Self, HeadsetError> {
        match *payload {
            [r, g, b] => Ok(Self {
                color: RgbColor::new(r, g, b),
                intensity: None,
            }),
            [r, g, b, i] => Ok(Self {
                color: RgbColor::new(r, g, b),
                intensity: Some(i),
            }),
            _ => Err(HeadsetError::InvalidArgument(format!(
                "static mode only accepts RGB (3 bytes) or RGB with intensity (4 bytes), got {} bytes",
                payload.len()
            ))),
        }
    }
}
