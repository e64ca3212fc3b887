//! Set (write) command handlers.

use super::{with_session, CommandResult, ConnectOptions};
use nari_headset::RgbColor;

/// Switch the lighting off
pub fn none(opts: &ConnectOptions) -> CommandResult {
    with_session(opts, |session| {
        match session.set_effect_none() {
            Ok(()) => println!("Lighting off"),
            Err(e) => eprintln!("Failed to set effect: {e}"),
        }
        Ok(())
    })
}

/// Set a static color
pub fn set_static(
    opts: &ConnectOptions,
    r: u8,
    g: u8,
    b: u8,
    intensity: Option<u8>,
) -> CommandResult {
    with_session(opts, |session| {
        match session.set_static_color(r, g, b, intensity) {
            Ok(()) => match intensity {
                Some(i) => println!("Static color set to {} (intensity {i})", RgbColor::new(r, g, b)),
                None => println!("Static color set to {}", RgbColor::new(r, g, b)),
            },
            Err(e) => eprintln!("Failed to set color: {e}"),
        }
        Ok(())
    })
}

/// Set lighting brightness
pub fn brightness(opts: &ConnectOptions, level: u8) -> CommandResult {
    with_session(opts, |session| {
        match session.set_brightness(level) {
            Ok(()) => println!("Brightness set to {level}"),
            Err(e) => eprintln!("Failed to set brightness: {e}"),
        }
        Ok(())
    })
}
