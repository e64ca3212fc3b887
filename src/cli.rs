// CLI definitions using clap

use clap::{Parser, Subcommand};
use nari_transport::Backend;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nari-driver")]
#[command(author, version, about = "Razer Nari headset Linux driver")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (default: ~/.config/nari/driver.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Transport backend (usb, hid)
    #[arg(long, global = true)]
    pub backend: Option<Backend>,

    /// Control transfer timeout in milliseconds
    #[arg(long, global = true, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Enable transport monitoring (prints all frames sent and received)
    #[arg(long, global = true)]
    pub monitor: bool,

    /// Preferred product id (e.g. 0x051A) when several headsets are attached
    #[arg(long, global = true, value_parser = parse_u16)]
    pub pid: Option<u16>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    // === Query Commands ===
    /// List attached headsets
    #[command(visible_alias = "ls")]
    List {
        /// Print device records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show device identity and cached settings
    #[command(visible_alias = "i")]
    Info,

    /// Poll the device status report
    #[command(visible_aliases = ["report", "st"])]
    Status {
        /// Print the raw 64 bytes as a single hex string
        #[arg(long)]
        hex: bool,
    },

    // === Set Commands ===
    /// Switch the lighting off
    #[command(visible_alias = "off")]
    None,

    /// Set a static color
    #[command(visible_alias = "color")]
    Static {
        /// Red component (0-255 or 0xNN)
        #[arg(value_parser = parse_byte)]
        r: u8,
        /// Green component (0-255 or 0xNN)
        #[arg(value_parser = parse_byte)]
        g: u8,
        /// Blue component (0-255 or 0xNN)
        #[arg(value_parser = parse_byte)]
        b: u8,
        /// Intensity byte (unverified device behavior)
        #[arg(value_parser = parse_byte)]
        intensity: Option<u8>,
    },

    /// Set lighting brightness
    #[command(visible_alias = "br")]
    Brightness {
        /// Brightness level (0-255 or 0xNN)
        #[arg(value_parser = parse_byte)]
        level: u8,
    },

    // === Attributes ===
    /// Read or write a named device attribute
    #[command(subcommand)]
    Attr(AttrCommands),
}

#[derive(Subcommand)]
pub enum AttrCommands {
    /// List attributes with their permissions
    List,

    /// Read an attribute
    Read {
        /// Attribute name (e.g. device_type, matrix_effect_static)
        name: String,
    },

    /// Write raw bytes to an attribute
    Write {
        /// Attribute name (e.g. matrix_effect_static)
        name: String,
        /// Payload bytes (0-255 or 0xNN each)
        #[arg(value_parser = parse_byte)]
        bytes: Vec<u8>,
    },
}

/// Parse a byte from decimal or 0x-prefixed hex
pub fn parse_byte(s: &str) -> Result<u8, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|_| format!("invalid byte '{s}' (expected 0-255 or 0x00-0xFF)"))
}

/// Parse a product id from hex (with or without 0x) or decimal
pub fn parse_u16(s: &str) -> Result<u16, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|_| format!("invalid product id '{s}' (e.g. 0x051A)"))
}
