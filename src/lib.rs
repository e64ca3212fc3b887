//! Razer Nari userspace driver
//!
//! The session and transport layers live in `nari-headset` and
//! `nari-transport`. This crate adds the named attribute surface and the
//! driver configuration used by the `nari-driver` binary.

pub mod attributes;
pub mod config;

pub use attributes::{exposed_attributes, read_attribute, write_attribute, Attribute};
pub use config::DriverConfig;
