//! Attribute command handlers.

use super::{with_session, CommandResult, ConnectOptions};
use nari_driver::attributes::{self, Attribute};
use nari_transport::protocol;

/// List attributes with their permissions
pub fn list(opts: &ConnectOptions) -> CommandResult {
    with_session(opts, |session| {
        let exposed = attributes::exposed_attributes(session);
        if exposed.is_empty() {
            println!("This interface exposes no attributes");
        }
        for attr in exposed {
            let access = match (attr.is_readable(), attr.is_writable()) {
                (true, true) => "rw",
                (true, false) => "r-",
                (false, true) => "-w",
                (false, false) => "--",
            };
            println!("  {:04o} {access}  {}", attr.mode(), attr.name());
        }
        Ok(())
    })
}

/// Read an attribute and print it
pub fn read(opts: &ConnectOptions, name: &str) -> CommandResult {
    let attr: Attribute = name.parse()?;
    with_session(opts, |session| {
        let bytes = attributes::read_attribute(session, attr)?;
        match std::str::from_utf8(&bytes) {
            Ok(text) if attr != Attribute::MatrixEffectStatic => print!("{text}"),
            _ => println!("{}", protocol::hex(&bytes)),
        }
        Ok(())
    })
}

/// Write raw bytes to an attribute
pub fn write(opts: &ConnectOptions, name: &str, bytes: &[u8]) -> CommandResult {
    let attr: Attribute = name.parse()?;
    with_session(opts, |session| {
        let written = attributes::write_attribute(session, attr, bytes)?;
        println!("{attr}: {written} byte(s) written");
        Ok(())
    })
}
