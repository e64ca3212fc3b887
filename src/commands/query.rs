//! Query (read-only) command handlers.

use super::{with_session, CommandResult, ConnectOptions};
use nari_headset::{list_headsets, DeviceModel};
use nari_transport::protocol;

/// List attached headsets
pub fn list(opts: &ConnectOptions, json: bool) -> CommandResult {
    let devices = list_headsets(opts.config.backend)?;
    if json {
        let infos: Vec<_> = devices.iter().map(|d| &d.info).collect();
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(());
    }
    if devices.is_empty() {
        println!("No Razer Nari headsets found ({} backend)", opts.config.backend);
        return Ok(());
    }

    println!("Found {} headset(s):", devices.len());
    for device in &devices {
        let info = &device.info;
        let protocol = info
            .interface_protocol
            .map_or_else(|| "?".to_string(), |p| p.to_string());
        println!(
            "  {:04x}:{:04x}  {:<20}  if={} proto={}  {}",
            info.vid,
            info.pid,
            DeviceModel::from_pid(info.pid).name(),
            info.interface_number,
            protocol,
            info.device_path
        );
    }
    Ok(())
}

/// Show device identity and cached settings
pub fn info(opts: &ConnectOptions) -> CommandResult {
    with_session(opts, |session| {
        let info = session.info();
        let settings = session.settings();
        println!("Device:     {}", session.model().name());
        println!("USB ID:     {:04x}:{:04x}", info.vid, info.pid);
        println!("Path:       {} ({})", info.device_path, info.backend);
        println!("Interface:  {}", info.interface_number);
        println!("Attributes: {}", if session.exposes_attributes() { "yes" } else { "no" });
        println!("Color:      {}", settings.color);
        println!("Brightness: {}", settings.brightness);
        if let Some(status) = session.last_status() {
            println!("Status:");
            for row in status.hex_rows() {
                println!("  {row}");
            }
        }
        Ok(())
    })
}

/// Poll the device status report
pub fn status(opts: &ConnectOptions, hex: bool) -> CommandResult {
    with_session(opts, |session| {
        let status = session.request_status()?;
        if hex {
            println!("{}", protocol::hex(status.as_bytes()));
        } else {
            println!("Status report (id 0x{:02x}):", status.report_id());
            for row in status.hex_rows() {
                println!("  {row}");
            }
        }
        Ok(())
    })
}
