//! Device registry - supported Razer Nari variants by PID
//!
//! All variants speak the same control protocol; the PID only selects the
//! human-readable device name.

/// Razer vendor ID
pub const VENDOR_ID: u16 = 0x1532;

/// Nari Ultimate, 2.4GHz wireless receiver
pub const PID_NARI_ULTIMATE_WIRELESS: u16 = 0x051A;
/// Nari Ultimate, USB cable
pub const PID_NARI_ULTIMATE_USB: u16 = 0x051B;
/// Nari, 2.4GHz wireless receiver
pub const PID_NARI_WIRELESS: u16 = 0x051C;
/// Nari, USB cable
pub const PID_NARI_USB: u16 = 0x051D;

/// All PIDs the driver binds to
pub const SUPPORTED_PIDS: &[u16] = &[
    PID_NARI_ULTIMATE_WIRELESS,
    PID_NARI_ULTIMATE_USB,
    PID_NARI_WIRELESS,
    PID_NARI_USB,
];

/// bInterfaceProtocol of the interface that carries the control protocol
pub const INTERFACE_PROTOCOL_NONE: u8 = 0;

/// Check if a VID/PID pair is a supported headset
#[inline]
pub fn is_supported(vid: u16, pid: u16) -> bool {
    vid == VENDOR_ID && SUPPORTED_PIDS.contains(&pid)
}

/// Headset model family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceModel {
    NariUltimate,
    Nari,
    Unknown,
}

impl DeviceModel {
    pub fn from_pid(pid: u16) -> Self {
        match pid {
            PID_NARI_ULTIMATE_WIRELESS | PID_NARI_ULTIMATE_USB => Self::NariUltimate,
            PID_NARI_WIRELESS | PID_NARI_USB => Self::Nari,
            _ => Self::Unknown,
        }
    }

    /// Friendly device type string
    pub fn name(&self) -> &'static str {
        match self {
            Self::NariUltimate => "Razer Nari Ultimate",
            Self::Nari => "Razer Nari",
            Self::Unknown => "Unknown Device",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_pids() {
        for &pid in SUPPORTED_PIDS {
            assert!(is_supported(VENDOR_ID, pid));
            assert_ne!(DeviceModel::from_pid(pid), DeviceModel::Unknown);
        }
    }

    #[test]
    fn test_foreign_vendor_not_supported() {
        assert!(!is_supported(0x3151, PID_NARI_USB));
        assert!(!is_supported(VENDOR_ID, 0x0000));
    }

    #[test]
    fn test_model_names() {
        assert_eq!(
            DeviceModel::from_pid(PID_NARI_ULTIMATE_USB).name(),
            "Razer Nari Ultimate"
        );
        assert_eq!(DeviceModel::from_pid(PID_NARI_WIRELESS).name(), "Razer Nari");
        assert_eq!(DeviceModel::from_pid(0x0510).name(), "Unknown Device");
    }
}
