//! Raw control channel abstraction

use crate::error::TransportError;
use crate::protocol::FRAME_SIZE;

/// The raw I/O primitive - all backends implement this
///
/// A channel performs exactly one transfer per call and reports the byte
/// count the device accepted or returned. Length checks, settle delays and
/// serialization live above it, in `ControlTransport` and the session.
pub trait ControlChannel: Send {
    /// Issue SET_REPORT (request 0x09, value 0x03FF, interface 5) with a
    /// full frame
    ///
    /// # Returns
    /// Number of bytes transferred
    fn set_report(&mut self, frame: &[u8; FRAME_SIZE]) -> Result<usize, TransportError>;

    /// Issue GET_REPORT for the status feature report
    ///
    /// `buf[0]` holds the report id on entry.
    ///
    /// # Returns
    /// Number of bytes received
    fn get_report(&mut self, buf: &mut [u8; FRAME_SIZE]) -> Result<usize, TransportError>;
}
