//! UDP header decoder.

use std::fmt;

use crate::error::ProtocolError;

use super::{ByteView, Protocol};

/// UDP header is always 8 bytes.
pub const HEADER_LEN: usize = 8;

/// Decoded UDP header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UdpHeader {
    pub src_port: u16,
    pub dst_port: u16,
    /// Header plus payload, as declared by the sender.
    pub length: u16,
    pub checksum: u16,
}

/// UDP header decoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UdpProtocol;

impl Protocol for UdpProtocol {
    type Header = UdpHeader;

    fn name(&self) -> &'static str {
        "udp"
    }

    fn display_name(&self) -> &'static str {
        "UDP"
    }

    /// Consumes exactly [`HEADER_LEN`] bytes; the declared `length` is
    /// reported but never used to bound the payload.
    fn decode(&self, view: ByteView<'_>) -> Result<(UdpHeader, usize), ProtocolError> {
        let mut view = view.layer(self.display_name());
        view.ensure(HEADER_LEN)?;

        let header = UdpHeader {
            src_port: view.read_u16()?,
            dst_port: view.read_u16()?,
            length: view.read_u16()?,
            checksum: view.read_u16()?,
        };

        Ok((header, HEADER_LEN))
    }
}

impl fmt::Display for UdpHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  | UDP Header")?;
        writeln!(f, "  | ============")?;
        writeln!(f, "  | Source_p: {}", self.src_port)?;
        writeln!(f, "  | Dest_p: {}", self.dst_port)?;
        writeln!(f, "  | UDP Msg length: {}", self.length)?;
        writeln!(f, "  | Checksum: {:x}", self.checksum)
    }
}
