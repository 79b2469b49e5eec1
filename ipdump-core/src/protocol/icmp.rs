//! ICMP header decoder.

use std::fmt;

use crate::error::ProtocolError;

use super::{ByteView, Protocol};

/// ICMP header is always 8 bytes.
pub const HEADER_LEN: usize = 8;

/// ICMP type constants.
pub mod icmp_type {
    pub const ECHO_REPLY: u8 = 0;
    pub const DESTINATION_UNREACHABLE: u8 = 3;
    pub const REDIRECT: u8 = 5;
    pub const ECHO_REQUEST: u8 = 8;
    pub const TIME_EXCEEDED: u8 = 11;
}

/// Decoded ICMP header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IcmpHeader {
    pub icmp_type: u8,
    pub code: u8,
    pub checksum: u16,
    /// Bytes 4-7; meaning depends on the type and is not decoded further.
    pub rest_of_header: u32,
}

/// ICMP header decoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IcmpProtocol;

impl Protocol for IcmpProtocol {
    type Header = IcmpHeader;

    fn name(&self) -> &'static str {
        "icmp"
    }

    fn display_name(&self) -> &'static str {
        "ICMP"
    }

    fn decode(&self, view: ByteView<'_>) -> Result<(IcmpHeader, usize), ProtocolError> {
        let mut view = view.layer(self.display_name());
        view.ensure(HEADER_LEN)?;

        let header = IcmpHeader {
            icmp_type: view.read_u8()?,
            code: view.read_u8()?,
            checksum: view.read_u16()?,
            rest_of_header: view.read_u32()?,
        };

        Ok((header, HEADER_LEN))
    }
}

impl fmt::Display for IcmpHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  | ICMP Header")?;
        writeln!(f, "  | ===========")?;
        writeln!(f, "  | Type: {}", self.icmp_type)?;
        writeln!(f, "  | Code: {}", self.code)?;
        writeln!(f, "  | Checksum: {:x}", self.checksum)?;
        writeln!(f, "  | Rest of header: {:x}", self.rest_of_header)
    }
}
