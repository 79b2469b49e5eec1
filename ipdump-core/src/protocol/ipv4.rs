//! IPv4 header decoder.
//!
//! Layout of the fixed 20-byte prefix (RFC 791), bit 0 being the MSB of a byte:
//!
//! ```text
//! byte 0      version (bits 0-3) | IHL in 32-bit words (bits 4-7)
//! byte 1      DSCP (bits 0-5)    | ECN (bits 6-7)
//! bytes 2-3   total length
//! bytes 4-5   identification
//! byte 6      reserved (bit 0) | DF (bit 1) | MF (bit 2) | fragment offset high 5 bits
//! byte 7      fragment offset low 8 bits
//! byte 8      time to live
//! byte 9      protocol
//! bytes 10-11 header checksum
//! bytes 12-15 source address
//! bytes 16-19 destination address
//! ```

use std::fmt;
use std::net::Ipv4Addr;

use crate::error::ProtocolError;

use super::{lookup, ByteView, Protocol};

/// Length of an IPv4 header without options.
pub const MIN_HEADER_LEN: usize = 20;

/// Smallest legal IHL value (5 words = 20 bytes).
const MIN_IHL: u8 = 5;

const FLAG_RESERVED: u8 = 0x80;
const FLAG_DONT_FRAGMENT: u8 = 0x40;
const FLAG_MORE_FRAGMENTS: u8 = 0x20;
const FRAGMENT_OFFSET_HIGH: u8 = 0x1f;

/// The three single-bit flags from byte 6.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ipv4Flags {
    pub reserved: bool,
    pub dont_fragment: bool,
    pub more_fragments: bool,
}

impl Ipv4Flags {
    fn from_byte(byte: u8) -> Self {
        Self {
            reserved: byte & FLAG_RESERVED != 0,
            dont_fragment: byte & FLAG_DONT_FRAGMENT != 0,
            more_fragments: byte & FLAG_MORE_FRAGMENTS != 0,
        }
    }
}

/// Decoded IPv4 header. Options, if any, are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4Header {
    pub version: u8,
    /// Header length in 32-bit words.
    pub ihl: u8,
    pub dscp: u8,
    pub ecn: u8,
    pub total_length: u16,
    pub identification: u16,
    pub flags: Ipv4Flags,
    /// Fragment offset in 8-byte units (13 bits).
    pub fragment_offset: u16,
    pub ttl: u8,
    pub protocol: u8,
    /// As captured; never validated.
    pub checksum: u16,
    pub source: Ipv4Addr,
    pub destination: Ipv4Addr,
}

impl Ipv4Header {
    /// Header length in bytes (IHL × 4).
    #[inline]
    pub fn header_len(&self) -> usize {
        self.ihl as usize * 4
    }

    /// Registry mnemonic for the protocol field.
    pub fn protocol_name(&self) -> &'static str {
        lookup(self.protocol)
    }
}

/// IPv4 header decoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ipv4Protocol;

impl Protocol for Ipv4Protocol {
    type Header = Ipv4Header;

    fn name(&self) -> &'static str {
        "ipv4"
    }

    fn display_name(&self) -> &'static str {
        "IPv4"
    }

    fn decode(&self, view: ByteView<'_>) -> Result<(Ipv4Header, usize), ProtocolError> {
        let mut view = view.layer(self.display_name());
        let start = view;
        view.ensure(MIN_HEADER_LEN)?;

        let version_ihl = view.read_u8()?;
        let version = version_ihl >> 4;
        let ihl = version_ihl & 0x0f;
        if ihl < MIN_IHL {
            return Err(ProtocolError::InvalidField {
                protocol: self.display_name(),
                field: "ihl",
                reason: format!("{ihl} words is below the {MIN_IHL}-word minimum"),
            });
        }
        let header_len = ihl as usize * 4;
        start.ensure(header_len)?;

        let dscp_ecn = view.read_u8()?;
        let total_length = view.read_u16()?;
        let identification = view.read_u16()?;
        let [flags_frag, frag_low] = view.read_array::<2>()?;
        let ttl = view.read_u8()?;
        let protocol = view.read_u8()?;
        let checksum = view.read_u16()?;
        let source = Ipv4Addr::from(view.read_u32()?);
        let destination = Ipv4Addr::from(view.read_u32()?);

        let header = Ipv4Header {
            version,
            ihl,
            dscp: dscp_ecn >> 2,
            ecn: dscp_ecn & 0x03,
            total_length,
            identification,
            flags: Ipv4Flags::from_byte(flags_frag),
            fragment_offset: u16::from_be_bytes([flags_frag & FRAGMENT_OFFSET_HIGH, frag_low]),
            ttl,
            protocol,
            checksum,
            source,
            destination,
        };

        Ok((header, header_len))
    }
}

/// Read only the source and destination addresses of an IPv4 header.
///
/// Requires the fixed 20-byte prefix to be present; IHL is not inspected.
pub fn decode_addresses(view: ByteView<'_>) -> Result<(Ipv4Addr, Ipv4Addr), ProtocolError> {
    let mut view = view.layer("IPv4");
    view.ensure(MIN_HEADER_LEN)?;
    view.skip(12)?;
    let source = Ipv4Addr::from(view.read_u32()?);
    let destination = Ipv4Addr::from(view.read_u32()?);
    Ok((source, destination))
}

impl fmt::Display for Ipv4Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "IP Header")?;
        writeln!(f, "-----------")?;
        writeln!(f, "| IP Version: {}", self.version)?;
        writeln!(f, "| IP Hdr Length: {}", self.header_len())?;
        writeln!(f, "| DSCP: {:x}", self.dscp)?;
        writeln!(f, "| ECN: {:x}", self.ecn)?;
        writeln!(f, "| Total Length: {}", self.total_length)?;
        writeln!(f, "| Identification: {}", self.identification)?;
        writeln!(f, "| F_MF: {}", u8::from(self.flags.more_fragments))?;
        writeln!(f, "| F_DF: {}", u8::from(self.flags.dont_fragment))?;
        writeln!(f, "| F_R: {}", u8::from(self.flags.reserved))?;
        writeln!(f, "| Fragment Offset: {}", self.fragment_offset)?;
        writeln!(f, "| Time2Live: {}", self.ttl)?;
        writeln!(f, "| Protocol: {} ({})", self.protocol_name(), self.protocol)?;
        writeln!(f, "| Checksum: {:x}", self.checksum)?;
        writeln!(f, "| Source_IP: {}", self.source)?;
        writeln!(f, "| Destination_IP: {}", self.destination)
    }
}
