//! TCP header decoder.
//!
//! ```text
//! bytes 0-1   source port
//! bytes 2-3   destination port
//! bytes 4-7   sequence number
//! bytes 8-11  acknowledgment number
//! byte 12     data offset in 32-bit words (bits 0-3) | reserved (bits 4-7)
//! byte 13     CWR, ECE (bits 0-1, ignored) | URG ACK PSH RST SYN FIN (bits 2-7)
//! bytes 14-15 window size
//! bytes 16-17 checksum
//! bytes 18-19 urgent pointer
//! ```

use std::fmt;

use crate::error::ProtocolError;

use super::{ByteView, Protocol};

/// Length of a TCP header without options.
pub const MIN_HEADER_LEN: usize = 20;

const MIN_DATA_OFFSET: u8 = 5;

/// TCP flags bit positions within byte 13.
pub mod flags {
    pub const FIN: u8 = 0x01;
    pub const SYN: u8 = 0x02;
    pub const RST: u8 = 0x04;
    pub const PSH: u8 = 0x08;
    pub const ACK: u8 = 0x10;
    pub const URG: u8 = 0x20;
    /// The six classic control bits.
    pub const MASK: u8 = 0x3f;
}

/// The six control bits of a TCP header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TcpFlags(u8);

impl TcpFlags {
    /// Keep only the six control bits of `byte`.
    pub fn from_bits(byte: u8) -> Self {
        Self(byte & flags::MASK)
    }

    pub fn bits(&self) -> u8 {
        self.0
    }

    pub fn urg(&self) -> bool {
        self.0 & flags::URG != 0
    }

    pub fn ack(&self) -> bool {
        self.0 & flags::ACK != 0
    }

    pub fn psh(&self) -> bool {
        self.0 & flags::PSH != 0
    }

    pub fn rst(&self) -> bool {
        self.0 & flags::RST != 0
    }

    pub fn syn(&self) -> bool {
        self.0 & flags::SYN != 0
    }

    pub fn fin(&self) -> bool {
        self.0 & flags::FIN != 0
    }

    /// Names of the set flags, most significant first.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        [
            (flags::URG, "URG"),
            (flags::ACK, "ACK"),
            (flags::PSH, "PSH"),
            (flags::RST, "RST"),
            (flags::SYN, "SYN"),
            (flags::FIN, "FIN"),
        ]
        .into_iter()
        .filter(move |(bit, _)| self.0 & bit != 0)
        .map(|(_, name)| name)
    }
}

impl fmt::Display for TcpFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.names().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}

/// Decoded TCP header. Options, if any, are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TcpHeader {
    pub src_port: u16,
    pub dst_port: u16,
    pub seq: u32,
    pub ack: u32,
    /// Header length in 32-bit words.
    pub data_offset: u8,
    pub flags: TcpFlags,
    pub window: u16,
    pub checksum: u16,
    pub urgent_ptr: u16,
}

impl TcpHeader {
    /// Header length in bytes (data offset × 4).
    #[inline]
    pub fn header_len(&self) -> usize {
        self.data_offset as usize * 4
    }
}

/// TCP header decoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TcpProtocol;

impl Protocol for TcpProtocol {
    type Header = TcpHeader;

    fn name(&self) -> &'static str {
        "tcp"
    }

    fn display_name(&self) -> &'static str {
        "TCP"
    }

    fn decode(&self, view: ByteView<'_>) -> Result<(TcpHeader, usize), ProtocolError> {
        let mut view = view.layer(self.display_name());
        let start = view;
        view.ensure(MIN_HEADER_LEN)?;

        let src_port = view.read_u16()?;
        let dst_port = view.read_u16()?;
        let seq = view.read_u32()?;
        let ack = view.read_u32()?;
        let data_offset = view.read_u8()? >> 4;
        if data_offset < MIN_DATA_OFFSET {
            return Err(ProtocolError::InvalidField {
                protocol: self.display_name(),
                field: "data_offset",
                reason: format!("{data_offset} words is below the {MIN_DATA_OFFSET}-word minimum"),
            });
        }
        let header_len = data_offset as usize * 4;
        start.ensure(header_len)?;

        let header = TcpHeader {
            src_port,
            dst_port,
            seq,
            ack,
            data_offset,
            flags: TcpFlags::from_bits(view.read_u8()?),
            window: view.read_u16()?,
            checksum: view.read_u16()?,
            urgent_ptr: view.read_u16()?,
        };

        Ok((header, header_len))
    }
}

impl fmt::Display for TcpHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  | TCP Header:")?;
        writeln!(f, "  | ============")?;
        writeln!(f, "  | Source_p: {}", self.src_port)?;
        writeln!(f, "  | Destination_p: {}", self.dst_port)?;
        writeln!(f, "  | Sequence: {}", self.seq)?;
        writeln!(f, "  | Ack: {}", self.ack)?;
        writeln!(f, "  | HDR length: {}", self.header_len())?;
        writeln!(f, "  | Flags: {:x} [{}]", self.flags.bits(), self.flags)?;
        writeln!(f, "  | Window: {}", self.window)?;
        writeln!(f, "  | Checksum: {:x}", self.checksum)?;
        writeln!(f, "  | Pointer: {:x}", self.urgent_ptr)
    }
}
