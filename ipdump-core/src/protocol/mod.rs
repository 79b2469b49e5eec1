//! Header decoding framework.
//!
//! This module provides:
//! - [`ByteView`], the bounds-checked window every decoder reads through
//! - [`Protocol`] trait implemented by each header decoder
//! - [`lookup`] for IP protocol mnemonics
//! - [`decode_transport`], which picks a transport decoder by protocol number
//!
//! ## Supported Protocols
//!
//! | Layer | Protocols |
//! |-------|-----------|
//! | Network | IPv4 |
//! | Transport | TCP, UDP, ICMP |
//!
//! ## Example
//!
//! ```rust
//! use ipdump_core::protocol::{decode_transport, ByteView, Ipv4Protocol, Protocol};
//!
//! let packet: &[u8] = &[
//!     0x45, 0x00, 0x00, 0x1c, 0x00, 0x00, 0x00, 0x00, // IPv4, IHL 5
//!     0x40, 0x11, 0x00, 0x00, // TTL 64, UDP
//!     10, 0, 0, 1, 10, 0, 0, 2, // addresses
//!     0x00, 0x35, 0x00, 0x35, 0x00, 0x08, 0x00, 0x00, // UDP 53 -> 53
//! ];
//!
//! let view = ByteView::new(packet);
//! let (ip, ip_len) = Ipv4Protocol.decode(view).unwrap();
//!
//! let mut rest = view;
//! rest.skip(ip_len).unwrap();
//! let (transport, consumed) = decode_transport(ip.protocol, rest).unwrap();
//! assert_eq!(consumed, 8);
//! println!("{ip}{transport}");
//! ```

mod icmp;
mod ipv4;
mod registry;
mod tcp;
mod udp;
mod view;

// Test utilities (only compiled for tests)
#[cfg(test)]
pub mod test_utils;

use std::fmt;

use tracing::debug;

use crate::error::ProtocolError;

pub use icmp::{icmp_type, IcmpHeader, IcmpProtocol};
pub use ipv4::{decode_addresses, Ipv4Flags, Ipv4Header, Ipv4Protocol};
pub use registry::{ip_protocol, lookup, Protocol, TransportProtocol, UNDEFINED};
pub use tcp::{flags as tcp_flags, TcpFlags, TcpHeader, TcpProtocol};
pub use udp::{UdpHeader, UdpProtocol};
pub use view::ByteView;

/// Decoded transport-layer header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportHeader {
    Tcp(TcpHeader),
    Udp(UdpHeader),
    Icmp(IcmpHeader),
    /// No decoder for this protocol number; nothing was consumed.
    Unknown { protocol: u8 },
}

impl TransportHeader {
    /// Bytes this header occupies in the frame.
    pub fn header_len(&self) -> usize {
        match self {
            TransportHeader::Tcp(tcp) => tcp.header_len(),
            TransportHeader::Udp(_) => udp::HEADER_LEN,
            TransportHeader::Icmp(_) => icmp::HEADER_LEN,
            TransportHeader::Unknown { .. } => 0,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, TransportHeader::Unknown { .. })
    }
}

/// Summary text; empty for [`TransportHeader::Unknown`].
impl fmt::Display for TransportHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportHeader::Tcp(tcp) => tcp.fmt(f),
            TransportHeader::Udp(udp) => udp.fmt(f),
            TransportHeader::Icmp(icmp) => icmp.fmt(f),
            TransportHeader::Unknown { .. } => Ok(()),
        }
    }
}

/// Decode the transport header selected by an IP protocol number.
///
/// Protocols without a decoder yield [`TransportHeader::Unknown`] and zero
/// consumed bytes. Decoder failures (truncation, malformed length fields)
/// are returned as errors.
pub fn decode_transport(
    protocol: u8,
    view: ByteView<'_>,
) -> Result<(TransportHeader, usize), ProtocolError> {
    match TransportProtocol::try_from(protocol) {
        Ok(transport) => transport.decode(view),
        Err(e) => {
            debug!("{e} ({}), dumping from end of IP header", lookup(protocol));
            Ok((TransportHeader::Unknown { protocol }, 0))
        }
    }
}
