//! Protocol registry: IP protocol mnemonics and the decoder trait.

use crate::error::ProtocolError;

use super::{ByteView, IcmpProtocol, TcpProtocol, TransportHeader, UdpProtocol};

/// IP protocol numbers with a registered mnemonic.
pub mod ip_protocol {
    pub const ICMP: u8 = 1;
    pub const IGMP: u8 = 2;
    pub const TCP: u8 = 6;
    pub const UDP: u8 = 17;
    /// IPv6 encapsulated in IP
    pub const ENCAP: u8 = 41;
    pub const OSPF: u8 = 89;
    pub const SCTP: u8 = 132;
}

/// Mnemonic for every protocol number without an entry.
pub const UNDEFINED: &str = "UNDEFINED";

const KNOWN_PROTOCOLS: [(u8, &str); 7] = [
    (ip_protocol::ICMP, "ICMP"),
    (ip_protocol::IGMP, "IGMP"),
    (ip_protocol::TCP, "TCP"),
    (ip_protocol::UDP, "UDP"),
    (ip_protocol::ENCAP, "ENCAP"),
    (ip_protocol::OSPF, "OSPF"),
    (ip_protocol::SCTP, "SCTP"),
];

/// One slot per possible protocol byte, filled at compile time.
static PROTOCOL_NAMES: [&str; 256] = build_name_table();

const fn build_name_table() -> [&'static str; 256] {
    let mut table = [UNDEFINED; 256];
    let mut i = 0;
    while i < KNOWN_PROTOCOLS.len() {
        let (number, name) = KNOWN_PROTOCOLS[i];
        table[number as usize] = name;
        i += 1;
    }
    table
}

/// Mnemonic for an IP protocol number, [`UNDEFINED`] when unassigned here.
///
/// ```
/// use ipdump_core::protocol::lookup;
///
/// assert_eq!(lookup(6), "TCP");
/// assert_eq!(lookup(255), "UNDEFINED");
/// ```
#[inline]
pub fn lookup(protocol: u8) -> &'static str {
    PROTOCOL_NAMES[protocol as usize]
}

/// Core trait all header decoders implement.
pub trait Protocol: Send + Sync {
    /// Decoded header produced by this protocol.
    type Header;

    /// Unique identifier for this protocol (e.g., "tcp").
    fn name(&self) -> &'static str;

    /// Human-readable display name.
    fn display_name(&self) -> &'static str {
        self.name()
    }

    /// Decode a header starting at the view's cursor.
    ///
    /// Returns the header and the number of bytes it occupies. The caller's
    /// view is not advanced.
    fn decode(&self, view: ByteView<'_>) -> Result<(Self::Header, usize), ProtocolError>;
}

/// Transport decoders selectable by IP protocol number.
///
/// Enum dispatch keeps the set closed: a protocol number either maps to one
/// of these or is rejected with [`ProtocolError::UnsupportedProtocol`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportProtocol {
    Icmp(IcmpProtocol),
    Tcp(TcpProtocol),
    Udp(UdpProtocol),
}

impl TransportProtocol {
    /// IP protocol number handled by this decoder.
    pub fn number(&self) -> u8 {
        match self {
            TransportProtocol::Icmp(_) => ip_protocol::ICMP,
            TransportProtocol::Tcp(_) => ip_protocol::TCP,
            TransportProtocol::Udp(_) => ip_protocol::UDP,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TransportProtocol::Icmp(p) => p.display_name(),
            TransportProtocol::Tcp(p) => p.display_name(),
            TransportProtocol::Udp(p) => p.display_name(),
        }
    }

    /// Run the selected decoder and wrap its header.
    pub fn decode(&self, view: ByteView<'_>) -> Result<(TransportHeader, usize), ProtocolError> {
        match self {
            TransportProtocol::Icmp(p) => p
                .decode(view)
                .map(|(h, len)| (TransportHeader::Icmp(h), len)),
            TransportProtocol::Tcp(p) => p
                .decode(view)
                .map(|(h, len)| (TransportHeader::Tcp(h), len)),
            TransportProtocol::Udp(p) => p
                .decode(view)
                .map(|(h, len)| (TransportHeader::Udp(h), len)),
        }
    }
}

impl TryFrom<u8> for TransportProtocol {
    type Error = ProtocolError;

    fn try_from(protocol: u8) -> Result<Self, Self::Error> {
        match protocol {
            ip_protocol::ICMP => Ok(TransportProtocol::Icmp(IcmpProtocol)),
            ip_protocol::TCP => Ok(TransportProtocol::Tcp(TcpProtocol)),
            ip_protocol::UDP => Ok(TransportProtocol::Udp(UdpProtocol)),
            other => Err(ProtocolError::UnsupportedProtocol { protocol: other }),
        }
    }
}
