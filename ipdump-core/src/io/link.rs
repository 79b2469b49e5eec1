//! Link-layer framing in front of the IP datagram.

use std::net::Ipv4Addr;

use crate::error::CaptureError;
use crate::filter::AddressFilter;
use crate::render::{FrameRenderer, ETHERNET_HEADER_LEN};

/// LINKTYPE_* values from the capture file header.
pub mod linktype {
    pub const ETHERNET: u16 = 1;
    /// Raw IP, version taken from the first nibble.
    pub const RAW: u16 = 101;
    /// Raw IPv4 only.
    pub const IPV4: u16 = 228;
}

/// EtherType carried by IPv4 frames.
pub const ETHERTYPE_IPV4: u16 = 0x0800;

/// Framing the renderer knows how to strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkLayer {
    /// Ethernet II, 14-byte header.
    Ethernet,
    /// No link header; the frame starts with the IP header.
    RawIp,
}

impl LinkLayer {
    pub fn from_link_type(link_type: u16) -> Result<Self, CaptureError> {
        match link_type {
            linktype::ETHERNET => Ok(LinkLayer::Ethernet),
            linktype::RAW | linktype::IPV4 => Ok(LinkLayer::RawIp),
            _ => Err(CaptureError::UnsupportedLinkType { link_type }),
        }
    }

    /// Bytes in front of the IP header.
    pub fn header_len(&self) -> usize {
        match self {
            LinkLayer::Ethernet => ETHERNET_HEADER_LEN,
            LinkLayer::RawIp => 0,
        }
    }

    /// Whether `frame` carries an IPv4 datagram after the link header.
    pub fn carries_ipv4(&self, frame: &[u8]) -> bool {
        match self {
            LinkLayer::Ethernet => match frame.get(12..14) {
                Some(&[hi, lo]) => u16::from_be_bytes([hi, lo]) == ETHERTYPE_IPV4,
                _ => false,
            },
            LinkLayer::RawIp => frame.first().is_some_and(|b| b >> 4 == 4),
        }
    }

    /// Renderer that skips this link header.
    pub fn renderer(&self) -> FrameRenderer {
        FrameRenderer::with_link_header_len(self.header_len())
    }

    /// Address filter that skips this link header.
    pub fn filter(&self, target: Ipv4Addr) -> AddressFilter {
        AddressFilter::new(target).with_link_header_len(self.header_len())
    }
}
