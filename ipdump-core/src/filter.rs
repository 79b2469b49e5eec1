//! Address match predicate for the capture loop.

use std::net::Ipv4Addr;

use crate::error::ProtocolError;
use crate::protocol::{decode_addresses, ByteView};
use crate::render::ETHERNET_HEADER_LEN;

/// Matches frames whose IPv4 source or destination is a given address.
///
/// Only the two address fields are read; the rest of the header is not
/// decoded or validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressFilter {
    target: Ipv4Addr,
    link_header_len: usize,
}

impl AddressFilter {
    /// Filter for Ethernet frames.
    pub fn new(target: Ipv4Addr) -> Self {
        Self {
            target,
            link_header_len: ETHERNET_HEADER_LEN,
        }
    }

    pub fn with_link_header_len(mut self, len: usize) -> Self {
        self.link_header_len = len;
        self
    }

    pub fn target(&self) -> Ipv4Addr {
        self.target
    }

    /// `true` when the target is the frame's source or destination.
    pub fn should_skip(&self, frame: &[u8]) -> Result<bool, ProtocolError> {
        let mut view = ByteView::new(frame).layer("link");
        view.skip(self.link_header_len)?;

        let (source, destination) = decode_addresses(view)?;
        Ok(source == self.target || destination == self.target)
    }
}

/// [`AddressFilter::should_skip`] for an Ethernet frame.
pub fn should_skip(frame: &[u8], target: Ipv4Addr) -> Result<bool, ProtocolError> {
    AddressFilter::new(target).should_skip(frame)
}
