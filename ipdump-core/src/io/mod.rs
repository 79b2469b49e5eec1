//! Capture file input.
//!
//! - [`GenericPcapReader`] walks PCAP/PCAPNG blocks over any `Read` source
//! - [`DecompressReader`] transparently un-gzips the source
//! - [`LinkLayer`] says how much link header precedes the IP datagram

mod decompress;
mod link;
mod pcap_stream;

use bytes::Bytes;

pub use decompress::{Compression, DecompressReader, FileDecoder};
pub use link::{linktype, LinkLayer, ETHERTYPE_IPV4};
pub use pcap_stream::{GenericPcapReader, PcapFormat};

/// One captured frame, owning its bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPacket {
    /// Frame number (1-indexed)
    pub frame_number: u64,
    /// Captured length (may be less than original)
    pub captured_length: u32,
    /// Original packet length on the wire
    pub original_length: u32,
    /// Link layer type (e.g., 1 = Ethernet)
    pub link_type: u16,
    pub data: Bytes,
}

impl RawPacket {
    /// Bytes actually present in the capture.
    ///
    /// The record's captured length, capped at the data really read.
    pub fn available_len(&self) -> usize {
        (self.captured_length as usize).min(self.data.len())
    }
}
