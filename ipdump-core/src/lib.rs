//! # ipdump-core
//!
//! IPv4 frame decoding and hex/ASCII dump rendering.
//!
//! The crate decodes the IPv4 header of a captured frame, the TCP, UDP or
//! ICMP header behind it, and renders a fixed-format text report: a header
//! summary per layer followed by a 16-bytes-per-line hex/ASCII dump of the
//! remaining payload. It also reads frames from PCAP/PCAPNG files.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ipdump_core::prelude::*;
//!
//! let mut reader = PcapReader::open("capture.pcap")?;
//! let mut out = std::io::stdout().lock();
//!
//! while let Some(packet) = reader.next_packet()? {
//!     let link = LinkLayer::from_link_type(packet.link_type)?;
//!     if link.carries_ipv4(&packet.data) {
//!         link.renderer()
//!             .render(&packet.data, packet.available_len(), &mut out)?;
//!     }
//! }
//! # Ok::<(), ipdump_core::Error>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |                          ipdump-core                                |
//! +---------------------------------------------------------------------+
//! |  protocol/   - ByteView, Protocol trait, IPv4/TCP/UDP/ICMP decoders |
//! |  format/     - Hex/ASCII dump lines                                 |
//! |  render      - FrameRenderer, DecodedFrame                          |
//! |  filter      - AddressFilter                                        |
//! |  io/         - PCAP/PCAPNG blocks, gzip, link-layer framing         |
//! |  pcap/       - File-based PcapReader                                |
//! |  error       - Error types                                          |
//! +---------------------------------------------------------------------+
//! ```

pub mod error;
pub mod filter;
pub mod format;
pub mod io;
pub mod pcap;
pub mod prelude;
pub mod protocol;
pub mod render;

use std::io::Write;
use std::net::Ipv4Addr;

// Re-export commonly used types at crate root for convenience
pub use error::{CaptureError, Error, ProtocolError, Result};
pub use filter::AddressFilter;
pub use format::{hex_dump, DumpLine};
pub use io::{LinkLayer, RawPacket};
pub use pcap::PcapReader;
pub use protocol::{lookup, ByteView, Protocol, TransportHeader, TransportProtocol};
pub use render::{DecodedFrame, FrameRenderer, ETHERNET_HEADER_LEN};

/// Render an Ethernet frame whose first `length` bytes are valid.
///
/// Shorthand for [`FrameRenderer::new`] followed by
/// [`FrameRenderer::render`].
pub fn render_frame<W: Write>(frame: &[u8], length: usize, out: &mut W) -> Result<()> {
    FrameRenderer::new().render(frame, length, out)
}

/// Whether an Ethernet frame's IPv4 source or destination is `target`.
pub fn should_skip(frame: &[u8], target: Ipv4Addr) -> std::result::Result<bool, ProtocolError> {
    filter::should_skip(frame, target)
}
