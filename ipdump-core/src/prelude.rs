//! Convenient re-exports for common usage.
//!
//! ```rust
//! use ipdump_core::prelude::*;
//!
//! let renderer = FrameRenderer::new();
//! assert_eq!(renderer.link_header_len(), 14);
//! ```

// Decoding
pub use crate::protocol::{
    decode_transport, lookup, ByteView, IcmpHeader, Ipv4Header, Protocol, TcpHeader,
    TransportHeader, UdpHeader,
};

// Rendering and filtering
pub use crate::filter::AddressFilter;
pub use crate::format::{dump_lines, DumpLine};
pub use crate::render::{DecodedFrame, FrameRenderer};

// Capture input
pub use crate::io::{LinkLayer, RawPacket};
pub use crate::pcap::PcapReader;

// Errors
pub use crate::error::{CaptureError, Error, ProtocolError, Result};
