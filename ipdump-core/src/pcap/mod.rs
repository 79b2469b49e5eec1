//! Capture file reading.
//!
//! [`PcapReader`] opens a file, handles compression and yields
//! [`crate::io::RawPacket`]s.

mod reader;

pub use reader::PcapReader;
