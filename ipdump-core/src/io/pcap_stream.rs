//! PCAP/PCAPNG block reader over any `Read` source, built on `pcap_parser`.

use std::io::{BufReader, Read};

use bytes::Bytes;
use pcap_parser::traits::PcapReaderIterator;
use pcap_parser::{LegacyPcapReader, PcapBlockOwned, PcapError, PcapNGReader};
use tracing::trace;

use crate::error::CaptureError;
use crate::io::RawPacket;

/// Buffer size for pcap_parser readers (256KB).
const BUFFER_SIZE: usize = 262144;

/// Format of the capture file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PcapFormat {
    /// Classic PCAP (little-endian, microseconds)
    LegacyLeMicro,
    /// Classic PCAP (big-endian, microseconds)
    LegacyBeMicro,
    /// Classic PCAP (little-endian, nanoseconds)
    LegacyLeNano,
    /// Classic PCAP (big-endian, nanoseconds)
    LegacyBeNano,
    /// PCAPNG format
    PcapNg,
}

impl PcapFormat {
    /// Detect the format from the first four (decompressed) bytes.
    pub fn detect(data: &[u8]) -> Result<Self, CaptureError> {
        let magic = match data {
            [a, b, c, d, ..] => u32::from_le_bytes([*a, *b, *c, *d]),
            _ => {
                return Err(CaptureError::InvalidFormat {
                    reason: "Data too small for PCAP magic".into(),
                })
            }
        };

        match magic {
            0xa1b2c3d4 => Ok(PcapFormat::LegacyLeMicro),
            0xd4c3b2a1 => Ok(PcapFormat::LegacyBeMicro),
            0xa1b23c4d => Ok(PcapFormat::LegacyLeNano),
            0x4d3cb2a1 => Ok(PcapFormat::LegacyBeNano),
            0x0a0d0d0a => Ok(PcapFormat::PcapNg),
            _ => Err(CaptureError::InvalidFormat {
                reason: format!("Unknown PCAP magic: 0x{:08x}", magic),
            }),
        }
    }

    pub fn is_pcapng(&self) -> bool {
        matches!(self, PcapFormat::PcapNg)
    }
}

/// Sequential frame reader for legacy PCAP and PCAPNG.
///
/// The link type starts as Ethernet and is updated from the file header
/// (legacy) or from each interface description block (PCAPNG).
pub struct GenericPcapReader<R: Read> {
    inner: ReaderInner<R>,
    frame_number: u64,
    link_type: u16,
}

enum ReaderInner<R: Read> {
    Legacy(LegacyPcapReader<BufReader<R>>),
    Ng(PcapNGReader<BufReader<R>>),
}

impl<R: Read> GenericPcapReader<R> {
    /// Create a reader for a source whose format is already known.
    pub fn with_format(source: R, format: PcapFormat) -> Result<Self, CaptureError> {
        let buf_reader = BufReader::with_capacity(BUFFER_SIZE, source);

        let inner = if format.is_pcapng() {
            let reader = PcapNGReader::new(BUFFER_SIZE, buf_reader).map_err(|e| {
                CaptureError::InvalidFormat {
                    reason: format!("Failed to parse PCAPNG: {}", e),
                }
            })?;
            ReaderInner::Ng(reader)
        } else {
            let reader = LegacyPcapReader::new(BUFFER_SIZE, buf_reader).map_err(|e| {
                CaptureError::InvalidFormat {
                    reason: format!("Failed to parse legacy PCAP: {}", e),
                }
            })?;
            ReaderInner::Legacy(reader)
        };

        Ok(GenericPcapReader {
            inner,
            frame_number: 0,
            link_type: 1,
        })
    }

    /// Read the next frame; `Ok(None)` at end of file.
    pub fn next_packet(&mut self) -> Result<Option<RawPacket>, CaptureError> {
        match &mut self.inner {
            ReaderInner::Legacy(reader) => {
                read_legacy_packet(reader, &mut self.frame_number, &mut self.link_type)
            }
            ReaderInner::Ng(reader) => {
                read_pcapng_packet(reader, &mut self.frame_number, &mut self.link_type)
            }
        }
    }

    /// Link type of the most recent header block (1 = Ethernet).
    pub fn link_type(&self) -> u16 {
        self.link_type
    }

    /// Frames returned so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_number
    }
}

fn read_legacy_packet<S: Read>(
    reader: &mut LegacyPcapReader<S>,
    frame_number: &mut u64,
    link_type: &mut u16,
) -> Result<Option<RawPacket>, CaptureError> {
    loop {
        match reader.next() {
            Ok((offset, block)) => match block {
                PcapBlockOwned::Legacy(packet) => {
                    *frame_number += 1;

                    let raw = RawPacket {
                        frame_number: *frame_number,
                        captured_length: packet.caplen,
                        original_length: packet.origlen,
                        link_type: *link_type,
                        data: Bytes::copy_from_slice(packet.data),
                    };

                    reader.consume(offset);
                    return Ok(Some(raw));
                }
                PcapBlockOwned::LegacyHeader(header) => {
                    *link_type = header.network.0 as u16;
                    trace!(link_type = *link_type, "legacy PCAP header");
                    reader.consume(offset);
                }
                _ => reader.consume(offset),
            },
            Err(PcapError::Eof) => return Ok(None),
            Err(PcapError::Incomplete(_)) => {
                reader.refill().map_err(|e| CaptureError::InvalidFormat {
                    reason: format!("Legacy PCAP refill error: {}", e),
                })?;
            }
            Err(e) => {
                return Err(CaptureError::InvalidFormat {
                    reason: format!("Legacy PCAP parse error: {}", e),
                });
            }
        }
    }
}

fn read_pcapng_packet<S: Read>(
    reader: &mut PcapNGReader<S>,
    frame_number: &mut u64,
    link_type: &mut u16,
) -> Result<Option<RawPacket>, CaptureError> {
    use pcap_parser::pcapng::Block;

    loop {
        match reader.next() {
            Ok((offset, PcapBlockOwned::NG(block))) => match block {
                Block::InterfaceDescription(idb) => {
                    *link_type = idb.linktype.0 as u16;
                    trace!(link_type = *link_type, "PCAPNG interface description");
                    reader.consume(offset);
                }
                Block::EnhancedPacket(epb) => {
                    *frame_number += 1;

                    let packet = RawPacket {
                        frame_number: *frame_number,
                        captured_length: epb.caplen,
                        original_length: epb.origlen,
                        link_type: *link_type,
                        data: Bytes::copy_from_slice(epb.data),
                    };

                    reader.consume(offset);
                    return Ok(Some(packet));
                }
                Block::SimplePacket(spb) => {
                    *frame_number += 1;

                    let packet = RawPacket {
                        frame_number: *frame_number,
                        captured_length: spb.data.len() as u32,
                        original_length: spb.origlen,
                        link_type: *link_type,
                        data: Bytes::copy_from_slice(spb.data),
                    };

                    reader.consume(offset);
                    return Ok(Some(packet));
                }
                _ => reader.consume(offset),
            },
            Ok((offset, _)) => reader.consume(offset),
            Err(PcapError::Eof) => return Ok(None),
            Err(PcapError::Incomplete(_)) => {
                reader.refill().map_err(|e| CaptureError::InvalidFormat {
                    reason: format!("PCAPNG refill error: {}", e),
                })?;
            }
            Err(e) => {
                return Err(CaptureError::InvalidFormat {
                    reason: format!("PCAPNG parse error: {}", e),
                });
            }
        }
    }
}
