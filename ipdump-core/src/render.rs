//! Frame rendering: header summaries followed by a hex/ASCII payload dump.
//!
//! A rendered frame looks like:
//!
//! ```text
//! ================================ IP frame ================================
//! IP Header
//! -----------
//! | IP Version: 4
//! ...
//! | Destination_IP: 10.0.0.2
//!
//!
//!   | UDP Header
//!   | ============
//! ...
//!   | Checksum: 0
//!
//! Packet payload:
//! ===============
//! 68 69 0a                                                    hi.
//! ```

use std::fmt;
use std::io::Write;

use tracing::warn;

use crate::error::ProtocolError;
use crate::format::{dump_lines, DumpLine};
use crate::protocol::{
    decode_transport, ByteView, Ipv4Header, Ipv4Protocol, Protocol, TransportHeader,
};

/// Length of an Ethernet II header (no VLAN tag).
pub const ETHERNET_HEADER_LEN: usize = 14;

const FRAME_BANNER: &str =
    "================================ IP frame ================================";

/// Decodes and renders captured frames that carry an IPv4 datagram after a
/// fixed-length link header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRenderer {
    link_header_len: usize,
}

impl Default for FrameRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameRenderer {
    /// Renderer for Ethernet frames.
    pub fn new() -> Self {
        Self {
            link_header_len: ETHERNET_HEADER_LEN,
        }
    }

    /// Renderer skipping `len` bytes of link header (0 for raw IP).
    pub fn with_link_header_len(len: usize) -> Self {
        Self {
            link_header_len: len,
        }
    }

    pub fn link_header_len(&self) -> usize {
        self.link_header_len
    }

    /// Decode the first `length` bytes of `frame`.
    ///
    /// `length` counts the link header. IP header failures are returned;
    /// transport header failures are kept in [`DecodedFrame::transport`] and
    /// the payload then starts right after the IP header.
    pub fn decode<'a>(
        &self,
        frame: &'a [u8],
        length: usize,
    ) -> Result<DecodedFrame<'a>, ProtocolError> {
        let frame = frame.get(..length).ok_or(ProtocolError::TruncatedHeader {
            protocol: "frame",
            offset: 0,
            needed: length,
            have: frame.len(),
        })?;

        let mut view = ByteView::new(frame).layer("link");
        view.skip(self.link_header_len)?;

        let (ip, ip_len) = Ipv4Protocol.decode(view)?;
        let mut transport_view = view;
        transport_view.skip(ip_len)?;

        let (transport, consumed) = match decode_transport(ip.protocol, transport_view) {
            Ok((header, consumed)) => (Ok(header), consumed),
            Err(e) => {
                warn!(
                    "{} header not decoded, dumping from end of IP header: {e}",
                    ip.protocol_name()
                );
                (Err(e), 0)
            }
        };

        let mut payload_view = transport_view;
        payload_view.skip(consumed)?;

        Ok(DecodedFrame {
            ip,
            transport,
            payload_offset: payload_view.position(),
            payload: payload_view.rest(),
        })
    }

    /// Decode `frame` and write its report to `out`.
    ///
    /// Nothing is written when the IP header cannot be decoded.
    pub fn render<W: Write>(&self, frame: &[u8], length: usize, out: &mut W) -> crate::Result<()> {
        let decoded = self.decode(frame, length)?;
        write!(out, "{decoded}")?;
        Ok(())
    }
}

/// One decoded frame, borrowing its payload from the capture buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFrame<'a> {
    pub ip: Ipv4Header,
    pub transport: Result<TransportHeader, ProtocolError>,
    /// Bytes after the last decoded header, up to the declared length.
    pub payload: &'a [u8],
    /// Offset of `payload` from the start of the frame.
    pub payload_offset: usize,
}

impl<'a> DecodedFrame<'a> {
    pub fn dump_lines(&self) -> impl Iterator<Item = DumpLine<'a>> {
        dump_lines(self.payload)
    }
}

impl fmt::Display for DecodedFrame<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{FRAME_BANNER}")?;
        write!(f, "{}", self.ip)?;
        f.write_str("\n\n")?;

        match &self.transport {
            Ok(header) if header.is_unknown() => {}
            Ok(header) => writeln!(f, "{header}")?,
            Err(e) => writeln!(f, "  | {e}\n")?,
        }

        writeln!(f, "Packet payload:")?;
        writeln!(f, "===============")?;
        for line in self.dump_lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::format::LINE_WIDTH;
    use crate::protocol::test_utils::{
        ethernet_ipv4_frame, IcmpBuilder, Ipv4Builder, TcpBuilder, UdpBuilder,
    };

    fn render(frame: &[u8]) -> String {
        let mut out = Vec::new();
        FrameRenderer::new()
            .render(frame, frame.len(), &mut out)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    fn payload_lines(text: &str) -> Vec<&str> {
        text.split_once("Packet payload:\n===============\n")
            .map(|(_, dump)| dump.lines().collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_33_byte_payload_produces_three_lines() {
        let segment = UdpBuilder::new().payload(vec![b'x'; 33]).build();
        let frame = ethernet_ipv4_frame(Ipv4Builder::new().udp(), segment);

        let decoded = FrameRenderer::new().decode(&frame, frame.len()).unwrap();
        let lens: Vec<usize> = decoded.dump_lines().map(|l| l.bytes().len()).collect();
        assert_eq!(lens, vec![16, 16, 1]);
        assert_eq!(decoded.payload_offset, 14 + 20 + 8);

        let text = render(&frame);
        let lines = payload_lines(&text);
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.len() == LINE_WIDTH));
        assert!(lines[2].starts_with("78 "));
        assert!(lines[2].ends_with(&format!("x{}", " ".repeat(15))));
    }

    #[test]
    fn test_short_ip_header_writes_nothing() {
        let mut frame = vec![0u8; 14];
        frame.extend_from_slice(&[0x45, 0x00, 0x00, 0x14, 0x00, 0x01]);

        let mut out = Vec::new();
        let err = FrameRenderer::new()
            .render(&frame, frame.len(), &mut out)
            .unwrap_err();

        assert!(matches!(err, Error::Protocol(ref e) if e.is_truncated()));
        assert!(out.is_empty());
    }

    #[test]
    fn test_length_beyond_buffer_is_truncated() {
        let frame = ethernet_ipv4_frame(Ipv4Builder::new().udp(), UdpBuilder::new().build());

        let err = FrameRenderer::new()
            .decode(&frame, frame.len() + 1)
            .unwrap_err();

        assert_eq!(
            err,
            ProtocolError::TruncatedHeader {
                protocol: "frame",
                offset: 0,
                needed: frame.len() + 1,
                have: frame.len(),
            }
        );
    }

    #[test]
    fn test_length_shorter_than_link_header() {
        let err = FrameRenderer::new().decode(&[0u8; 10], 10).unwrap_err();

        assert_eq!(
            err,
            ProtocolError::TruncatedHeader {
                protocol: "link",
                offset: 0,
                needed: 14,
                have: 10,
            }
        );
    }

    #[test]
    fn test_declared_length_bounds_payload() {
        let segment = UdpBuilder::new().payload(vec![0xaa; 40]).build();
        let frame = ethernet_ipv4_frame(Ipv4Builder::new().udp(), segment);

        // Trailing bytes past the declared length are never dumped
        let decoded = FrameRenderer::new().decode(&frame, 14 + 20 + 8 + 5).unwrap();

        assert_eq!(decoded.payload.len(), 5);
    }

    #[test]
    fn test_unknown_protocol_dumps_from_ip_end() {
        let frame =
            ethernet_ipv4_frame(Ipv4Builder::new().protocol(89), vec![0x01, 0x02, 0x03]);

        let decoded = FrameRenderer::new().decode(&frame, frame.len()).unwrap();

        assert_eq!(decoded.transport, Ok(TransportHeader::Unknown { protocol: 89 }));
        assert_eq!(decoded.payload_offset, 34);
        assert_eq!(decoded.payload, &[0x01, 0x02, 0x03]);

        let text = render(&frame);
        assert!(text.contains("| Protocol: OSPF (89)\n"));
        assert!(text.contains("| Destination_IP: 192.168.1.2\n\n\nPacket payload:\n"));
    }

    #[test]
    fn test_transport_truncation_still_dumps() {
        // TCP needs 20 bytes; only 6 follow the IP header
        let frame = ethernet_ipv4_frame(
            Ipv4Builder::new().tcp(),
            vec![0x00, 0x50, 0x1f, 0x90, 0x00, 0x00],
        );

        let decoded = FrameRenderer::new().decode(&frame, frame.len()).unwrap();

        assert!(decoded.transport.as_ref().unwrap_err().is_truncated());
        assert_eq!(decoded.payload_offset, 34);
        assert_eq!(decoded.payload.len(), 6);

        let text = render(&frame);
        assert!(text.contains("  | TCP: truncated header"));
        assert_eq!(payload_lines(&text).len(), 1);
    }

    #[test]
    fn test_tcp_options_are_skipped() {
        let segment = TcpBuilder::new()
            .options(vec![0x01, 0x01, 0x01, 0x00])
            .payload(b"data".to_vec())
            .build();
        let frame = ethernet_ipv4_frame(Ipv4Builder::new().tcp(), segment);

        let decoded = FrameRenderer::new().decode(&frame, frame.len()).unwrap();

        assert_eq!(decoded.payload, b"data");
        assert_eq!(decoded.payload_offset, 14 + 20 + 24);
    }

    #[test]
    fn test_raw_ip_link() {
        let packet = Ipv4Builder::new()
            .icmp()
            .payload(IcmpBuilder::new().payload(vec![0x61; 4]).build())
            .build();

        let decoded = FrameRenderer::with_link_header_len(0)
            .decode(&packet, packet.len())
            .unwrap();

        assert!(matches!(decoded.transport, Ok(TransportHeader::Icmp(_))));
        assert_eq!(decoded.payload, b"aaaa");
    }

    #[test]
    fn test_golden_udp_frame() {
        let segment = UdpBuilder::new()
            .src_port(5353)
            .dst_port(5353)
            .payload(b"hi\n".to_vec())
            .build();
        let ip = Ipv4Builder::new()
            .udp()
            .identification(0x1c46)
            .flags_fragment(0x4000)
            .ttl(255)
            .checksum(0xb1e6)
            .src_ip([10, 0, 0, 1])
            .dst_ip([224, 0, 0, 251]);
        let frame = ethernet_ipv4_frame(ip, segment);

        let expected = format!(
            "{FRAME_BANNER}
IP Header
-----------
| IP Version: 4
| IP Hdr Length: 20
| DSCP: 0
| ECN: 0
| Total Length: 31
| Identification: 7238
| F_MF: 0
| F_DF: 1
| F_R: 0
| Fragment Offset: 0
| Time2Live: 255
| Protocol: UDP (17)
| Checksum: b1e6
| Source_IP: 10.0.0.1
| Destination_IP: 224.0.0.251


  | UDP Header
  | ============
  | Source_p: 5353
  | Dest_p: 5353
  | UDP Msg length: 11
  | Checksum: 0

Packet payload:
===============
68 69 0a {}          hi.{}
",
            "   ".repeat(13),
            " ".repeat(13)
        );

        assert_eq!(render(&frame), expected);
    }

    #[test]
    fn test_banner_width() {
        assert_eq!(FRAME_BANNER.len(), LINE_WIDTH);
    }
}
