//! Fuzz target for capture file parsing.
//!
//! Malformed PCAP/PCAPNG input must end in an error, never a panic, and
//! every frame read must go through the renderer without panicking.

#![no_main]

use std::io::Cursor;

use ipdump_core::io::{GenericPcapReader, LinkLayer, PcapFormat};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(format) = PcapFormat::detect(data) else {
        return;
    };
    let Ok(mut reader) = GenericPcapReader::with_format(Cursor::new(data), format) else {
        return;
    };

    while let Ok(Some(packet)) = reader.next_packet() {
        if let Ok(link) = LinkLayer::from_link_type(packet.link_type) {
            let frame = &packet.data[..packet.available_len()];
            let mut out = Vec::new();
            let _ = link.renderer().render(frame, frame.len(), &mut out);
        }
    }
});
