//! Fuzz target for the frame renderer and address filter.
//!
//! Arbitrary bytes are treated both as an Ethernet frame and as a raw IP
//! packet. Decoding may fail but must never panic or read past the declared
//! length.

#![no_main]

use std::net::Ipv4Addr;

use ipdump_core::{should_skip, FrameRenderer};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let target = Ipv4Addr::new(10, 0, 0, 1);

    for renderer in [FrameRenderer::new(), FrameRenderer::with_link_header_len(0)] {
        let mut out = Vec::new();
        if renderer.render(data, data.len(), &mut out).is_err() {
            assert!(out.is_empty());
        }

        // Declared length past the buffer must be refused
        assert!(renderer.decode(data, data.len() + 1).is_err());

        if let Ok(frame) = renderer.decode(data, data.len()) {
            assert!(frame.payload_offset + frame.payload.len() == data.len());
        }
    }

    let _ = should_skip(data, target);
});
