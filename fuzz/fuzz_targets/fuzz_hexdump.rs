//! Fuzz target for the hex/ASCII dump formatter.
//!
//! Every line must be exactly LINE_WIDTH characters, whatever the input.

#![no_main]

use ipdump_core::format::{dump_lines, hex_dump, LINE_WIDTH};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut total = 0;
    for line in dump_lines(data) {
        total += line.bytes().len();
        assert_eq!(line.to_string().len(), LINE_WIDTH);
    }
    assert_eq!(total, data.len());

    let text = hex_dump(data);
    assert!(text.lines().all(|l| l.len() == LINE_WIDTH));
});
