//! Text formatting for captured bytes.
//!
//! Provides the fixed-width hex/ASCII dump used for frame payloads.

mod hexdump;

pub use hexdump::{
    dump_lines, hex_dump, printable, DumpLine, BYTES_PER_LINE, GUTTER_WIDTH, HEX_COLUMN_WIDTH,
    LINE_WIDTH,
};
