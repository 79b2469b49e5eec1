//! Fixed-width hex/ASCII dump lines.
//!
//! Each line covers up to 16 bytes:
//!
//! ```text
//! 47 45 54 20 2f 20 48 54 54 50 2f 31 2e 31 0d 0a           GET / HTTP/1.1..
//! |<-------------- 16 x "xx " = 48 ------------->|<- 10 ->|<---- 16 ---->|
//! ```
//!
//! Short lines pad both columns with spaces, so every line is exactly
//! [`LINE_WIDTH`] characters.

use std::fmt::{self, Write};

/// Bytes rendered per line.
pub const BYTES_PER_LINE: usize = 16;

/// Spaces between the hex and ASCII columns.
pub const GUTTER_WIDTH: usize = 10;

/// Width of the hex column ("xx " per byte).
pub const HEX_COLUMN_WIDTH: usize = 3 * BYTES_PER_LINE;

/// Visible characters in every rendered line.
pub const LINE_WIDTH: usize = HEX_COLUMN_WIDTH + GUTTER_WIDTH + BYTES_PER_LINE;

const GUTTER: &str = "          ";
const EMPTY_HEX_SLOT: &str = "   ";

/// ASCII column character for `byte`: itself when in 32..=126, `.` otherwise.
#[inline]
pub fn printable(byte: u8) -> char {
    if byte > 31 && byte < 127 {
        byte as char
    } else {
        '.'
    }
}

/// One dump line over at most [`BYTES_PER_LINE`] bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpLine<'a> {
    bytes: &'a [u8],
}

impl<'a> DumpLine<'a> {
    /// Returns `None` if `bytes` does not fit on one line.
    pub fn new(bytes: &'a [u8]) -> Option<Self> {
        (bytes.len() <= BYTES_PER_LINE).then_some(Self { bytes })
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Append this line (without a newline) to a caller-owned buffer.
    pub fn write_into(&self, buf: &mut String) {
        buf.reserve(LINE_WIDTH);
        // Writing to a String cannot fail
        let _ = write!(buf, "{self}");
    }
}

impl fmt::Display for DumpLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.bytes {
            write!(f, "{byte:02x} ")?;
        }
        for _ in self.bytes.len()..BYTES_PER_LINE {
            f.write_str(EMPTY_HEX_SLOT)?;
        }

        f.write_str(GUTTER)?;

        for &byte in self.bytes {
            f.write_char(printable(byte))?;
        }
        for _ in self.bytes.len()..BYTES_PER_LINE {
            f.write_char(' ')?;
        }
        Ok(())
    }
}

/// Split `data` into consecutive dump lines, the last one possibly short.
pub fn dump_lines(data: &[u8]) -> impl Iterator<Item = DumpLine<'_>> {
    data.chunks(BYTES_PER_LINE).map(|bytes| DumpLine { bytes })
}

/// Render `data` as newline-terminated dump lines.
///
/// ```
/// use ipdump_core::format::{hex_dump, LINE_WIDTH};
///
/// let text = hex_dump(b"ABC");
/// assert!(text.starts_with("41 42 43 "));
/// assert_eq!(text.len(), LINE_WIDTH + 1);
/// ```
pub fn hex_dump(data: &[u8]) -> String {
    let lines = data.len().div_ceil(BYTES_PER_LINE);
    let mut out = String::with_capacity(lines * (LINE_WIDTH + 1));
    for line in dump_lines(data) {
        line.write_into(&mut out);
        out.push('\n');
    }
    out
}
