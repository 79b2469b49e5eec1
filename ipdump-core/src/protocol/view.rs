//! Bounds-checked read window over a captured frame.

use crate::error::ProtocolError;

/// Read-only cursor over a frame.
///
/// Every read checks its span against the end of the window before touching
/// any byte and fails with [`ProtocolError::TruncatedHeader`] otherwise.
/// Multi-byte integers are read big-endian.
///
/// The view is `Copy`: decoders take it by value, read from their own copy and
/// report how many bytes they consumed, leaving the caller's position alone.
#[derive(Debug, Clone, Copy)]
pub struct ByteView<'a> {
    data: &'a [u8],
    pos: usize,
    layer: &'static str,
}

impl<'a> ByteView<'a> {
    /// Create a view over `data`, positioned at its first byte.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            layer: "frame",
        }
    }

    /// Same window and position, with errors attributed to `layer`.
    pub fn layer(self, layer: &'static str) -> Self {
        Self { layer, ..self }
    }

    /// Absolute offset of the cursor within the window.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left between the cursor and the end of the window.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Fail unless at least `len` bytes remain.
    pub fn ensure(&self, len: usize) -> Result<(), ProtocolError> {
        if self.remaining() < len {
            return Err(ProtocolError::TruncatedHeader {
                protocol: self.layer,
                offset: self.pos,
                needed: len,
                have: self.remaining(),
            });
        }
        Ok(())
    }

    /// Take the next `len` bytes and advance past them.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], ProtocolError> {
        self.ensure(len)?;
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Fixed-size variant of [`read_bytes`](Self::read_bytes).
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], ProtocolError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, ProtocolError> {
        let [b] = self.read_array::<1>()?;
        Ok(b)
    }

    pub fn read_u16(&mut self) -> Result<u16, ProtocolError> {
        self.read_array().map(u16::from_be_bytes)
    }

    pub fn read_u32(&mut self) -> Result<u32, ProtocolError> {
        self.read_array().map(u32::from_be_bytes)
    }

    /// Advance the cursor by `len` bytes without reading them.
    pub fn skip(&mut self, len: usize) -> Result<(), ProtocolError> {
        self.read_bytes(len).map(|_| ())
    }

    /// Everything from the cursor to the end of the window.
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }
}
