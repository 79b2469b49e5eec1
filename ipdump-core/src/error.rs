//! Error types for ipdump-core.
//!
//! This module provides structured error types for all ipdump-core operations:
//!
//! - [`enum@Error`] - Main error enum that wraps all error types
//! - [`CaptureError`] - Errors from capture file reading
//! - [`ProtocolError`] - Errors from header decoding
//!
//! All errors implement `std::error::Error` and can be converted to `anyhow::Error`.

use thiserror::Error;

/// Main error type for ipdump-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Error reading or parsing a capture file
    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    /// Error while decoding a frame
    #[error("Protocol decode error: {0}")]
    Protocol(#[from] ProtocolError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to capture file reading.
#[derive(Error, Debug)]
pub enum CaptureError {
    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Invalid PCAP/PCAPNG format
    #[error("Invalid capture format: {reason}")]
    InvalidFormat { reason: String },

    /// Link type the renderer cannot strip
    #[error("Unsupported link type: {link_type}")]
    UnsupportedLinkType { link_type: u16 },
}

/// Errors related to header decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Not enough bytes for a field or a declared header length
    #[error("{protocol}: truncated header (need {needed} bytes at offset {offset}, have {have})")]
    TruncatedHeader {
        protocol: &'static str,
        offset: usize,
        needed: usize,
        have: usize,
    },

    /// Invalid header field value
    #[error("{protocol}: invalid {field}: {reason}")]
    InvalidField {
        protocol: &'static str,
        field: &'static str,
        reason: String,
    },

    /// IP protocol number without a transport decoder
    #[error("unsupported transport protocol {protocol}")]
    UnsupportedProtocol { protocol: u8 },
}

impl ProtocolError {
    /// Whether this error stems from running out of bytes.
    pub fn is_truncated(&self) -> bool {
        matches!(self, ProtocolError::TruncatedHeader { .. })
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
