//! Capture file reader with automatic gzip handling.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use tracing::debug;

use crate::error::{CaptureError, Error};
use crate::io::{
    Compression, FileDecoder, GenericPcapReader, LinkLayer, PcapFormat, RawPacket,
};

/// Reader for PCAP and PCAPNG files, optionally gzip-compressed.
///
/// A thin wrapper around [`GenericPcapReader`] that opens the file, detects
/// compression from the first bytes and the capture format from the
/// decompressed magic number.
///
/// ```no_run
/// use ipdump_core::pcap::PcapReader;
///
/// let mut reader = PcapReader::open("capture.pcap.gz")?;
/// while let Some(packet) = reader.next_packet()? {
///     println!("Frame {}: {} bytes", packet.frame_number, packet.data.len());
/// }
/// # Ok::<(), ipdump_core::Error>(())
/// ```
pub struct PcapReader {
    inner: GenericPcapReader<FileDecoder>,
    compression: Compression,
    format: PcapFormat,
}

impl PcapReader {
    /// Open a capture file for reading.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();

        let mut file = open_file(path)?;
        let compression = Compression::detect(&read_magic(&mut file)?);
        file.seek(SeekFrom::Start(0))?;

        // Magic number of the decompressed stream
        let mut probe = FileDecoder::new(file, compression);
        let format = PcapFormat::detect(&read_magic(&mut probe)?)?;
        drop(probe);

        // Fresh decoder from the start; gzip streams cannot seek
        let decoder = FileDecoder::new(open_file(path)?, compression);
        let inner = GenericPcapReader::with_format(decoder, format)?;

        debug!(
            path = %path.display(),
            %compression,
            ?format,
            "opened capture file"
        );

        Ok(Self {
            inner,
            compression,
            format,
        })
    }

    /// Link type of the capture (e.g., 1 = Ethernet).
    #[inline]
    pub fn link_type(&self) -> u16 {
        self.inner.link_type()
    }

    /// Link framing for the current link type.
    ///
    /// Only meaningful once a packet has been read; until then the header
    /// block has not been parsed.
    pub fn link_layer(&self) -> Result<LinkLayer, CaptureError> {
        LinkLayer::from_link_type(self.link_type())
    }

    pub fn compression(&self) -> Compression {
        self.compression
    }

    pub fn format(&self) -> PcapFormat {
        self.format
    }

    /// Frames returned so far.
    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.inner.frame_count()
    }

    /// Read the next frame; `Ok(None)` at end of file.
    #[inline]
    pub fn next_packet(&mut self) -> Result<Option<RawPacket>, Error> {
        Ok(self.inner.next_packet()?)
    }
}

/// Iterator adapter for PcapReader.
impl Iterator for PcapReader {
    type Item = Result<RawPacket, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_packet().transpose()
    }
}

fn open_file(path: &Path) -> Result<File, Error> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => CaptureError::FileNotFound {
            path: path.display().to_string(),
        }
        .into(),
        _ => Error::Io(e),
    })
}

fn read_magic<R: Read>(source: &mut R) -> Result<[u8; 4], Error> {
    let mut magic = [0u8; 4];
    source.read_exact(&mut magic).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => CaptureError::InvalidFormat {
            reason: "File too short to read magic number".to_string(),
        }
        .into(),
        _ => Error::Io(e),
    })?;
    Ok(magic)
}
