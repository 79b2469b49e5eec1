//! ipdump - print IPv4 header summaries and payload hex dumps from capture
//! files.
//!
//! Decoding and rendering live in [`ipdump_core`]; this crate adds the
//! command line and the frame loop.
//!
//! # Example
//!
//! ```no_run
//! use ipdump::cli::{DumpOptions, FrameDumper};
//! use ipdump_core::PcapReader;
//!
//! let reader = PcapReader::open("capture.pcap")?;
//! let stats = FrameDumper::new(DumpOptions::default()).run(reader, &mut std::io::stdout())?;
//! eprintln!("{} frames rendered", stats.rendered);
//! # Ok::<(), ipdump_core::Error>(())
//! ```

pub mod cli;
