//! Command-line argument definitions.

use std::net::Ipv4Addr;
use std::path::PathBuf;

use clap::Parser;

use super::{DumpOptions, HostFilter};

/// Print IPv4 header summaries and payload hex dumps from a capture file.
#[derive(Parser, Debug)]
#[command(name = "ipdump")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Capture file (.pcap or .pcapng, optionally gzip-compressed)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Render only frames whose source or destination is ADDR
    #[arg(long = "host", value_name = "ADDR", conflicts_with = "exclude_host")]
    pub host: Option<Ipv4Addr>,

    /// Drop frames whose source or destination is ADDR
    #[arg(long = "exclude-host", value_name = "ADDR")]
    pub exclude_host: Option<Ipv4Addr>,

    /// Stop after rendering N frames
    #[arg(short = 'c', long = "count", value_name = "N")]
    pub count: Option<u64>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Address filter selected on the command line, if any.
    pub fn host_filter(&self) -> Option<HostFilter> {
        self.host
            .map(HostFilter::Only)
            .or(self.exclude_host.map(HostFilter::Exclude))
    }

    pub fn dump_options(&self) -> DumpOptions {
        DumpOptions {
            host: self.host_filter(),
            count: self.count,
        }
    }

    /// Default log level for the `-v` count, used when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
