//! The frame loop: filter, render and count captured frames.

use std::io::Write;
use std::net::Ipv4Addr;

use tracing::{debug, warn};

use ipdump_core::{Error, LinkLayer, RawPacket, Result};

/// Address filter chosen on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostFilter {
    /// Keep only frames to or from the address.
    Only(Ipv4Addr),
    /// Drop frames to or from the address.
    Exclude(Ipv4Addr),
}

impl HostFilter {
    pub fn address(&self) -> Ipv4Addr {
        match self {
            HostFilter::Only(addr) | HostFilter::Exclude(addr) => *addr,
        }
    }

    /// Whether a frame is dropped given whether it involves the address.
    pub fn drops(&self, matched: bool) -> bool {
        match self {
            HostFilter::Only(_) => !matched,
            HostFilter::Exclude(_) => matched,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DumpOptions {
    pub host: Option<HostFilter>,
    /// Stop after this many rendered frames.
    pub count: Option<u64>,
}

/// Per-run frame counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DumpStats {
    pub read: u64,
    pub rendered: u64,
    pub not_ipv4: u64,
    pub filtered: u64,
    pub malformed: u64,
}

/// Renders every IPv4 frame of a capture that passes the host filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameDumper {
    options: DumpOptions,
}

impl FrameDumper {
    pub fn new(options: DumpOptions) -> Self {
        Self { options }
    }

    /// Render `frames` to `out`.
    ///
    /// Frames with a malformed IP header are logged and skipped. Read errors,
    /// write errors and unsupported link types end the run.
    pub fn run<I, W>(&self, frames: I, out: &mut W) -> Result<DumpStats>
    where
        I: IntoIterator<Item = Result<RawPacket>>,
        W: Write,
    {
        let mut stats = DumpStats::default();

        for packet in frames {
            if self.limit_reached(&stats) {
                break;
            }

            let packet = packet?;
            stats.read += 1;

            let link = LinkLayer::from_link_type(packet.link_type)?;
            let frame = &packet.data[..packet.available_len()];

            if !link.carries_ipv4(frame) {
                debug!(frame = packet.frame_number, "not an IPv4 frame, skipped");
                stats.not_ipv4 += 1;
                continue;
            }

            if let Some(host) = self.options.host {
                match link.filter(host.address()).should_skip(frame) {
                    Ok(matched) if host.drops(matched) => {
                        stats.filtered += 1;
                        continue;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!(frame = packet.frame_number, "{e}");
                        stats.malformed += 1;
                        continue;
                    }
                }
            }

            match link.renderer().render(frame, frame.len(), out) {
                Ok(()) => stats.rendered += 1,
                Err(Error::Protocol(e)) => {
                    warn!(frame = packet.frame_number, "IP header not decoded: {e}");
                    stats.malformed += 1;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(stats)
    }

    fn limit_reached(&self, stats: &DumpStats) -> bool {
        self.options.count.is_some_and(|n| stats.rendered >= n)
    }
}
