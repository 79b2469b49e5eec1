//! ipdump CLI entry point.

use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ipdump::cli::{Args, FrameDumper};
use ipdump_core::PcapReader;

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| args.log_level().into()),
        )
        .with_writer(io::stderr)
        .init();

    let reader = PcapReader::open(&args.file)
        .with_context(|| format!("Failed to open capture file: {}", args.file.display()))?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let stats = FrameDumper::new(args.dump_options())
        .run(reader, &mut out)
        .with_context(|| format!("Failed to dump {}", args.file.display()))?;
    out.flush().context("Failed to flush output")?;

    info!(
        read = stats.read,
        rendered = stats.rendered,
        not_ipv4 = stats.not_ipv4,
        filtered = stats.filtered,
        malformed = stats.malformed,
        "done"
    );

    Ok(())
}
