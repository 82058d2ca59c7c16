//! Raw interleaved 8-bit video on disk: frames back to back, no header.

use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Args;
use kalman::{FrameDesc, FrameFilter};

use crate::FilterArgs;

#[derive(Args, Debug, Clone)]
pub struct RawArgs {
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long)]
    pub output: PathBuf,

    #[arg(long)]
    pub width: usize,

    #[arg(long)]
    pub height: usize,

    /// Interleaved channels per pixel (1 = gray, 3 = RGB, 4 = RGBA).
    #[arg(long, default_value_t = 1)]
    pub channels: usize,

    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Fills `buf` from `reader`. Returns `false` on a clean end of stream.
fn read_frame(reader: &mut impl Read, buf: &mut [u8]) -> anyhow::Result<bool> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }

    if filled == 0 {
        Ok(false)
    } else if filled < buf.len() {
        bail!("truncated frame: got {} of {} bytes", filled, buf.len());
    } else {
        Ok(true)
    }
}

/// Returns the number of frames written.
pub fn run(args: &RawArgs) -> anyhow::Result<usize> {
    let config = args.filter.resolve()?;
    let desc = FrameDesc::packed(args.width, args.height, args.channels);
    desc.validate()?;
    let frame_len = desc.required_len();
    if frame_len == 0 {
        bail!("frame size must be non-zero");
    }

    let input = File::open(&args.input)
        .with_context(|| format!("failed to open '{}'", args.input.display()))?;
    let output = File::create(&args.output)
        .with_context(|| format!("failed to create '{}'", args.output.display()))?;
    let mut reader = BufReader::new(input);
    let mut writer = BufWriter::new(output);

    tracing::info!(
        "Filtering '{}' -> '{}' ({}x{}x{}, p={}, r={})",
        args.input.display(),
        args.output.display(),
        args.width,
        args.height,
        args.channels,
        config.p,
        config.r
    );

    let mut filter = FrameFilter::<u8>::new(config);
    let mut frame = vec![0u8; frame_len];
    let mut count = 0usize;

    while read_frame(&mut reader, &mut frame)
        .with_context(|| format!("failed to read frame {count}"))?
    {
        filter.process(&mut frame, desc)?;
        writer.write_all(&frame)?;
        count += 1;
    }
    writer.flush()?;

    tracing::info!("Wrote {} frames", count);
    Ok(count)
}
