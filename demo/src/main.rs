mod metrics;
mod raw;
mod synthetic;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use kalman::FilterConfig;

#[derive(Parser)]
#[command(name = "kalman_demo", about = "Per-pixel Kalman filtering of video frames")]
struct Cli {
    /// Log filter used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Directory for rotated log files.
    #[arg(long, global = true, default_value = "logs")]
    log_dir: PathBuf,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Denoise a generated moving gradient and report PSNR per frame.
    Synthetic(synthetic::SyntheticArgs),
    /// Denoise a raw interleaved 8-bit video file.
    Raw(raw::RawArgs),
}

/// Filter parameters shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Initial estimate uncertainty.
    #[arg(long, default_value_t = 100.0)]
    p: f32,

    /// Measurement uncertainty.
    #[arg(long, default_value_t = 100.0)]
    r: f32,

    /// YAML or JSON file with `p` and `r`; overrides --p and --r.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl FilterArgs {
    pub fn resolve(&self) -> anyhow::Result<FilterConfig> {
        let config = match &self.config {
            Some(path) => FilterConfig::load(path)?,
            None => FilterConfig::new(self.p, self.r),
        };
        config.validate().context("rejected filter configuration")?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    common::log_setup::setup_logging(&cli.log_level, &cli.log_dir);

    match cli.cmd {
        Commands::Synthetic(args) => {
            synthetic::run(&args)?;
        }
        Commands::Raw(args) => {
            raw::run(&args)?;
        }
    }
    Ok(())
}
