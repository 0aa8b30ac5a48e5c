// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "gif-player")]
#[command(about = "Plays an animated GIF onto an in-memory canvas", long_about = None)]
pub struct Cli {
    /// GIF file to play
    pub path: PathBuf,

    /// JSON config file; flags given on the command line take precedence
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Decode frames one after another instead of in parallel
    #[arg(long)]
    pub sequential: bool,

    /// Override the loop count (0 = infinite, k = k extra passes)
    #[arg(long)]
    pub loops: Option<u32>,

    /// Use a simulated clock instead of sleeping between frames
    #[arg(long)]
    pub simulate: bool,

    /// Stop after this many ticks
    #[arg(long = "max-ticks")]
    pub max_ticks: Option<u64>,

    /// Write the canvas as PNG into this directory after every drawn frame
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Print a JSON summary of the frames and exit
    #[arg(long)]
    pub summary: bool,
}
