use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mediaforge")]
#[command(author, version, about = "Image and video transformation with ffmpeg")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the conversion HTTP server
    Start {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Convert a single file
    Convert {
        /// Input file to convert
        #[arg(required = true)]
        input: PathBuf,

        /// Media kind of the input (image or video)
        #[arg(short, long)]
        kind: Option<String>,

        /// Directory to write the output to
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Output file name without extension (defaults to the input name)
        #[arg(short, long)]
        name: Option<String>,

        /// Render an animated GIF instead of a general conversion
        #[arg(long)]
        gif: bool,

        /// Print the ffmpeg arguments without running ffmpeg
        #[arg(long)]
        dry_run: bool,

        /// Transformation parameter as key=value (repeatable), e.g. -p width=800
        #[arg(short = 'p', long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },

    /// Check that required external tools are available
    CheckTools,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

fn parse_param(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected key=value, got '{s}'"))
}
