//! # mediaforge-av
//!
//! Fluent builder that turns image and video transformation requests into
//! ffmpeg invocations.
//!
//! This crate provides functionality for:
//! - Accumulating transformation options (resize, crop, quality, format,
//!   frame extraction, trimming, frame rate, bitrate, CRF)
//! - Populating requests from key/value parameters, with warnings for
//!   options that do not apply to images
//! - Compiling options into ffmpeg argument vectors for general conversion
//!   and for animated GIF output
//! - Running ffmpeg and reporting failures with the captured output
//!
//! ## Features
//!
//! - `tracing` - Enable tracing support
//!
//! ## Example
//!
//! ```
//! use mediaforge_av::{MediaConverter, MediaKind};
//!
//! let mut converter = MediaConverter::new(MediaKind::Video, "talk.mp4");
//! converter.duration(10, 15).resize(480, 0).frame_rate(12);
//!
//! let output = converter.gif_output_path("out", "talk");
//! let args = converter.gif_args(&output);
//! assert_eq!(args[..8], ["-i", "talk.mp4", "-ss", "10", "-t", "5", "-vf", "scale=480:0"]);
//! assert_eq!(args.last().map(String::as_str), output.to_str());
//! ```

pub mod args;
pub mod command;
pub mod converter;
mod error;
pub mod options;
pub mod params;
pub mod tools;

// Re-exports
pub use args::{build_convert_args, build_gif_args, GIF_EXTENSION};
pub use command::{SystemRunner, ToolOutput, ToolRunner, FFMPEG};
pub use converter::MediaConverter;
pub use error::{Error, Result};
pub use options::{ConversionOptions, CutWindow, MediaKind, DEFAULT_QUALITY};
pub use params::{from_params, ParamSource, VIDEO_ONLY_PARAMS};
pub use tools::{check_ffmpeg, check_tools, require_tool, ToolInfo};
