//! ffmpeg argument compilation.
//!
//! Both entry points are pure: they read the finished options and return a
//! fresh argument vector. The order of the tokens matters, since ffmpeg
//! applies options and filters in the order given.

use crate::options::{ConversionOptions, CutWindow};
use std::path::Path;

/// Extension of animated-image output.
pub const GIF_EXTENSION: &str = "gif";

/// Build the arguments for a general conversion.
///
/// The vector always starts with `-i <input>` and ends with `-y <output>`.
/// A cut window without a `:` separator renders its seek only; callers that
/// execute the result reject such windows up front.
pub fn build_convert_args(input: &Path, opts: &ConversionOptions, output: &Path) -> Vec<String> {
    let mut args = input_args(input);

    if !opts.cut_window.is_empty() {
        match CutWindow::parse(&opts.cut_window) {
            Some(window) => {
                push_pair(&mut args, "-ss", window.start);
                push_pair(&mut args, "-t", window.duration);
            }
            None => push_pair(&mut args, "-ss", &opts.cut_window),
        }
    }

    // Single frame extraction
    if !opts.frame_time.is_empty() {
        push_pair(&mut args, "-ss", &opts.frame_time);
        push_pair(&mut args, "-vframes", "1");
    }

    if opts.resize_scale > 0 {
        let pct = opts.resize_scale;
        push_pair(&mut args, "-vf", format!("scale=iw*{pct}/100:ih*{pct}/100"));
    }

    if opts.width > 0 || opts.height > 0 {
        push_pair(&mut args, "-vf", scale_filter(opts));
    }

    if !opts.crop.is_empty() {
        push_pair(&mut args, "-vf", format!("crop={}", opts.crop));
    }

    if opts.frame_rate > 0 {
        push_pair(&mut args, "-r", opts.frame_rate.to_string());
    }

    if !opts.bitrate.is_empty() {
        push_pair(&mut args, "-b:v", &opts.bitrate);
    }

    if opts.crf > 0 {
        push_pair(&mut args, "-crf", opts.crf.to_string());
    }

    if opts.quality > 0 {
        push_pair(&mut args, "-q:v", opts.quality.to_string());
    }

    push_output(&mut args, output);
    args
}

/// Build the arguments for an animated GIF.
///
/// Only the clip window, fixed dimensions and frame rate are honoured.
/// `resize_scale`, crop, bitrate, CRF, quality and frame extraction are
/// left out of this path.
pub fn build_gif_args(input: &Path, opts: &ConversionOptions, output: &Path) -> Vec<String> {
    let mut args = input_args(input);

    if opts.start_time > 0 || opts.end_time > 0 {
        push_pair(&mut args, "-ss", opts.start_time.to_string());
        if let Some(duration) = opts.clip_duration() {
            push_pair(&mut args, "-t", duration.to_string());
        }
    }

    if opts.width > 0 || opts.height > 0 {
        push_pair(&mut args, "-vf", scale_filter(opts));
    }

    if opts.frame_rate > 0 {
        push_pair(&mut args, "-r", opts.frame_rate.to_string());
    }

    push_output(&mut args, output);
    args
}

fn input_args(input: &Path) -> Vec<String> {
    vec!["-i".to_string(), input.to_string_lossy().to_string()]
}

fn push_output(args: &mut Vec<String>, output: &Path) {
    push_pair(args, "-y", output.to_string_lossy());
}

fn push_pair(args: &mut Vec<String>, flag: &str, value: impl Into<String>) {
    args.push(flag.to_string());
    args.push(value.into());
}

fn scale_filter(opts: &ConversionOptions) -> String {
    format!("scale={}:{}", opts.width, opts.height)
}
