//! Fluent conversion requests.

use crate::args::{build_convert_args, build_gif_args, GIF_EXTENSION};
use crate::command::{SystemRunner, ToolRunner, FFMPEG};
use crate::options::{ConversionOptions, CutWindow, MediaKind};
use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// A single conversion request.
///
/// Owns one set of [`ConversionOptions`], the media kind and the input file.
/// Setters never fail and accept values unchecked; each returns the same
/// request so calls can be chained.
///
/// # Example
///
/// ```no_run
/// use mediaforge_av::{MediaConverter, MediaKind};
///
/// let mut converter = MediaConverter::new(MediaKind::Image, "photo.jpg");
/// converter.resize(800, 600).quality(75).format("webp");
///
/// let output = converter.convert("./output", "w800-h600-q75")?;
/// assert!(output.ends_with("w800-h600-q75.webp"));
/// # Ok::<(), mediaforge_av::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct MediaConverter {
    kind: MediaKind,
    input: PathBuf,
    options: ConversionOptions,
}

impl MediaConverter {
    /// Create a request for `input` with default options.
    pub fn new(kind: MediaKind, input: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            input: input.into(),
            options: ConversionOptions::new(),
        }
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Set the output dimensions. Zero leaves a dimension to ffmpeg.
    pub fn resize(&mut self, width: u32, height: u32) -> &mut Self {
        self.options.width = width;
        self.options.height = height;
        self
    }

    /// Scale both dimensions by a percentage.
    pub fn resize_scale(&mut self, scale: u32) -> &mut Self {
        self.options.resize_scale = scale;
        self
    }

    /// Crop to a `w:h:x:y` box.
    pub fn crop(&mut self, dimensions: impl Into<String>) -> &mut Self {
        self.options.crop = dimensions.into();
        self
    }

    pub fn quality(&mut self, quality: u32) -> &mut Self {
        self.options.quality = quality;
        self
    }

    /// Set the target format, which also becomes the output extension.
    pub fn format(&mut self, format: impl Into<String>) -> &mut Self {
        self.options.format = format.into();
        self
    }

    /// Set the clip window in seconds, used by GIF output.
    pub fn duration(&mut self, start: u32, end: u32) -> &mut Self {
        self.options.start_time = start;
        self.options.end_time = end;
        self
    }

    pub fn frame_rate(&mut self, fps: u32) -> &mut Self {
        self.options.frame_rate = fps;
        self
    }

    /// Set the video bitrate, e.g. `1M`.
    pub fn bitrate(&mut self, bitrate: impl Into<String>) -> &mut Self {
        self.options.bitrate = bitrate.into();
        self
    }

    pub fn crf(&mut self, crf: u32) -> &mut Self {
        self.options.crf = crf;
        self
    }

    /// Extract a single frame at `time`.
    pub fn extract_frame(&mut self, time: impl Into<String>) -> &mut Self {
        self.options.frame_time = time.into();
        self
    }

    /// Cut a `start:duration` subclip.
    pub fn cut(&mut self, window: impl Into<String>) -> &mut Self {
        self.options.cut_window = window.into();
        self
    }

    /// Extension of the general conversion output.
    pub fn output_extension(&self) -> &str {
        if self.options.format.is_empty() {
            self.kind.default_extension()
        } else {
            &self.options.format
        }
    }

    /// Path of the general conversion output, `dir/name.ext`.
    pub fn output_path(&self, output_dir: impl AsRef<Path>, name: &str) -> PathBuf {
        output_dir
            .as_ref()
            .join(format!("{}.{}", name, self.output_extension()))
    }

    /// Path of the GIF output, `dir/name.gif`.
    pub fn gif_output_path(&self, output_dir: impl AsRef<Path>, name: &str) -> PathBuf {
        output_dir
            .as_ref()
            .join(format!("{}.{}", name, GIF_EXTENSION))
    }

    /// Arguments for a general conversion writing to `output`.
    pub fn convert_args(&self, output: &Path) -> Vec<String> {
        build_convert_args(&self.input, &self.options, output)
    }

    /// Arguments for a GIF conversion writing to `output`.
    pub fn gif_args(&self, output: &Path) -> Vec<String> {
        build_gif_args(&self.input, &self.options, output)
    }

    /// Convert the input and return the output path.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] if a cut window is set without a `:`.
    /// - [`Error::ToolFailed`] if ffmpeg fails.
    pub fn convert(&self, output_dir: impl AsRef<Path>, name: &str) -> Result<PathBuf> {
        self.convert_with(&SystemRunner, output_dir, name)
    }

    /// [`convert`](Self::convert) through a specific runner.
    pub fn convert_with(
        &self,
        runner: &dyn ToolRunner,
        output_dir: impl AsRef<Path>,
        name: &str,
    ) -> Result<PathBuf> {
        self.validate()?;

        let output = self.output_path(output_dir, name);
        let args = self.convert_args(&output);

        #[cfg(feature = "tracing")]
        tracing::info!("Converting {} {:?} to {:?}", self.kind, self.input, output);

        runner.run(FFMPEG, &args)?;
        Ok(output)
    }

    /// Render the input as an animated GIF and return the output path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ToolFailed`] if ffmpeg fails.
    pub fn to_gif(&self, output_dir: impl AsRef<Path>, name: &str) -> Result<PathBuf> {
        self.to_gif_with(&SystemRunner, output_dir, name)
    }

    /// [`to_gif`](Self::to_gif) through a specific runner.
    pub fn to_gif_with(
        &self,
        runner: &dyn ToolRunner,
        output_dir: impl AsRef<Path>,
        name: &str,
    ) -> Result<PathBuf> {
        let output = self.gif_output_path(output_dir, name);
        let args = self.gif_args(&output);

        #[cfg(feature = "tracing")]
        tracing::info!("Creating GIF from {:?} at {:?}", self.input, output);

        runner.run(FFMPEG, &args)?;
        Ok(output)
    }

    /// Check that the request can be executed.
    ///
    /// Only the cut window can be malformed: when set it must read
    /// `start:duration`. [`convert`](Self::convert) runs this before
    /// spawning ffmpeg.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for a cut window without a `:`.
    pub fn validate(&self) -> Result<()> {
        let window = &self.options.cut_window;
        if !window.is_empty() && CutWindow::parse(window).is_none() {
            return Err(Error::invalid_input(format!(
                "cut window '{window}' must be start:duration"
            )));
        }
        Ok(())
    }
}
