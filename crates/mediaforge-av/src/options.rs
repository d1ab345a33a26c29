//! Transformation parameters and media kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Quality assigned to freshly created conversion requests.
pub const DEFAULT_QUALITY: u32 = 90;

/// Kind of media being converted.
///
/// The kind is fixed for the lifetime of a request. It decides which request
/// parameters apply and which extension is used when no format is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Still image input.
    Image,
    /// Video input.
    Video,
}

impl MediaKind {
    /// Extension used for the output file when no format is requested.
    pub fn default_extension(&self) -> &'static str {
        match self {
            MediaKind::Image => "webp",
            MediaKind::Video => "webm",
        }
    }

    /// Lowercase name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image" => Ok(MediaKind::Image),
            "video" => Ok(MediaKind::Video),
            other => Err(crate::Error::invalid_input(format!(
                "unknown media kind '{other}' (expected image or video)"
            ))),
        }
    }
}

/// Flat record of transformation parameters.
///
/// Every field is optional: zero and the empty string mean "unset". No
/// cross-field validation happens here; conflicting settings are all
/// rendered and left for ffmpeg to resolve.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionOptions {
    /// Target width in pixels (0 = auto).
    pub width: u32,
    /// Target height in pixels (0 = auto).
    pub height: u32,
    /// Crop box as `w:h:x:y`, passed through untouched.
    pub crop: String,
    /// Output quality, nominally 0-100.
    pub quality: u32,
    /// Percentage scale factor, nominally 0-100.
    pub resize_scale: u32,
    /// Temporal subclip as `start:duration`.
    pub cut_window: String,
    /// Target container/codec identifier, also used as the extension.
    pub format: String,
    /// Timestamp of a single frame to extract.
    pub frame_time: String,
    /// Clip start in seconds.
    pub start_time: u32,
    /// Clip end in seconds.
    pub end_time: u32,
    /// Output frame rate.
    pub frame_rate: u32,
    /// Video bitrate, e.g. `1M`.
    pub bitrate: String,
    /// Constant rate factor, nominally 0-51.
    pub crf: u32,
}

impl ConversionOptions {
    /// Options as they stand when a request is created.
    pub fn new() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            ..Self::default()
        }
    }

    /// Duration of the `start_time..end_time` window, if it is non-empty.
    pub fn clip_duration(&self) -> Option<u32> {
        (self.end_time > self.start_time).then(|| self.end_time - self.start_time)
    }
}

/// A `start:duration` cut window split into its two halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CutWindow<'a> {
    pub start: &'a str,
    pub duration: &'a str,
}

impl<'a> CutWindow<'a> {
    /// Split a window on `:`, keeping the first two parts.
    ///
    /// Returns `None` when the separator is missing. Parts past the second
    /// are dropped.
    pub fn parse(window: &'a str) -> Option<Self> {
        let mut parts = window.split(':');
        let start = parts.next()?;
        let duration = parts.next()?;
        Some(Self { start, duration })
    }
}
