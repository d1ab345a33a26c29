//! Building conversion requests from key/value parameters.
//!
//! Query strings, CLI `key=value` pairs and similar sources all go through
//! [`from_params`]. Parameters that only make sense for video are skipped
//! for images and reported back as warnings instead.

use crate::converter::MediaConverter;
use crate::options::MediaKind;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

/// Parameters that only apply to video, in warning order.
pub const VIDEO_ONLY_PARAMS: &[&str] = &["fps", "start", "end", "bitrate", "crf"];

/// A source of raw request parameters.
pub trait ParamSource {
    /// Raw value of `key`, if present.
    fn get(&self, key: &str) -> Option<&str>;

    /// Value of `key` as an unsigned integer.
    ///
    /// Missing or unparsable values read as 0.
    fn get_int(&self, key: &str) -> u32 {
        self.get(key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Value of `key` if present and non-empty.
    fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// Whether `key` is present with a non-empty value.
    fn has(&self, key: &str) -> bool {
        self.get_str(key).is_some()
    }
}

impl ParamSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<&str> {
        HashMap::get(self, key).map(String::as_str)
    }
}

impl ParamSource for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<&str> {
        BTreeMap::get(self, key).map(String::as_str)
    }
}

impl ParamSource for [(&str, &str)] {
    fn get(&self, key: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }
}

/// Build a request for `input` from `params`.
///
/// Recognized keys are `width`, `height`, `quality`, `format` and `crop`,
/// plus `fps`, `start`, `end`, `bitrate` and `crf` for video. Returns the
/// request and the warnings raised for video keys given with an image.
/// Unknown keys are ignored.
///
/// # Example
///
/// ```
/// use mediaforge_av::{from_params, MediaKind};
///
/// let params: &[(&str, &str)] = &[("fps", "30"), ("crop", "100:100:0:0")];
/// let (converter, warnings) = from_params(params, MediaKind::Image, "photo.jpg");
///
/// assert_eq!(converter.options().frame_rate, 0);
/// assert_eq!(converter.options().crop, "100:100:0:0");
/// assert_eq!(warnings, vec!["fps parameter is ignored for images"]);
/// ```
pub fn from_params<S>(
    source: &S,
    kind: MediaKind,
    input: impl Into<PathBuf>,
) -> (MediaConverter, Vec<String>)
where
    S: ParamSource + ?Sized,
{
    let mut converter = MediaConverter::new(kind, input);
    let mut warnings = Vec::new();

    let width = source.get_int("width");
    let height = source.get_int("height");
    if width > 0 || height > 0 {
        converter.resize(width, height);
    }

    let quality = source.get_int("quality");
    if quality > 0 {
        converter.quality(quality);
    }

    if let Some(format) = source.get_str("format") {
        converter.format(format);
    }

    match kind {
        MediaKind::Video => apply_video_params(source, &mut converter),
        MediaKind::Image => {
            for &param in VIDEO_ONLY_PARAMS {
                if source.has(param) {
                    #[cfg(feature = "tracing")]
                    tracing::debug!("Ignoring video-only parameter {} for image", param);

                    warnings.push(format!("{param} parameter is ignored for images"));
                }
            }
        }
    }

    if let Some(crop) = source.get_str("crop") {
        converter.crop(crop);
    }

    (converter, warnings)
}

fn apply_video_params<S>(source: &S, converter: &mut MediaConverter)
where
    S: ParamSource + ?Sized,
{
    let fps = source.get_int("fps");
    if fps > 0 {
        converter.frame_rate(fps);
    }

    let start = source.get_int("start");
    let end = source.get_int("end");
    if start > 0 || end > 0 {
        converter.duration(start, end);
    }

    if let Some(bitrate) = source.get_str("bitrate") {
        converter.bitrate(bitrate);
    }

    let crf = source.get_int("crf");
    if crf > 0 {
        converter.crf(crf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn image_ignores_video_params_with_warning() {
        let params = map(&[("fps", "30"), ("crop", "100:100:0:0")]);
        let (converter, warnings) = from_params(&params, MediaKind::Image, "a.jpg");

        assert_eq!(converter.options().frame_rate, 0);
        assert_eq!(converter.options().crop, "100:100:0:0");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("fps"));
    }

    #[test]
    fn image_warnings_follow_fixed_order() {
        let params = map(&[
            ("crf", "20"),
            ("bitrate", "1M"),
            ("end", "9"),
            ("start", "2"),
            ("fps", "24"),
        ]);
        let (converter, warnings) = from_params(&params, MediaKind::Image, "a.jpg");

        assert_eq!(
            warnings,
            vec![
                "fps parameter is ignored for images",
                "start parameter is ignored for images",
                "end parameter is ignored for images",
                "bitrate parameter is ignored for images",
                "crf parameter is ignored for images",
            ]
        );
        let opts = converter.options();
        assert_eq!(opts.crf, 0);
        assert!(opts.bitrate.is_empty());
        assert_eq!((opts.start_time, opts.end_time), (0, 0));
    }

    #[test]
    fn image_warns_on_presence_even_when_not_positive() {
        let params = map(&[("fps", "0"), ("crf", "abc"), ("bitrate", "")]);
        let (_, warnings) = from_params(&params, MediaKind::Image, "a.jpg");
        assert_eq!(
            warnings,
            vec![
                "fps parameter is ignored for images",
                "crf parameter is ignored for images",
            ]
        );
    }

    #[test]
    fn video_applies_video_params() {
        let params = map(&[
            ("fps", "30"),
            ("start", "2"),
            ("end", "12"),
            ("bitrate", "1M"),
            ("crf", "23"),
        ]);
        let (converter, warnings) = from_params(&params, MediaKind::Video, "a.mp4");

        assert!(warnings.is_empty());
        let opts = converter.options();
        assert_eq!(opts.frame_rate, 30);
        assert_eq!((opts.start_time, opts.end_time), (2, 12));
        assert_eq!(opts.bitrate, "1M");
        assert_eq!(opts.crf, 23);
    }

    #[test]
    fn width_and_height_are_independent() {
        let (converter, _) = from_params(&map(&[("width", "640")]), MediaKind::Image, "a.jpg");
        assert_eq!((converter.options().width, converter.options().height), (640, 0));

        let (converter, _) = from_params(&map(&[("height", "480")]), MediaKind::Image, "a.jpg");
        assert_eq!((converter.options().width, converter.options().height), (0, 480));

        let params = map(&[("width", "640"), ("height", "480")]);
        let (converter, _) = from_params(&params, MediaKind::Image, "a.jpg");
        assert_eq!((converter.options().width, converter.options().height), (640, 480));
    }

    #[test]
    fn start_and_end_are_independent() {
        let (converter, _) = from_params(&map(&[("end", "8")]), MediaKind::Video, "a.mp4");
        let opts = converter.options();
        assert_eq!((opts.start_time, opts.end_time), (0, 8));

        let (converter, _) = from_params(&map(&[("start", "3")]), MediaKind::Video, "a.mp4");
        let opts = converter.options();
        assert_eq!((opts.start_time, opts.end_time), (3, 0));
    }

    #[test]
    fn non_positive_and_empty_values_are_skipped() {
        let params = map(&[
            ("width", "-5"),
            ("quality", "0"),
            ("format", ""),
            ("crop", ""),
            ("fps", "fast"),
        ]);
        let (converter, warnings) = from_params(&params, MediaKind::Video, "a.mp4");

        assert!(warnings.is_empty());
        assert_eq!(converter.options(), &crate::ConversionOptions::new());
    }

    #[test]
    fn shared_params_apply_to_both_kinds() {
        for kind in [MediaKind::Image, MediaKind::Video] {
            let params = map(&[
                ("quality", "70"),
                ("format", "png"),
                ("crop", "10:10:0:0"),
            ]);
            let (converter, warnings) = from_params(&params, kind, "in");
            let opts = converter.options();
            assert!(warnings.is_empty());
            assert_eq!(opts.quality, 70);
            assert_eq!(opts.format, "png");
            assert_eq!(opts.crop, "10:10:0:0");
        }
    }

    #[test]
    fn unrecognized_keys_are_ignored_silently() {
        for kind in [MediaKind::Image, MediaKind::Video] {
            let pairs: &[(&str, &str)] = &[
                ("cut", "1:2"),
                ("scale", "50"),
                ("frame", "3"),
                ("unknown", "x"),
            ];
            let (converter, warnings) = from_params(pairs, kind, "in");

            assert!(warnings.is_empty(), "{kind}: {warnings:?}");
            assert_eq!(converter.options(), &crate::ConversionOptions::new());
        }
    }

    #[test]
    fn btree_and_slice_sources() {
        let mut btree = BTreeMap::new();
        btree.insert("quality".to_string(), "42".to_string());
        assert_eq!(ParamSource::get_int(&btree, "quality"), 42);

        let pairs: &[(&str, &str)] = &[("format", "avif")];
        assert_eq!(pairs.get_str("format"), Some("avif"));
        assert!(!pairs.has("crop"));
    }
}
