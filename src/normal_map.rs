//! Normal-map encoding analysis and conversion.
//!
//! Tangent-space normal maps come in two conventions that disagree on the
//! green (Y) channel: DirectX-style (Y-down) and OpenGL-style (Y-up). The
//! detector is a statistical heuristic over the blue channel of a
//! downsampled copy; flat or degenerate maps near the threshold may
//! misclassify, which is an accepted tradeoff of the format.

use std::collections::HashMap;
use std::io::Cursor;

use image::{DynamicImage, ImageFormat};
use rayon::prelude::*;
use tracing::debug;

use crate::classify::{classify_by_extension, is_normal_map_name, FileCategory};
use crate::common::InputFile;
use crate::PackError;

/// Mean blue value (0-255 scale) below which a normal map counts as
/// DirectX-encoded. A heuristic boundary, not a certainty.
pub const DEFAULT_BLUE_THRESHOLD: f32 = 200.0;

/// Maximum edge length of the downsampled copy used for detection.
const DETECT_SAMPLE_EDGE: u32 = 100;

/// The two tangent-space normal-map conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalEncoding {
    /// Y-down green channel; the target convention for packaged archives.
    DirectX,
    /// Y-up green channel; converted or excluded depending on the set.
    OpenGl,
}

/// What to do with one normal-map file during packaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalMapDecision {
    /// Flip the green channel and ship the converted bytes.
    Convert,
    /// Already DirectX-encoded; ship unchanged.
    Keep,
    /// Redundant OpenGL duplicate of a DirectX map; drop from the archive.
    Exclude,
}

/// Classify a normal map's encoding by sampling its blue channel.
///
/// The image is downsampled to at most 100x100 before sampling; the mean
/// blue value is compared against `threshold`.
pub fn detect_encoding(bytes: &[u8], threshold: f32) -> Result<NormalEncoding, image::ImageError> {
    let img = image::load_from_memory(bytes)?;
    let small = img.thumbnail(DETECT_SAMPLE_EDGE, DETECT_SAMPLE_EDGE).into_rgba8();

    let mut blue_sum: u64 = 0;
    let mut count: u64 = 0;
    for px in small.pixels() {
        blue_sum += u64::from(px[2]);
        count += 1;
    }
    let mean = if count == 0 { 0.0 } else { blue_sum as f32 / count as f32 };

    Ok(if mean < threshold { NormalEncoding::DirectX } else { NormalEncoding::OpenGl })
}

/// Convert an OpenGL-encoded normal map to DirectX by inverting the green
/// channel at full resolution, re-encoding in the original image format.
pub fn convert_to_directx(bytes: &[u8]) -> Result<Vec<u8>, image::ImageError> {
    let format = image::guess_format(bytes)?;
    let img = image::load_from_memory_with_format(bytes, format)?;

    let mut rgba = img.into_rgba8();
    for px in rgba.pixels_mut() {
        px[1] = 255 - px[1];
    }

    // JPEG has no alpha channel; everything else round-trips through RGBA.
    let out = if format == ImageFormat::Jpeg {
        DynamicImage::ImageRgba8(rgba).into_rgb8().into()
    } else {
        DynamicImage::ImageRgba8(rgba)
    };

    let mut buf = Cursor::new(Vec::new());
    out.write_to(&mut buf, format)?;
    Ok(buf.into_inner())
}

/// Compute the global per-file decision map for one export invocation.
///
/// Restricts `textures` to files that are both images and name-flagged as
/// normal maps; returns an empty map when none qualify. Detection fans out
/// across files (decode is CPU-bound), then the aggregated rule applies:
///
/// - only OpenGL present: every file is [`NormalMapDecision::Convert`]
/// - both present: OpenGL files are [`NormalMapDecision::Exclude`], DirectX
///   files are [`NormalMapDecision::Keep`]
/// - only DirectX present: every file is [`NormalMapDecision::Keep`]
///
/// The map is computed once and treated as immutable for the rest of the
/// export so sibling archives carry consistent texture sets.
pub fn plan_normal_maps(
    textures: &[InputFile],
    threshold: f32,
) -> Result<HashMap<String, NormalMapDecision>, PackError> {
    let candidates: Vec<&InputFile> = textures
        .iter()
        .filter(|f| {
            classify_by_extension(&f.name) == FileCategory::Image && is_normal_map_name(&f.name)
        })
        .collect();

    if candidates.is_empty() {
        return Ok(HashMap::new());
    }

    let detections: Vec<(String, NormalEncoding)> = candidates
        .par_iter()
        .map(|file| {
            let bytes = file.read()?;
            let encoding = detect_encoding(&bytes, threshold).map_err(|e| PackError::Image {
                name: file.name.clone(),
                source: e,
            })?;
            debug!(name = %file.name, ?encoding, "normal map detected");
            Ok((file.name.clone(), encoding))
        })
        .collect::<Result<_, PackError>>()?;

    let has_directx = detections.iter().any(|(_, e)| *e == NormalEncoding::DirectX);

    let mut decisions = HashMap::new();
    for (name, encoding) in detections {
        let decision = match encoding {
            NormalEncoding::OpenGl if !has_directx => NormalMapDecision::Convert,
            NormalEncoding::OpenGl => NormalMapDecision::Exclude,
            NormalEncoding::DirectX => NormalMapDecision::Keep,
        };
        decisions.insert(name, decision);
    }
    Ok(decisions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn png_with_channels(r: u8, g: u8, b: u8) -> Vec<u8> {
        let img = RgbaImage::from_pixel(8, 8, Rgba([r, g, b, 255]));
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    #[test]
    fn blue_mean_threshold_boundaries() {
        let directx = png_with_channels(128, 128, 128);
        let opengl = png_with_channels(128, 128, 255);
        assert_eq!(
            detect_encoding(&directx, DEFAULT_BLUE_THRESHOLD).unwrap(),
            NormalEncoding::DirectX
        );
        assert_eq!(
            detect_encoding(&opengl, DEFAULT_BLUE_THRESHOLD).unwrap(),
            NormalEncoding::OpenGl
        );
        // Exactly at the threshold classifies as OpenGL (strictly-below rule).
        let at_boundary = png_with_channels(0, 0, 200);
        assert_eq!(
            detect_encoding(&at_boundary, DEFAULT_BLUE_THRESHOLD).unwrap(),
            NormalEncoding::OpenGl
        );
    }

    #[test]
    fn conversion_inverts_green_and_keeps_format() {
        let src = png_with_channels(10, 40, 255);
        let converted = convert_to_directx(&src).unwrap();
        assert_eq!(image::guess_format(&converted).unwrap(), ImageFormat::Png);
        let img = image::load_from_memory(&converted).unwrap().into_rgba8();
        let px = img.get_pixel(0, 0);
        assert_eq!(px[0], 10);
        assert_eq!(px[1], 255 - 40);
        assert_eq!(px[2], 255);
    }

    #[test]
    fn decision_map_is_empty_without_candidates() {
        let files = vec![InputFile::in_memory("wall_basecolor.png", "wall_basecolor.png", vec![])];
        let decisions = plan_normal_maps(&files, DEFAULT_BLUE_THRESHOLD).unwrap();
        assert!(decisions.is_empty());
    }

    #[test]
    fn mixed_set_keeps_directx_and_excludes_opengl() {
        let files = vec![
            InputFile::in_memory("a_normal.png", "a_normal.png", png_with_channels(0, 0, 128)),
            InputFile::in_memory("b_normal.png", "b_normal.png", png_with_channels(0, 0, 255)),
        ];
        let decisions = plan_normal_maps(&files, DEFAULT_BLUE_THRESHOLD).unwrap();
        assert_eq!(decisions["a_normal.png"], NormalMapDecision::Keep);
        assert_eq!(decisions["b_normal.png"], NormalMapDecision::Exclude);
    }

    #[test]
    fn opengl_only_set_converts_everything() {
        let files = vec![
            InputFile::in_memory("a_normal.png", "a_normal.png", png_with_channels(0, 0, 255)),
            InputFile::in_memory("b_normal.png", "b_normal.png", png_with_channels(0, 0, 250)),
        ];
        let decisions = plan_normal_maps(&files, DEFAULT_BLUE_THRESHOLD).unwrap();
        assert!(decisions.values().all(|d| *d == NormalMapDecision::Convert));
    }
}
