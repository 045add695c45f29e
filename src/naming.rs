//! Engine-convention texture naming.
//!
//! Derives standardized destination filenames of the form
//! `T_<package>_<ROLECODE><ext>` from arbitrary artist-supplied names.
//! Recognizing a role deliberately discards the original descriptive base
//! name; two differently named textures with the same role collide, and the
//! archive layer resolves that last-write-wins.

use lazy_static::lazy_static;
use regex::Regex;

use crate::classify::{base_stem, extension_of};
use crate::normal_map::NormalEncoding;

/// A texture's function, detected from name markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureRole {
    /// Packed occlusion/roughness/metallic map.
    Orm,
    Diffuse,
    Normal,
    Roughness,
    Metallic,
    AmbientOcclusion,
    Emissive,
    Opacity,
}

impl TextureRole {
    /// The short code used inside the standardized filename.
    pub fn code(self) -> &'static str {
        match self {
            TextureRole::Orm => "ORM",
            TextureRole::Diffuse => "D",
            TextureRole::Normal => "N",
            TextureRole::Roughness => "R",
            TextureRole::Metallic => "M",
            TextureRole::AmbientOcclusion => "AO",
            TextureRole::Emissive => "E",
            TextureRole::Opacity => "O",
        }
    }
}

/// Role markers in priority order; the first matching row wins.
const ROLE_MARKERS: &[(&[&str], TextureRole)] = &[
    (&["_orm", "_packed"], TextureRole::Orm),
    (&["_color", "_basecolor", "_albedo", "_diffuse", "_bc"], TextureRole::Diffuse),
    (&["_normal", "_n.", "_norm"], TextureRole::Normal),
    (&["_roughness", "_rough", "_r."], TextureRole::Roughness),
    (&["_metallic", "_metalness", "_metal", "_m."], TextureRole::Metallic),
    (&["_occlusion", "_ao", "_ambientocclusion"], TextureRole::AmbientOcclusion),
    (&["_emissive", "_emission", "_e."], TextureRole::Emissive),
    (&["_opacity", "_alpha", "_o."], TextureRole::Opacity),
];

lazy_static! {
    // _4k / _4096px / _2048 style tokens, one underscore-delimited segment each.
    static ref RESOLUTION_TOKEN: Regex = Regex::new(r"^(?:\d+[kK]|\d+px|\d{3,4})$").unwrap();
}

/// Remove resolution tokens (`_4k`, `_4096px`, `_2048`) from a base name.
///
/// A token only counts when it is preceded by `_` and followed by another
/// `_` or the extension boundary (the end of the base name).
pub fn strip_resolution_tokens(base: &str) -> String {
    let mut segments = base.split('_');
    let mut out: Vec<&str> = Vec::new();
    // The leading segment has no preceding underscore and is never a token.
    if let Some(first) = segments.next() {
        out.push(first);
    }
    for seg in segments {
        if !RESOLUTION_TOKEN.is_match(seg) {
            out.push(seg);
        }
    }
    out.join("_")
}

/// Detect a texture's role from its cleaned base name.
///
/// Case-insensitive substring search against [`ROLE_MARKERS`] in table order.
/// Note that the dot-bearing markers (`_n.`, `_r.`, ...) only fire when the
/// base name itself contains an interior dot, since the extension was already
/// split off by the caller.
pub fn detect_texture_role(cleaned_base: &str) -> Option<TextureRole> {
    let lower = cleaned_base.to_ascii_lowercase();
    for (markers, role) in ROLE_MARKERS {
        if markers.iter().any(|m| lower.contains(m)) {
            return Some(*role);
        }
    }
    None
}

/// Derive the standardized destination filename for a texture.
///
/// - No role detected: `T_<package>_<cleanedBase><ext>`
/// - Normal map confirmed as DirectX-encoded: `T_<package>_N<ext>`
/// - Any other role: `T_<package>_<ROLECODE><ext>`
pub fn build_standard_name(
    original: &str,
    package: &str,
    normal_hint: Option<NormalEncoding>,
) -> String {
    let ext = extension_of(original);
    let clean = strip_resolution_tokens(base_stem(original));

    match detect_texture_role(&clean) {
        None => format!("T_{package}_{clean}{ext}"),
        Some(TextureRole::Normal) if normal_hint == Some(NormalEncoding::DirectX) => {
            format!("T_{package}_N{ext}")
        }
        Some(role) => format!("T_{package}_{}{ext}", role.code()),
    }
}
