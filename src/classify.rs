//! Path and extension classification.
//!
//! Pure, total functions over filenames and relative paths. Categories are
//! checked in a fixed precedence order (first match wins) so that every file
//! lands in exactly one bucket; anything unrecognized classifies as
//! [`FileCategory::Other`].

use crate::common::InputFile;

/// Semantic category of an input file, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileCategory {
    /// 3D model: `.fbx`, `.obj`, `.glb`, `.gltf`
    Model,
    /// Image / texture: `.png`, `.jpg`, `.jpeg`, `.tga`, `.exr`, `.psd`, `.bmp`, `.tif`, `.tiff`, `.dds`
    Image,
    /// Portable engine container: `.unitypackage`
    Package,
    /// Engine-native asset: `.uasset`, `.umap`, `.upk`
    EngineAsset,
    /// Material definition: `.mtl`
    Material,
    /// Source scene: `.blend`, `.max`, `.ma`, `.mb`
    SourceScene,
    /// Everything else, including names without an extension.
    Other,
}

/// Lowercased extension from the last `.` to the end, inclusive of the dot.
/// Returns an empty string when the name has no dot.
pub fn extension_of(name: &str) -> String {
    match name.rfind('.') {
        Some(idx) => name[idx..].to_ascii_lowercase(),
        None => String::new(),
    }
}

/// The filename's stem: everything before the last `.`, or the whole name
/// when there is no extension.
pub fn base_stem(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => &name[..idx],
        None => name,
    }
}

/// Classify a filename into its semantic category.
///
/// Precedence order is fixed: model, image, package, engine asset, material,
/// source scene, other. First match wins.
pub fn classify_by_extension(name: &str) -> FileCategory {
    let ext = extension_of(name);
    match ext.as_str() {
        ".fbx" | ".obj" | ".glb" | ".gltf" => FileCategory::Model,
        ".png" | ".jpg" | ".jpeg" | ".tga" | ".exr" | ".psd" | ".bmp" | ".tif" | ".tiff"
        | ".dds" => FileCategory::Image,
        ".unitypackage" => FileCategory::Package,
        ".uasset" | ".umap" | ".upk" => FileCategory::EngineAsset,
        ".mtl" => FileCategory::Material,
        ".blend" | ".max" | ".ma" | ".mb" => FileCategory::SourceScene,
        _ => FileCategory::Other,
    }
}

fn is_textures_segment(segment: &str) -> bool {
    segment.eq_ignore_ascii_case("textures") || segment.eq_ignore_ascii_case("texture")
}

/// Extract the path of a texture relative to its `Textures` folder.
///
/// Splits `path` on `/` and finds the *last* segment case-insensitively named
/// `Textures` or `Texture`. If found and not the final segment, returns the
/// segments strictly between it and the filename joined by `/` (possibly the
/// empty string for a file directly inside the folder). Returns `None` when
/// no such folder exists, meaning: place the texture at the bucket root.
pub fn texture_relative_path(path: &str) -> Option<String> {
    let segments: Vec<&str> = path.split('/').collect();
    let idx = segments.iter().rposition(|s| is_textures_segment(s))?;
    if idx + 1 >= segments.len() {
        return None;
    }
    Some(segments[idx + 1..segments.len() - 1].join("/"))
}

/// Name markers flagging a texture as a normal map.
const NORMAL_MARKERS: [&str; 3] = ["_normal", "_n.", "_norm"];

/// True if the filename (case-insensitive) carries a normal-map marker.
pub fn is_normal_map_name(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    NORMAL_MARKERS.iter().any(|m| lower.contains(m))
}

/// Advisory check: does any input path run through a `Textures` folder?
///
/// The marketplace layout's natural habitat expects one; its absence never
/// blocks an export, it only produces a warning.
pub fn has_textures_folder(files: &[InputFile]) -> bool {
    files
        .iter()
        .any(|f| f.path.split('/').any(is_textures_segment))
}
