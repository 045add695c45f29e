use std::path::PathBuf;

use thiserror::Error;

/// The primary error type for all operations in the `assetpack` crate.
///
/// Every fatal condition rejects the whole export call; the crate performs no
/// retries. Naming collisions and the missing-`Textures`-folder advisory are
/// deliberately *not* part of this taxonomy (see [`crate::plan`] and
/// [`crate::classify::has_textures_folder`]).
#[derive(Debug, Error)]
pub enum PackError {
    /// A strategy was invoked with zero input files.
    #[error("no files to export")]
    EmptyFileSet,

    /// The marketplace layout was invoked without a single recognized 3D-model file.
    #[error("no 3D model files found; the marketplace layout requires at least one model file (.fbx, .obj, .glb, .gltf)")]
    NoModelFiles,

    /// The custom-tree layout was invoked with a root that has no children.
    #[error("custom structure is empty")]
    EmptyCustomStructure,

    /// A file's content could not be read during archive assembly.
    /// The in-progress archive is discarded, never emitted partially.
    #[error("could not read content of '{name}': {source}")]
    ContentRead {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// A texture could not be decoded or re-encoded during normal-map analysis.
    #[error("could not process image '{name}': {source}")]
    Image {
        name: String,
        #[source]
        source: image::ImageError,
    },

    /// An error from the underlying `zip` container writer.
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// An I/O error with the path where it happened.
    #[error("I/O error on path '{}': {source}", .path.display())]
    Io {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// The custom-tree JSON manifest could not be parsed.
    #[error("could not parse tree manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

impl PackError {
    /// Attach a path to a raw I/O error.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        PackError::Io { source, path: path.into() }
    }
}

// Generic IO error conversion that doesn't carry a path
impl From<std::io::Error> for PackError {
    fn from(err: std::io::Error) -> Self {
        PackError::Io { source: err, path: PathBuf::new() }
    }
}
