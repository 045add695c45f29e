//! Common types shared across the crate.
// Input-file records, the custom-tree structure, small formatting helpers.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::PackError;

/// One user-supplied file: the unit every classification and packaging pass works on.
///
/// `name` is the leaf filename including extension; `path` is the relative path as
/// supplied by the enumeration layer and falls back to `name` when no directory
/// information exists. Content is read lazily through [`ContentSource`] and the
/// record itself is never mutated; conversions always produce new byte blobs.
#[derive(Debug, Clone)]
pub struct InputFile {
    pub name: String,
    pub size: u64,
    pub path: String,
    pub source: ContentSource,
}

/// Where an [`InputFile`]'s bytes live.
#[derive(Debug, Clone)]
pub enum ContentSource {
    /// Read from disk on demand.
    Disk(PathBuf),
    /// Already in memory (converted blobs, tests).
    Memory(Arc<[u8]>),
}

impl InputFile {
    /// Build a record for a file on disk. `rel_path` is the slash-separated
    /// path the packaging layer sees; pass `None` to fall back to the leaf name.
    pub fn from_disk(path: &Path, rel_path: Option<String>) -> Result<Self, PackError> {
        let meta = fs::metadata(path).map_err(|e| PackError::io(e, path))?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(InputFile {
            path: rel_path.unwrap_or_else(|| name.clone()),
            name,
            size: meta.len(),
            source: ContentSource::Disk(path.to_path_buf()),
        })
    }

    /// Build an in-memory record (used by tests and converted textures).
    pub fn in_memory(name: &str, path: &str, bytes: impl Into<Arc<[u8]>>) -> Self {
        let bytes = bytes.into();
        InputFile {
            name: name.to_string(),
            size: bytes.len() as u64,
            path: path.to_string(),
            source: ContentSource::Memory(bytes),
        }
    }

    /// Read the full content. Failure here is fatal to the archive being built.
    pub fn read(&self) -> Result<Vec<u8>, PackError> {
        match &self.source {
            ContentSource::Disk(path) => fs::read(path).map_err(|e| PackError::ContentRead {
                name: self.name.clone(),
                source: e,
            }),
            ContentSource::Memory(bytes) => Ok(bytes.to_vec()),
        }
    }
}

/// A node of the user-authored folder tree consumed by the custom layout.
///
/// The tree is authored externally (tree editor, JSON manifest) and read-only
/// here. Sibling names are not required to be unique; collisions overwrite
/// last-write-wins at the archive layer.
#[derive(Debug, Clone)]
pub enum CustomNode {
    Folder { name: String, children: Vec<CustomNode> },
    File { name: String, file: InputFile },
}

/// Serialized form of a custom-tree node, as found in the `--tree` JSON manifest.
///
/// The manifest root is a JSON array of nodes (the children of the implicit
/// root folder):
///
/// ```json
/// [
///   {"kind": "folder", "name": "Props", "children": [
///     {"kind": "file", "path": "models/chair.fbx"}
///   ]},
///   {"kind": "file", "path": "README.txt", "name": "ReadMe.txt"}
/// ]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TreeManifestNode {
    Folder {
        name: String,
        #[serde(default)]
        children: Vec<TreeManifestNode>,
    },
    File {
        /// Path on disk, relative to the manifest's directory or absolute.
        path: PathBuf,
        /// Optional override for the name inside the archive.
        #[serde(default)]
        name: Option<String>,
    },
}

/// Load a custom-tree manifest and resolve its file nodes against disk.
pub fn load_custom_tree(manifest_path: &Path) -> Result<Vec<CustomNode>, PackError> {
    let raw = fs::read_to_string(manifest_path).map_err(|e| PackError::io(e, manifest_path))?;
    let nodes: Vec<TreeManifestNode> = serde_json::from_str(&raw)?;
    let base = manifest_path.parent().unwrap_or_else(|| Path::new(""));
    nodes.iter().map(|n| resolve_node(n, base)).collect()
}

fn resolve_node(node: &TreeManifestNode, base: &Path) -> Result<CustomNode, PackError> {
    match node {
        TreeManifestNode::Folder { name, children } => Ok(CustomNode::Folder {
            name: name.clone(),
            children: children
                .iter()
                .map(|c| resolve_node(c, base))
                .collect::<Result<_, _>>()?,
        }),
        TreeManifestNode::File { path, name } => {
            let full = if path.is_absolute() { path.clone() } else { base.join(path) };
            let mut file = InputFile::from_disk(&full, None)?;
            if let Some(name) = name {
                file.name = name.clone();
            }
            let name = file.name.clone();
            Ok(CustomNode::File { name, file })
        }
    }
}

/// Human-readable byte count for the `inspect` listing.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 B".to_string();
    }
    let exp = (bytes as f64).log(1024.0).floor() as usize;
    let exp = exp.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exp as i32);
    format!("{:.1} {}", value, UNITS[exp])
}
