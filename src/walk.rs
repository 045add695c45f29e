//! Recursive enumeration of input files and directories.
//!
//! Stands in for the browser's drag-and-drop directory walking. The
//! traversal order is pinned to one deterministic policy: depth-first,
//! alphabetical within each directory, so repeated runs over an unchanged
//! tree enumerate files identically. Relative paths are prefixed with the
//! walked root's folder name and always use forward slashes.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::common::InputFile;
use crate::PackError;

/// Resolve every input (file or directory) into a flat, ordered list of
/// [`InputFile`] records.
pub fn collect_input_files(inputs: &[PathBuf]) -> Result<Vec<InputFile>, PackError> {
    let mut files = Vec::new();
    for input in inputs {
        let meta = fs::metadata(input).map_err(|e| PackError::io(e, input))?;
        if meta.is_file() {
            files.push(InputFile::from_disk(input, None)?);
        } else {
            walk_directory(input, &mut files)?;
        }
    }
    debug!(count = files.len(), "input files collected");
    Ok(files)
}

fn walk_directory(root: &Path, files: &mut Vec<InputFile>) -> Result<(), PackError> {
    let root_name = root
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_default();
            match e.into_io_error() {
                Some(io) => PackError::io(io, path),
                None => PackError::io(std::io::Error::other("walk error"), path),
            }
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let rel_path = if root_name.is_empty() {
            rel
        } else {
            format!("{root_name}/{rel}")
        };
        files.push(InputFile::from_disk(entry.path(), Some(rel_path))?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    #[test]
    fn walks_depth_first_alphabetical_with_root_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("Pack");
        fs::create_dir_all(root.join("Textures/wood")).unwrap();
        fs::create_dir_all(root.join("Models")).unwrap();
        for rel in [
            "Models/chair.fbx",
            "Textures/wall.png",
            "Textures/wood/trim.png",
            "readme.txt",
        ] {
            let mut f = File::create(root.join(rel)).unwrap();
            writeln!(f, "x").unwrap();
        }

        let files = collect_input_files(&[root]).unwrap();
        let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(
            paths,
            [
                "Pack/Models/chair.fbx",
                "Pack/Textures/wall.png",
                "Pack/Textures/wood/trim.png",
                "Pack/readme.txt",
            ]
        );
    }

    #[test]
    fn single_file_path_falls_back_to_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chair.fbx");
        File::create(&path).unwrap().write_all(b"mesh").unwrap();

        let files = collect_input_files(&[path]).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "chair.fbx");
        assert_eq!(files[0].path, "chair.fbx");
        assert_eq!(files[0].size, 4);
    }

    #[test]
    fn missing_input_is_an_io_error() {
        let err = collect_input_files(&[PathBuf::from("/no/such/dir")]).unwrap_err();
        assert!(matches!(err, PackError::Io { .. }));
    }
}
