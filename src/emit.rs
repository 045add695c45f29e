//! Archive emission: serializing an entry plan into a ZIP file.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::plan::{ArchivePlan, EntrySource};
use crate::progress::ProgressReporter;
use crate::PackError;

/// Deflate level used when the caller does not override it; matches the
/// original packager's compressor settings.
pub const DEFAULT_COMPRESSION_LEVEL: i32 = 6;

/// Serialize `plan` into `<out_dir>/<plan.file_name>`.
///
/// Entries are written in plan order. If any entry's content cannot be read
/// the partially written archive is removed and the error propagated; a
/// fatal failure never leaves a corrupt archive behind.
pub fn write_plan(
    plan: &ArchivePlan,
    out_dir: &Path,
    level: i32,
    reporter: &mut ProgressReporter,
) -> Result<PathBuf, PackError> {
    let out_path = out_dir.join(&plan.file_name);
    match write_entries(plan, &out_path, level, reporter) {
        Ok(()) => {
            info!(archive = %out_path.display(), entries = plan.len(), "archive written");
            Ok(out_path)
        }
        Err(e) => {
            // Discard the partial archive, then surface the original error.
            let _ = fs::remove_file(&out_path);
            Err(e)
        }
    }
}

fn write_entries(
    plan: &ArchivePlan,
    out_path: &Path,
    level: i32,
    reporter: &mut ProgressReporter,
) -> Result<(), PackError> {
    let file = File::create(out_path).map_err(|e| PackError::io(e, out_path))?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(level));

    for entry in plan.entries() {
        match &entry.source {
            EntrySource::Directory => {
                zip.add_directory(entry.dest.as_str(), options)?;
            }
            EntrySource::Input(input) => {
                let bytes = input.read()?;
                zip.start_file(entry.dest.as_str(), options)?;
                zip.write_all(&bytes)
                    .map_err(|e| PackError::io(e, out_path))?;
            }
            EntrySource::Bytes(bytes) => {
                zip.start_file(entry.dest.as_str(), options)?;
                zip.write_all(bytes).map_err(|e| PackError::io(e, out_path))?;
            }
        }
        reporter.advance(&entry.dest);
    }

    zip.finish()?
        .flush()
        .map_err(|e| PackError::io(e, out_path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::InputFile;
    use std::io::Read;

    #[test]
    fn writes_files_and_explicit_directories() {
        let dir = tempfile::tempdir().unwrap();
        let mut plan = ArchivePlan::new("out.zip");
        plan.push_dir("Pack/Empty");
        plan.push_file("Pack/a.txt", InputFile::in_memory("a.txt", "a.txt", b"hello".to_vec()));

        let mut reporter = ProgressReporter::new(None);
        reporter.set_total(plan.len() as u64);
        let path = write_plan(&plan, dir.path(), DEFAULT_COMPRESSION_LEVEL, &mut reporter).unwrap();

        let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
        assert!(archive.by_name("Pack/Empty/").is_ok());
        let mut content = String::new();
        archive
            .by_name("Pack/a.txt")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "hello");
    }

    #[test]
    fn unreadable_content_discards_the_archive() {
        let dir = tempfile::tempdir().unwrap();
        let missing = InputFile {
            name: "gone.bin".to_string(),
            size: 0,
            path: "gone.bin".to_string(),
            source: crate::common::ContentSource::Disk(dir.path().join("does-not-exist.bin")),
        };
        let mut plan = ArchivePlan::new("out.zip");
        plan.push_file("Pack/gone.bin", missing);

        let mut reporter = ProgressReporter::new(None);
        let err = write_plan(&plan, dir.path(), 6, &mut reporter).unwrap_err();
        assert!(matches!(err, PackError::ContentRead { .. }));
        assert!(!dir.path().join("out.zip").exists());
    }
}
