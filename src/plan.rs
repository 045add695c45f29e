//! Archive entry plans.
//!
//! A plan is the full, ordered description of one output archive before
//! serialization: a top-level archive filename plus `(destination path,
//! content source)` pairs. Destination paths use forward slashes and are
//! unique within one plan; pushing a duplicate destination replaces the
//! earlier entry in place (last-write-wins), which is how naming collisions
//! between same-role textures or same-named tree siblings resolve.

use crate::common::InputFile;

/// Where one archive entry's bytes come from.
#[derive(Debug, Clone)]
pub enum EntrySource {
    /// Read lazily from an input file at emit time.
    Input(InputFile),
    /// Pre-computed bytes (converted normal maps).
    Bytes(Vec<u8>),
    /// An explicit directory entry, recorded even with zero files.
    Directory,
}

/// One `(destination, source)` pair of an archive plan.
#[derive(Debug, Clone)]
pub struct PlanEntry {
    pub dest: String,
    pub source: EntrySource,
}

impl PlanEntry {
    pub fn is_dir(&self) -> bool {
        matches!(self.source, EntrySource::Directory)
    }
}

/// The full set of entries describing one output archive.
#[derive(Debug, Clone)]
pub struct ArchivePlan {
    /// On-disk filename of the archive, e.g. `Pack_FBX.zip`.
    pub file_name: String,
    entries: Vec<PlanEntry>,
}

impl ArchivePlan {
    pub fn new(file_name: impl Into<String>) -> Self {
        ArchivePlan { file_name: file_name.into(), entries: Vec::new() }
    }

    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add a lazily read file entry.
    pub fn push_file(&mut self, dest: impl Into<String>, file: InputFile) {
        self.push(PlanEntry { dest: dest.into(), source: EntrySource::Input(file) });
    }

    /// Add an entry with pre-computed bytes.
    pub fn push_bytes(&mut self, dest: impl Into<String>, bytes: Vec<u8>) {
        self.push(PlanEntry { dest: dest.into(), source: EntrySource::Bytes(bytes) });
    }

    /// Record an explicit directory entry. Duplicate directories are ignored.
    pub fn push_dir(&mut self, dest: impl Into<String>) {
        let dest = dest.into();
        if self.entries.iter().any(|e| e.dest == dest && e.is_dir()) {
            return;
        }
        self.push(PlanEntry { dest, source: EntrySource::Directory });
    }

    fn push(&mut self, entry: PlanEntry) {
        // Last write wins, position of the first write is kept so entry
        // ordering stays stable across repeated runs.
        if let Some(existing) = self.entries.iter_mut().find(|e| e.dest == entry.dest) {
            *existing = entry;
        } else {
            self.entries.push(entry);
        }
    }

    /// Destination paths in plan order, handy for tests and dry runs.
    pub fn dest_paths(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.dest.as_str()).collect()
    }
}
