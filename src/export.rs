//! High-level export entry points.
//!
//! Each function runs one full, stateless export: validate the input set,
//! build the archive plans for the chosen layout, then emit every archive
//! with progress reporting. A run either completes or stops at the first
//! unrecoverable failure; there is no mid-export cancellation and no retry.

use std::path::PathBuf;

use chrono::Local;
use tracing::{info, warn};

use crate::buckets::build_buckets;
use crate::classify::has_textures_folder;
use crate::common::{CustomNode, InputFile};
use crate::emit::{write_plan, DEFAULT_COMPRESSION_LEVEL};
use crate::normal_map::{plan_normal_maps, DEFAULT_BLUE_THRESHOLD};
use crate::plan::ArchivePlan;
use crate::progress::{ProgressCallback, ProgressReporter};
use crate::strategy::{categorized, custom, marketplace};
use crate::PackError;

/// Options shared by every export run.
pub struct ExportOptions {
    /// Sanitized package name; the core assumes the caller already stripped
    /// path separators and reserved characters.
    pub package_name: String,
    /// Directory archives are written into.
    pub out_dir: PathBuf,
    /// Deflate level for the ZIP container.
    pub level: i32,
    /// Blue-channel mean threshold for normal-map detection.
    pub blue_threshold: f32,
}

impl ExportOptions {
    pub fn new(package_name: impl Into<String>, out_dir: impl Into<PathBuf>) -> Self {
        ExportOptions {
            package_name: package_name.into(),
            out_dir: out_dir.into(),
            level: DEFAULT_COMPRESSION_LEVEL,
            blue_threshold: DEFAULT_BLUE_THRESHOLD,
        }
    }
}

/// Marketplace layout: one archive per detected model format.
///
/// The normal-map decision map is computed once, before any plan is built,
/// and shared across all sibling archives of this run.
pub fn export_marketplace(
    files: &[InputFile],
    opts: &ExportOptions,
    on_progress: Option<Box<ProgressCallback>>,
) -> Result<Vec<PathBuf>, PackError> {
    if files.is_empty() {
        return Err(PackError::EmptyFileSet);
    }
    if !has_textures_folder(files) {
        // Advisory only: the layout works best with a "Textures" folder but
        // its absence never blocks the export.
        warn!("no 'Textures' folder found among the inputs");
    }

    let buckets = build_buckets(files);
    let decisions = plan_normal_maps(&buckets.textures, opts.blue_threshold)?;
    let plans = marketplace::build_plans(&buckets, &opts.package_name, &decisions)?;
    info!(archives = plans.len(), "marketplace export planned");
    emit_all(&plans, opts, on_progress)
}

/// Categorized layout: one archive with a folder per non-empty bucket.
pub fn export_categorized(
    files: &[InputFile],
    opts: &ExportOptions,
    on_progress: Option<Box<ProgressCallback>>,
) -> Result<Vec<PathBuf>, PackError> {
    if files.is_empty() {
        return Err(PackError::EmptyFileSet);
    }
    let buckets = build_buckets(files);
    let plan = categorized::build_plan(&buckets, &opts.package_name, Local::now().date_naive());
    emit_all(std::slice::from_ref(&plan), opts, on_progress)
}

/// Custom layout: transcribe a user-authored folder tree into one archive.
pub fn export_custom(
    children: &[CustomNode],
    opts: &ExportOptions,
    on_progress: Option<Box<ProgressCallback>>,
) -> Result<Vec<PathBuf>, PackError> {
    let plan = custom::build_plan(children, &opts.package_name)?;
    emit_all(std::slice::from_ref(&plan), opts, on_progress)
}

fn emit_all(
    plans: &[ArchivePlan],
    opts: &ExportOptions,
    on_progress: Option<Box<ProgressCallback>>,
) -> Result<Vec<PathBuf>, PackError> {
    let mut reporter = ProgressReporter::new(on_progress);
    reporter.set_total(plans.iter().map(|p| p.len() as u64).sum());

    let mut written = Vec::with_capacity(plans.len());
    for plan in plans {
        info!(archive = %plan.file_name, entries = plan.len(), "writing archive");
        written.push(write_plan(plan, &opts.out_dir, opts.level, &mut reporter)?);
    }
    if let Some(last) = plans.last() {
        reporter.force_completion(&last.file_name);
    }
    Ok(written)
}
