//! Categorized layout: one archive with a folder per non-empty bucket.
//!
//! Files keep their original leaf names here; there is no texture renaming
//! and no normal-map handling, and texture substructure is flattened.

use chrono::NaiveDate;

use crate::buckets::Buckets;
use crate::plan::ArchivePlan;

/// On-disk filename: `<package>Assets_<ISO-date>.zip`.
pub fn archive_file_name(package: &str, date: NaiveDate) -> String {
    format!("{package}Assets_{}.zip", date.format("%Y-%m-%d"))
}

/// Build the single categorized archive plan, rooted at `<package>Assets`.
///
/// One subfolder per non-empty bucket only: per-format model folders,
/// `Textures/`, `Unity/`, `UE/`, `Source/`. Material definitions join the
/// `OBJ/` folder when obj models exist and are otherwise dropped from the
/// plan — a quirk of the layout that is preserved as documented behavior,
/// not corrected.
pub fn build_plan(buckets: &Buckets, package: &str, date: NaiveDate) -> ArchivePlan {
    let root = format!("{package}Assets");
    let mut plan = ArchivePlan::new(archive_file_name(package, date));

    for (format, models) in &buckets.models {
        for model in models {
            plan.push_file(format!("{root}/{format}/{}", model.name), model.clone());
        }
        if format == "OBJ" {
            for mtl in &buckets.materials {
                plan.push_file(format!("{root}/OBJ/{}", mtl.name), mtl.clone());
            }
        }
    }
    for texture in &buckets.textures {
        plan.push_file(format!("{root}/Textures/{}", texture.name), texture.clone());
    }
    for package_file in &buckets.packages {
        plan.push_file(format!("{root}/Unity/{}", package_file.name), package_file.clone());
    }
    for asset in &buckets.engine_assets {
        plan.push_file(format!("{root}/UE/{}", asset.name), asset.clone());
    }
    for scene in &buckets.source_scenes {
        plan.push_file(format!("{root}/Source/{}", scene.name), scene.clone());
    }

    plan
}
