//! Custom layout: structural transcription of a user-authored folder tree.
//!
//! All organizational decisions belong to the external tree editor; this
//! strategy mirrors the tree one-to-one under a top-level `<package>/`
//! folder. Folders become explicit archive directories even when empty,
//! files keep their original leaf names, and no classification or renaming
//! logic applies.

use crate::common::CustomNode;
use crate::plan::ArchivePlan;
use crate::PackError;

/// Build the single custom archive plan from the tree root's children.
///
/// Fails with [`PackError::EmptyCustomStructure`] when there is nothing to
/// transcribe. Archive filename is `<package>.zip`.
pub fn build_plan(children: &[CustomNode], package: &str) -> Result<ArchivePlan, PackError> {
    if children.is_empty() {
        return Err(PackError::EmptyCustomStructure);
    }

    let mut plan = ArchivePlan::new(format!("{package}.zip"));
    plan.push_dir(package);
    for child in children {
        transcribe(&mut plan, package, child);
    }
    Ok(plan)
}

fn transcribe(plan: &mut ArchivePlan, prefix: &str, node: &CustomNode) {
    match node {
        CustomNode::Folder { name, children } => {
            let path = format!("{prefix}/{name}");
            plan.push_dir(&path);
            for child in children {
                transcribe(plan, &path, child);
            }
        }
        CustomNode::File { name, file } => {
            plan.push_file(format!("{prefix}/{name}"), file.clone());
        }
    }
}
