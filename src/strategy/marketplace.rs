//! Marketplace layout: one archive per detected 3D-model format.
//!
//! Every format archive is self-contained: it carries the format's models at
//! the root, the full (renamed) texture set under `Textures/`, portable
//! packages under `Unity/` and engine-native assets under `UE/`. The
//! normal-map decision map is computed once per export and shared across all
//! format plans so sibling archives never disagree about the texture set.

use std::collections::HashMap;

use crate::buckets::{material_for, Buckets};
use crate::classify::texture_relative_path;
use crate::naming::build_standard_name;
use crate::normal_map::{convert_to_directx, NormalEncoding, NormalMapDecision};
use crate::plan::ArchivePlan;
use crate::PackError;

/// Build one archive plan per model format, in first-encounter order.
///
/// Fails with [`PackError::NoModelFiles`] when the input holds no recognized
/// model file. `decisions` is the export-wide normal-map decision map from
/// [`crate::normal_map::plan_normal_maps`].
pub fn build_plans(
    buckets: &Buckets,
    package: &str,
    decisions: &HashMap<String, NormalMapDecision>,
) -> Result<Vec<ArchivePlan>, PackError> {
    if buckets.models.is_empty() {
        return Err(PackError::NoModelFiles);
    }

    // Convert each OpenGL-only normal map exactly once; the bytes are shared
    // by every format archive.
    let mut converted: HashMap<String, Vec<u8>> = HashMap::new();
    for texture in &buckets.textures {
        if decisions.get(&texture.name) == Some(&NormalMapDecision::Convert) {
            let bytes = texture.read()?;
            let flipped = convert_to_directx(&bytes).map_err(|e| PackError::Image {
                name: texture.name.clone(),
                source: e,
            })?;
            converted.insert(texture.name.clone(), flipped);
        }
    }

    let mut plans = Vec::with_capacity(buckets.models.len());
    for (format, models) in &buckets.models {
        let root = format!("{package}_{format}");
        let mut plan = ArchivePlan::new(format!("{root}.zip"));

        for model in models {
            plan.push_file(format!("{root}/{}", model.name), model.clone());
            if format == "OBJ" {
                if let Some(mtl) = material_for(&buckets.materials, &model.name) {
                    plan.push_file(format!("{root}/{}", mtl.name), mtl.clone());
                }
            }
        }

        for texture in &buckets.textures {
            let decision = decisions.get(&texture.name).copied();
            if decision == Some(NormalMapDecision::Exclude) {
                continue;
            }
            // Kept or converted normal maps are DirectX-encoded by now.
            let hint = decision.map(|_| NormalEncoding::DirectX);
            let new_name = build_standard_name(&texture.name, package, hint);
            let dest = match texture_relative_path(&texture.path) {
                Some(rel) if !rel.is_empty() => format!("{root}/Textures/{rel}/{new_name}"),
                _ => format!("{root}/Textures/{new_name}"),
            };
            match converted.get(&texture.name) {
                Some(bytes) => plan.push_bytes(dest, bytes.clone()),
                None => plan.push_file(dest, texture.clone()),
            }
        }

        for package_file in &buckets.packages {
            plan.push_file(format!("{root}/Unity/{}", package_file.name), package_file.clone());
        }
        for asset in &buckets.engine_assets {
            plan.push_file(format!("{root}/UE/{}", asset.name), asset.clone());
        }

        plans.push(plan);
    }
    Ok(plans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buckets::build_buckets;
    use crate::common::InputFile;

    fn file(name: &str) -> InputFile {
        InputFile::in_memory(name, name, Vec::new())
    }

    fn file_at(name: &str, path: &str) -> InputFile {
        InputFile::in_memory(name, path, Vec::new())
    }

    #[test]
    fn no_models_is_fatal() {
        let buckets = build_buckets(&[file("wall.png")]);
        let err = build_plans(&buckets, "Pack", &HashMap::new()).unwrap_err();
        assert!(matches!(err, PackError::NoModelFiles));
    }

    #[test]
    fn per_format_layout_with_obj_materials() {
        let files = vec![
            file("chair.fbx"),
            file("chair.obj"),
            file("chair.mtl"),
            file("wall_basecolor.png"),
        ];
        let buckets = build_buckets(&files);
        let plans = build_plans(&buckets, "Pack", &HashMap::new()).unwrap();

        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].file_name, "Pack_FBX.zip");
        assert_eq!(
            plans[0].dest_paths(),
            ["Pack_FBX/chair.fbx", "Pack_FBX/Textures/T_Pack_D.png"]
        );
        assert_eq!(plans[1].file_name, "Pack_OBJ.zip");
        assert_eq!(
            plans[1].dest_paths(),
            [
                "Pack_OBJ/chair.obj",
                "Pack_OBJ/chair.mtl",
                "Pack_OBJ/Textures/T_Pack_D.png"
            ]
        );
    }

    #[test]
    fn textures_preserve_relative_subtree() {
        let files = vec![
            file("chair.fbx"),
            file_at("trim.png", "Pack/Textures/wood/trim.png"),
        ];
        let buckets = build_buckets(&files);
        let plans = build_plans(&buckets, "Pack", &HashMap::new()).unwrap();
        assert_eq!(
            plans[0].dest_paths(),
            ["Pack_FBX/chair.fbx", "Pack_FBX/Textures/wood/T_Pack_trim.png"]
        );
    }

    #[test]
    fn packages_and_engine_assets_are_flattened() {
        let files = vec![
            file("chair.fbx"),
            file_at("tool.unitypackage", "misc/tool.unitypackage"),
            file_at("chair.uasset", "engine/chair.uasset"),
        ];
        let buckets = build_buckets(&files);
        let plans = build_plans(&buckets, "Pack", &HashMap::new()).unwrap();
        let dests = plans[0].dest_paths();
        assert!(dests.contains(&"Pack_FBX/Unity/tool.unitypackage"));
        assert!(dests.contains(&"Pack_FBX/UE/chair.uasset"));
    }

    #[test]
    fn plans_are_idempotent_for_unchanged_input() {
        let files = vec![file("chair.fbx"), file("chair.obj"), file("wall_albedo.png")];
        let buckets = build_buckets(&files);
        let first = build_plans(&buckets, "Pack", &HashMap::new()).unwrap();
        let second = build_plans(&buckets, "Pack", &HashMap::new()).unwrap();
        let as_lists = |plans: &[ArchivePlan]| {
            plans
                .iter()
                .map(|p| (p.file_name.clone(), p.dest_paths().join("|")))
                .collect::<Vec<_>>()
        };
        assert_eq!(as_lists(&first), as_lists(&second));
    }
}
