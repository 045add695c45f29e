//! One-pass partitioning of the input file set into typed buckets.

use indexmap::IndexMap;

use crate::classify::{base_stem, classify_by_extension, FileCategory};
use crate::common::InputFile;

/// The categorized file set every packaging layout starts from.
///
/// `models` is keyed by the uppercased, dot-less extension (`FBX`, `OBJ`, ...)
/// and preserves first-encounter order so that per-format archives come out
/// in a deterministic sequence. All buckets preserve input order.
#[derive(Debug, Default, Clone)]
pub struct Buckets {
    pub models: IndexMap<String, Vec<InputFile>>,
    pub textures: Vec<InputFile>,
    pub packages: Vec<InputFile>,
    pub engine_assets: Vec<InputFile>,
    pub materials: Vec<InputFile>,
    pub source_scenes: Vec<InputFile>,
    pub other: Vec<InputFile>,
}

impl Buckets {
    /// Total number of files that landed in a typed bucket.
    pub fn typed_count(&self) -> usize {
        self.models.values().map(Vec::len).sum::<usize>()
            + self.textures.len()
            + self.packages.len()
            + self.engine_assets.len()
            + self.materials.len()
            + self.source_scenes.len()
    }
}

/// Classify every file and append it to its bucket, input order preserved.
///
/// No cross-file logic happens here; pairing `.mtl` files with obj models is
/// a strategy-local second pass (see [`material_for`]).
pub fn build_buckets(files: &[InputFile]) -> Buckets {
    let mut buckets = Buckets::default();
    for file in files {
        match classify_by_extension(&file.name) {
            FileCategory::Model => {
                let key = crate::classify::extension_of(&file.name)
                    .trim_start_matches('.')
                    .to_ascii_uppercase();
                buckets.models.entry(key).or_default().push(file.clone());
            }
            FileCategory::Image => buckets.textures.push(file.clone()),
            FileCategory::Package => buckets.packages.push(file.clone()),
            FileCategory::EngineAsset => buckets.engine_assets.push(file.clone()),
            FileCategory::Material => buckets.materials.push(file.clone()),
            FileCategory::SourceScene => buckets.source_scenes.push(file.clone()),
            FileCategory::Other => buckets.other.push(file.clone()),
        }
    }
    buckets
}

/// Find the material definition paired with a model by base name
/// (case-insensitive, extensions stripped).
pub fn material_for<'a>(materials: &'a [InputFile], model_name: &str) -> Option<&'a InputFile> {
    let stem = base_stem(model_name).to_ascii_lowercase();
    materials
        .iter()
        .find(|m| base_stem(&m.name).to_ascii_lowercase() == stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> InputFile {
        InputFile::in_memory(name, name, Vec::new())
    }

    #[test]
    fn partitions_in_one_pass() {
        let files = vec![
            file("chair.fbx"),
            file("chair.obj"),
            file("chair.mtl"),
            file("wall.png"),
            file("scene.blend"),
            file("pack.unitypackage"),
            file("level.umap"),
            file("readme.txt"),
        ];
        let buckets = build_buckets(&files);
        assert_eq!(buckets.models.len(), 2);
        assert_eq!(buckets.models["FBX"].len(), 1);
        assert_eq!(buckets.models["OBJ"].len(), 1);
        assert_eq!(buckets.textures.len(), 1);
        assert_eq!(buckets.materials.len(), 1);
        assert_eq!(buckets.source_scenes.len(), 1);
        assert_eq!(buckets.packages.len(), 1);
        assert_eq!(buckets.engine_assets.len(), 1);
        assert_eq!(buckets.other.len(), 1);
        assert_eq!(buckets.typed_count(), 7);
    }

    #[test]
    fn model_formats_keep_first_encounter_order() {
        let files = vec![file("b.obj"), file("a.fbx"), file("c.obj")];
        let buckets = build_buckets(&files);
        let keys: Vec<&String> = buckets.models.keys().collect();
        assert_eq!(keys, ["OBJ", "FBX"]);
        assert_eq!(buckets.models["OBJ"].len(), 2);
    }

    #[test]
    fn material_pairing_is_case_insensitive() {
        let materials = vec![file("Chair.MTL")];
        assert!(material_for(&materials, "chair.obj").is_some());
        assert!(material_for(&materials, "table.obj").is_none());
    }
}
