// Copyright @yucwang 2026

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Per-view feature maps a sample can provide. `mask` only exists for the
/// training stage.
pub const FEATURES: [&str; 6] = ["im", "albedo", "normal", "depth", "material", "mask"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Train,
    Validation,
    Test,
}

/// One enumerated view: a stable sample id plus a named path per feature.
/// Enumeration never touches the filesystem beyond the split file itself;
/// loading the maps is the consumer's business.
#[derive(Debug)]
pub struct SampleEntry {
    pub id: String,
    pub features: BTreeMap<String, PathBuf>,
}

#[derive(Debug)]
pub enum DatasetError {
    Io(std::io::Error),
    Parse(String),
    MissingFeature(String),
}

impl From<std::io::Error> for DatasetError {
    fn from(err: std::io::Error) -> Self {
        DatasetError::Io(err)
    }
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Io(err) => write!(f, "io error: {}", err),
            DatasetError::Parse(msg) => write!(f, "parse error: {}", msg),
            DatasetError::MissingFeature(id) => write!(f, "sample {} is missing a feature", id),
        }
    }
}

impl std::error::Error for DatasetError {}

pub fn load_split<P: AsRef<Path>>(
    path: P,
    stage: Stage,
    features: &[&str],
) -> Result<Vec<SampleEntry>, DatasetError> {
    let text = fs::read_to_string(path)?;
    enumerate_split(&text, stage, features)
}

/// Map every split-file line to a sample id and its per-feature file
/// paths. Training views are named `{view}_{feature}.exr` (mask as png);
/// test and validation views store the photograph as `{view}.png` and
/// every other feature as `{view}.exr`, with no mask at all.
pub fn enumerate_split(
    split: &str,
    stage: Stage,
    features: &[&str],
) -> Result<Vec<SampleEntry>, DatasetError> {
    let mut samples: Vec<SampleEntry> = Vec::new();
    let mut seen: BTreeSet<String> = BTreeSet::new();

    log::debug!("collecting features for {} requested kinds", features.len());

    for line in split.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let first_path = match line.split_whitespace().next() {
            Some(p) => p,
            None => continue,
        };

        let (scene_folder, filename) = match first_path.rsplit_once('/') {
            Some((folder, name)) => (folder, name),
            None => ("", first_path),
        };
        if filename.is_empty() {
            return Err(DatasetError::Parse(format!(
                "split line has no file name: {}", line
            )));
        }

        let view_id = match stage {
            Stage::Test | Stage::Validation => filename.split('.').next().unwrap_or(filename),
            Stage::Train => filename.split('_').next().unwrap_or(filename),
        };
        let id = if scene_folder.is_empty() {
            view_id.to_string()
        } else {
            format!("{}/{}", scene_folder, view_id)
        };
        if !seen.insert(id.clone()) {
            continue;
        }

        let folder = Path::new(scene_folder);
        let mut entry = SampleEntry {
            id,
            features: BTreeMap::new(),
        };
        for feature in features {
            let feature_filename = match stage {
                Stage::Test | Stage::Validation => {
                    if *feature == "mask" {
                        continue;
                    } else if *feature == "im" {
                        format!("{}.png", view_id)
                    } else {
                        format!("{}.exr", view_id)
                    }
                }
                Stage::Train => {
                    if *feature == "mask" {
                        format!("{}_{}.png", view_id, feature)
                    } else {
                        format!("{}_{}.exr", view_id, feature)
                    }
                }
            };
            entry
                .features
                .insert(feature.to_string(), folder.join(feature_filename));
        }
        samples.push(entry);
    }

    // Every sample must carry the same feature set.
    if let Some(first) = samples.first() {
        let expected = first.features.len();
        for sample in samples.iter() {
            if sample.features.len() != expected {
                return Err(DatasetError::MissingFeature(sample.id.clone()));
            }
        }
    }

    log::debug!("collected {} samples", samples.len());
    Ok(samples)
}
