//! Yield predictor backed by a pre-trained regression artifact
//!
//! The artifact is an externally trained boosted regression forest exported
//! as JSON: a base score plus flat node arrays per tree. It is loaded once
//! at process start and treated as immutable for the process lifetime; no
//! reload, no versioning, no integrity check before use.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::services::features::FeatureVector;

/// Capability exposed to the serving core.
///
/// The concrete artifact format stays behind this trait so callers never
/// depend on the serialization the trainer happened to use.
pub trait Predictor: Send + Sync {
    /// One scalar yield estimate (t/ha) for one engineered feature row.
    fn predict(&self, features: &FeatureVector) -> f64;
}

/// Boosted regression forest: output = base_score + Σ tree(x)
#[derive(Debug, Deserialize)]
pub struct ForestModel {
    base_score: f64,
    trees: Vec<Tree>,
}

/// One regression tree as flat node arrays.
///
/// `feature[i] >= 0` marks an internal node splitting on that feature index
/// (artifact order); `-1` marks a leaf whose output is `value[i]`.
#[derive(Debug, Deserialize)]
struct Tree {
    feature: Vec<i64>,
    threshold: Vec<f64>,
    left: Vec<usize>,
    right: Vec<usize>,
    value: Vec<f64>,
}

impl Tree {
    fn eval(&self, x: &[f64; 7]) -> f64 {
        let mut node = 0usize;
        while self.feature[node] >= 0 {
            let feature = self.feature[node] as usize;
            node = if x[feature] < self.threshold[node] {
                self.left[node]
            } else {
                self.right[node]
            };
        }
        self.value[node]
    }
}

impl ForestModel {
    /// Load the artifact from disk. This is the single construction path;
    /// a failure here is fatal at startup.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Model load failed: cannot open {}", path.display()))?;
        let model: ForestModel = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Model load failed: cannot parse {}", path.display()))?;

        tracing::info!(
            "Model loaded successfully ({} trees, base score {})",
            model.trees.len(),
            model.base_score
        );
        Ok(model)
    }
}

impl Predictor for ForestModel {
    fn predict(&self, features: &FeatureVector) -> f64 {
        let x = features.as_ordered();
        self.base_score + self.trees.iter().map(|tree| tree.eval(&x)).sum::<f64>()
    }
}
