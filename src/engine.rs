//! Engine orchestration: run the layers, then aggregate.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::aggregate;
use crate::clause::Clause;
use crate::error::{RiskError, RiskResult};
use crate::flag::LayerResult;
use crate::layers::{standard_layers, RiskLayer};
use crate::result::RuleEngineResult;
use crate::taxonomy::Taxonomy;

/// How the layers are scheduled. Both modes produce identical results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionMode {
    #[default]
    Sequential,
    /// One scoped thread per layer, joined before aggregation.
    Parallel,
}

/// Engine settings, usually read from a RON file:
///
/// ```ron
/// (execution: Parallel, taxonomy: Some("taxonomy.ron"))
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub execution: ExecutionMode,
    /// RON taxonomy file. `None` uses [`Taxonomy::standard`].
    pub taxonomy: Option<PathBuf>,
}

impl EngineConfig {
    pub fn from_ron_str(input: &str) -> RiskResult<Self> {
        ron::from_str(input).map_err(|e| RiskError::Config {
            message: e.to_string(),
        })
    }

    pub fn load(path: &Path) -> RiskResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| RiskError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&content)
    }

    /// The configured taxonomy. Relative paths resolve against `base_dir`.
    pub fn load_taxonomy(&self, base_dir: &Path) -> RiskResult<Taxonomy> {
        match &self.taxonomy {
            Some(path) if path.is_relative() => Taxonomy::load(&base_dir.join(path)),
            Some(path) => Taxonomy::load(path),
            None => Ok(Taxonomy::standard()),
        }
    }
}

/// Runs the seven layers over a clause list and aggregates their findings.
pub struct RiskEngine {
    layers: Vec<Box<dyn RiskLayer>>,
    mode: ExecutionMode,
}

impl Default for RiskEngine {
    fn default() -> Self {
        Self::new(ExecutionMode::Sequential)
    }
}

impl RiskEngine {
    pub fn new(mode: ExecutionMode) -> Self {
        Self {
            layers: standard_layers(),
            mode,
        }
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Evaluate `clauses`. Never fails; an empty list yields a clean result.
    pub fn run(&self, clauses: &[Clause]) -> RuleEngineResult {
        let mut layer_results = match self.mode {
            ExecutionMode::Sequential => self.run_sequential(clauses),
            ExecutionMode::Parallel => self.run_parallel(clauses),
        };
        // Dedup tie-breaking depends on layer order.
        layer_results.sort_by_key(|result| result.layer);

        for result in &layer_results {
            debug!(
                layer = result.layer.number(),
                flags = result.flags.len(),
                positives = result.positive_findings.len(),
                "layer finished"
            );
        }

        let (layer_results, assessment) = aggregate(layer_results);

        RuleEngineResult {
            layer_results,
            overall_risk: assessment.overall_risk,
            score: assessment.score,
            recommendation: assessment.recommendation,
            governing_law: None,
        }
    }

    fn run_sequential(&self, clauses: &[Clause]) -> Vec<LayerResult> {
        self.layers.iter().map(|layer| layer.run(clauses)).collect()
    }

    fn run_parallel(&self, clauses: &[Clause]) -> Vec<LayerResult> {
        thread::scope(|scope| {
            let handles: Vec<_> = self
                .layers
                .iter()
                .map(|layer| (layer.id(), scope.spawn(move || layer.run(clauses))))
                .collect();

            handles
                .into_iter()
                .map(|(id, handle)| match handle.join() {
                    Ok(result) => result,
                    // Layers never fail; re-raise a panic on the calling thread.
                    Err(panic) => {
                        debug!(layer = id.number(), "layer thread panicked");
                        std::panic::resume_unwind(panic)
                    }
                })
                .collect()
        })
    }
}

/// Run the standard engine sequentially.
pub fn run(clauses: &[Clause]) -> RuleEngineResult {
    RiskEngine::default().run(clauses)
}
