//! The caller-facing façade: text in, clauses and verdict out.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clause::Clause;
use crate::engine::{EngineConfig, ExecutionMode, RiskEngine};
use crate::error::{RiskError, RiskResult};
use crate::result::RuleEngineResult;
use crate::segmenter::ClauseSegmenter;
use crate::taxonomy::Taxonomy;

/// Segmented clauses together with the engine result computed from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub clauses: Vec<Clause>,
    pub result: RuleEngineResult,
}

impl Analysis {
    pub fn clause(&self, id: &str) -> Option<&Clause> {
        self.clauses.iter().find(|clause| clause.id == id)
    }
}

/// Owns a taxonomy and an engine; reusable across documents.
///
/// ```
/// use layered_risk::{ContractAnalyzer, Verdict};
///
/// let analyzer = ContractAnalyzer::default();
/// let analysis = analyzer
///     .analyze("TERMINATION\nThe Company may terminate this Agreement without notice.")
///     .unwrap();
/// assert_eq!(analysis.result.verdict(), Verdict::DoNotSign);
/// ```
pub struct ContractAnalyzer {
    taxonomy: Taxonomy,
    engine: RiskEngine,
}

impl Default for ContractAnalyzer {
    fn default() -> Self {
        Self::new(Taxonomy::standard(), ExecutionMode::Sequential)
    }
}

impl ContractAnalyzer {
    pub fn new(taxonomy: Taxonomy, mode: ExecutionMode) -> Self {
        Self {
            taxonomy,
            engine: RiskEngine::new(mode),
        }
    }

    /// Build from a configuration, resolving a relative taxonomy path against `base_dir`.
    pub fn from_config(config: &EngineConfig, base_dir: &std::path::Path) -> RiskResult<Self> {
        let taxonomy = config.load_taxonomy(base_dir)?;
        Ok(Self::new(taxonomy, config.execution))
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn segment(&self, text: &str) -> Vec<Clause> {
        ClauseSegmenter::new(&self.taxonomy).segment(text)
    }

    /// Segment and evaluate `text`. Whitespace-only input is rejected.
    pub fn analyze(&self, text: &str) -> RiskResult<Analysis> {
        if text.trim().is_empty() {
            return Err(RiskError::EmptyInput);
        }

        let clauses = self.segment(text);
        let result = self.engine.run(&clauses);
        debug!(
            clauses = clauses.len(),
            verdict = %result.verdict(),
            score = result.score,
            "analyzed contract"
        );

        Ok(Analysis { clauses, result })
    }
}
