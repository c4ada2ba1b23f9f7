//! Writes provenance, advisories and citations onto existing flags.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use layered_risk::{Analysis, FlagEnrichment, Severity};

use crate::advisor::{Advisories, Advisor, AdvisoryRequest, StaticAdvisor};
use crate::precedents::PrecedentSelector;

/// Only High and Medium flags are worth an advisory.
fn is_actionable(severity: Severity) -> bool {
    matches!(severity, Severity::High | Severity::Medium)
}

/// Additive enrichment over a finished [`Analysis`].
///
/// Flags gain `original_text` and `enrichment`; titles, severities,
/// clause ids, the flag set, the score and the verdict are left alone.
///
/// ```
/// use layered_risk::ContractAnalyzer;
/// use layered_risk_knowledge::Enricher;
///
/// let mut analysis = ContractAnalyzer::default()
///     .analyze("TERMINATION\nThe Company may terminate this Agreement without notice.")
///     .unwrap();
/// let verdict = analysis.result.verdict();
///
/// let enriched = Enricher::default().enrich(&mut analysis);
/// assert_eq!(enriched, 2);
/// assert_eq!(analysis.result.verdict(), verdict);
/// ```
pub struct Enricher<A = StaticAdvisor> {
    advisor: A,
    precedents: PrecedentSelector,
}

impl<A: Advisor> Enricher<A> {
    pub fn new(advisor: A, seed: u64) -> Self {
        Self {
            advisor,
            precedents: PrecedentSelector::seeded(seed),
        }
    }

    /// Enrich every actionable flag, returning how many were touched.
    pub fn enrich(&mut self, analysis: &mut Analysis) -> usize {
        let Analysis { clauses, result } = analysis;

        for mut flag in result.annotations() {
            let text = flag
                .clause_id
                .as_deref()
                .and_then(|id| clauses.iter().find(|clause| clause.id == id))
                .map(|clause| clause.text.clone());
            flag.set_original_text(text);
        }

        let mut seen = BTreeSet::new();
        let requests: Vec<AdvisoryRequest> = result
            .flags()
            .filter(|flag| is_actionable(flag.severity))
            .filter_map(|flag| {
                let text = flag.original_text.as_deref()?;
                seen.insert(flag.title.as_str())
                    .then(|| AdvisoryRequest::new(flag.title.clone(), text))
            })
            .collect();

        let advisories = self.request_advisories(&requests);

        let mut enriched = 0;
        for mut flag in result.annotations().filter(|flag| is_actionable(flag.severity)) {
            let advisory = advisories.get(&flag.title);
            let enrichment = FlagEnrichment {
                advisory: advisory.map(|scored| scored.value.clone()),
                confidence: advisory.map(|scored| scored.label()),
                precedents: self.precedents.select(&flag.title),
            };
            flag.set_enrichment(enrichment);
            enriched += 1;
        }

        debug!(
            requests = requests.len(),
            advisories = advisories.len(),
            enriched,
            "enriched flags"
        );
        enriched
    }

    fn request_advisories(&self, requests: &[AdvisoryRequest]) -> Advisories {
        if requests.is_empty() {
            return Advisories::new();
        }
        match self.advisor.advise(requests) {
            Ok(advisories) => advisories,
            Err(error) => {
                warn!(%error, "advisor failed, continuing with citations only");
                Advisories::new()
            }
        }
    }
}

impl Default for Enricher<StaticAdvisor> {
    fn default() -> Self {
        Self::new(StaticAdvisor, 0)
    }
}
