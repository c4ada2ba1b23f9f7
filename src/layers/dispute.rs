//! Layer 6: forum and cost fairness.

use crate::clause::Clause;
use crate::flag::{LayerId, LayerResult, RiskKind};
use crate::utils::{contains_any, contains_word};

use super::{Findings, RiskLayer};

/// Foreign arbitration hubs, as `(lower-case pattern, display name)`.
const FOREIGN_SEATS: [(&str, &str); 6] = [
    ("singapore", "Singapore"),
    ("london", "London"),
    ("new york", "New York"),
    ("usa", "USA"),
    ("dubai", "Dubai"),
    ("paris", "Paris"),
];

/// Detects foreign seats, company-appointed arbitrators and one-way cost burdens.
pub struct DisputeResolutionLayer {
    gate: Vec<&'static str>,
    seats: Vec<(&'static str, &'static str)>,
    company_appointment: Vec<&'static str>,
    all_costs: Vec<&'static str>,
    individual: Vec<&'static str>,
    mutual_appointment: Vec<&'static str>,
}

impl Default for DisputeResolutionLayer {
    fn default() -> Self {
        Self {
            gate: vec!["arbitration", "dispute", "jurisdiction"],
            seats: FOREIGN_SEATS.to_vec(),
            company_appointment: vec!["appointed by the company", "selected by the company"],
            all_costs: vec!["bear all costs", "pay all costs"],
            individual: vec!["employee", "service provider"],
            mutual_appointment: vec!["mutually appointed", "mutually agreed"],
        }
    }
}

impl DisputeResolutionLayer {
    /// Display name of the first foreign seat named in `text`, matched on word boundaries.
    fn foreign_seat(&self, text: &str) -> Option<&'static str> {
        self.seats
            .iter()
            .find(|(pattern, _)| contains_word(text, pattern))
            .map(|(_, name)| *name)
    }
}

impl RiskLayer for DisputeResolutionLayer {
    fn id(&self) -> LayerId {
        LayerId::DisputeResolution
    }

    fn run(&self, clauses: &[Clause]) -> LayerResult {
        let mut findings = Findings::new(self.id());

        for clause in clauses {
            let text = clause.text.to_lowercase();
            if !contains_any(&text, &self.gate) {
                continue;
            }

            if let Some(seat) = self.foreign_seat(&text) {
                findings.flag_with(
                    RiskKind::ForeignArbitrationSeat,
                    Some(clause.id.as_str()),
                    format!(
                        "Arbitration/Jurisdiction is in {}. Expensive for the individual.",
                        seat
                    ),
                );
            }

            if text.contains("sole arbitrator") && contains_any(&text, &self.company_appointment) {
                findings.flag(RiskKind::BiasedArbitratorAppointment, clause);
            }

            if contains_any(&text, &self.all_costs) && contains_any(&text, &self.individual) {
                findings.flag(RiskKind::UnfairCostBurden, clause);
            }

            if text.contains("arbitrator") && contains_any(&text, &self.mutual_appointment) {
                findings.positive("Mutual arbitrator appointment");
            }
        }

        findings.finish()
    }
}
