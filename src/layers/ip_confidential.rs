//! Layer 5: IP overreach and open-ended confidentiality.
//!
//! IP rules read the whole clause. Confidentiality rules read the clause body
//! only, so a bare "CONFIDENTIALITY" heading is not itself treated as a
//! confidentiality obligation.

use crate::clause::Clause;
use crate::flag::{LayerId, LayerResult, RiskKind};
use crate::utils::contains_any;

use super::{Findings, RiskLayer};

/// Detects overreaching IP assignments and confidentiality without limits.
pub struct IpConfidentialityLayer {
    ip_gate: Vec<&'static str>,
    pre_employment: Vec<&'static str>,
    personal_work: Vec<&'static str>,
    company_claim: Vec<&'static str>,
    confidentiality_gate: Vec<&'static str>,
    /// An explicit duration for the obligation.
    time_bound: Vec<&'static str>,
    perpetual: Vec<&'static str>,
    public_domain: Vec<&'static str>,
    /// Headers that introduce carve-outs.
    exceptions: Vec<&'static str>,
}

impl Default for IpConfidentialityLayer {
    fn default() -> Self {
        Self {
            ip_gate: vec!["intellectual property", "invention", "assignment"],
            pre_employment: vec!["prior to employment", "pre-employment"],
            personal_work: vec!["personal project", "private work", "own time"],
            company_claim: vec!["belong to the company", "property of the company"],
            confidentiality_gate: vec!["confidential", "non-disclosure"],
            time_bound: vec![
                "period of",
                "years from",
                "years after",
                "term of this agreement",
            ],
            perpetual: vec!["perpetual", "indefinite", "forever"],
            public_domain: vec!["public domain", "publicly available"],
            exceptions: vec!["exceptions", "exclusions"],
        }
    }
}

impl IpConfidentialityLayer {
    fn check_ip(&self, text: &str, clause: &Clause, findings: &mut Findings) {
        if !contains_any(text, &self.ip_gate) {
            return;
        }

        let spans_past_and_future = text.contains("past") && text.contains("future");
        if spans_past_and_future || contains_any(text, &self.pre_employment) {
            findings.flag(RiskKind::OverreachingIpAssignment, clause);
        }

        if contains_any(text, &self.personal_work) && contains_any(text, &self.company_claim) {
            findings.flag(RiskKind::PersonalProjectClaim, clause);
        }
    }

    fn check_confidentiality(&self, body: &str, clause: &Clause, findings: &mut Findings) {
        if !contains_any(body, &self.confidentiality_gate) {
            return;
        }

        let time_bound = contains_any(body, &self.time_bound);
        if time_bound {
            findings.positive("Time-bound confidentiality");
        }

        let public_domain = contains_any(body, &self.public_domain);
        if public_domain {
            findings.positive("Public domain carve-out present");
        }

        if contains_any(body, &self.perpetual) && !time_bound {
            // The perpetual finding supersedes a missing carve-out on the same clause.
            findings.flag(RiskKind::PerpetualConfidentiality, clause);
        } else if !public_domain && !contains_any(body, &self.exceptions) {
            findings.flag(RiskKind::MissingPublicDomainException, clause);
        }
    }
}

impl RiskLayer for IpConfidentialityLayer {
    fn id(&self) -> LayerId {
        LayerId::IntellectualProperty
    }

    fn run(&self, clauses: &[Clause]) -> LayerResult {
        let mut findings = Findings::new(self.id());

        for clause in clauses {
            let text = clause.text.to_lowercase();
            self.check_ip(&text, clause, &mut findings);

            let body = clause.body().to_lowercase();
            self.check_confidentiality(&body, clause, &mut findings);
        }

        findings.finish()
    }
}
