//! Findings produced by the risk layers.
//!
//! Every [`Flag`] belongs to exactly one layer and optionally one clause. Flag
//! titles come from a fixed vocabulary, [`RiskKind`], so the aggregator and
//! downstream collaborators can key on them reliably.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordinal risk level, `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Low
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        };
        f.write_str(label)
    }
}

/// The seven risk layers, numbered 1 through 7. Serialized as the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum LayerId {
    /// Length and power asymmetry.
    Structural = 1,
    /// Instability of exit terms.
    Termination = 2,
    /// Exposure shifting through liability and indemnity.
    Liability = 3,
    /// Restrictive covenants on the individual.
    EmploymentRestraint = 4,
    /// IP overreach and open-ended confidentiality.
    IntellectualProperty = 5,
    /// Forum and cost fairness.
    DisputeResolution = 6,
    /// Unilateral control and transparency.
    Fairness = 7,
}

impl LayerId {
    /// All layers in execution order.
    pub const ALL: [LayerId; 7] = [
        LayerId::Structural,
        LayerId::Termination,
        LayerId::Liability,
        LayerId::EmploymentRestraint,
        LayerId::IntellectualProperty,
        LayerId::DisputeResolution,
        LayerId::Fairness,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|layer| layer.number() == number)
    }

    /// Short theme name.
    pub fn theme(self) -> &'static str {
        match self {
            LayerId::Structural => "Structural",
            LayerId::Termination => "Termination",
            LayerId::Liability => "Liability & Indemnification",
            LayerId::EmploymentRestraint => "Employment Restraint",
            LayerId::IntellectualProperty => "IP & Confidentiality",
            LayerId::DisputeResolution => "Dispute Resolution",
            LayerId::Fairness => "Fairness & Transparency",
        }
    }
}

impl From<LayerId> for u8 {
    fn from(layer: LayerId) -> u8 {
        layer.number()
    }
}

impl TryFrom<u8> for LayerId {
    type Error = String;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        LayerId::from_number(number).ok_or_else(|| format!("layer must be 1-7, got {}", number))
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.number())
    }
}

/// The fixed finding vocabulary, grouped by layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskKind {
    // Layer 1
    ExcessivelyLongClause,
    AbsoluteLanguage,
    ObligationAsymmetry,
    // Layer 2
    ImmediateTermination,
    UnilateralTermination,
    ShortNoticePeriod,
    TerminationForConvenience,
    // Layer 3
    UnlimitedLiability,
    ConsequentialDamages,
    OneSidedIndemnity,
    // Layer 4
    PostEmploymentNonCompete,
    EmploymentBond,
    PostTerminationExclusivity,
    // Layer 5
    OverreachingIpAssignment,
    PersonalProjectClaim,
    PerpetualConfidentiality,
    MissingPublicDomainException,
    // Layer 6
    ForeignArbitrationSeat,
    BiasedArbitratorAppointment,
    UnfairCostBurden,
    // Layer 7
    UnilateralAmendment,
    WaiverOfRights,
    OneSidedForceMajeure,
}

impl RiskKind {
    pub fn title(self) -> &'static str {
        match self {
            RiskKind::ExcessivelyLongClause => "Excessively Long Clause",
            RiskKind::AbsoluteLanguage => "Absolute/Unilateral Language",
            RiskKind::ObligationAsymmetry => "Obligation Asymmetry",
            RiskKind::ImmediateTermination => "Immediate Termination",
            RiskKind::UnilateralTermination => "Unilateral Termination",
            RiskKind::ShortNoticePeriod => "Short Notice Period",
            RiskKind::TerminationForConvenience => "Termination for Convenience",
            RiskKind::UnlimitedLiability => "Unlimited Liability",
            RiskKind::ConsequentialDamages => "Consequential Damages",
            RiskKind::OneSidedIndemnity => "One-Sided Indemnity",
            RiskKind::PostEmploymentNonCompete => "Post-Employment Non-Compete",
            RiskKind::EmploymentBond => "Employment Bond / Exit Penalty",
            RiskKind::PostTerminationExclusivity => "Post-Termination Exclusivity",
            RiskKind::OverreachingIpAssignment => "Overreaching IP Assignment",
            RiskKind::PersonalProjectClaim => "Claim on Personal Projects",
            RiskKind::PerpetualConfidentiality => "Perpetual Confidentiality",
            RiskKind::MissingPublicDomainException => "Missing Public Domain Exception",
            RiskKind::ForeignArbitrationSeat => "Foreign Arbitration Seat",
            RiskKind::BiasedArbitratorAppointment => "Biased Arbitrator Appointment",
            RiskKind::UnfairCostBurden => "Unfair Cost Burden",
            RiskKind::UnilateralAmendment => "Unilateral Amendment",
            RiskKind::WaiverOfRights => "Waiver of Rights",
            RiskKind::OneSidedForceMajeure => "One-Sided Force Majeure",
        }
    }

    pub fn layer(self) -> LayerId {
        use RiskKind::*;
        match self {
            ExcessivelyLongClause | AbsoluteLanguage | ObligationAsymmetry => LayerId::Structural,
            ImmediateTermination
            | UnilateralTermination
            | ShortNoticePeriod
            | TerminationForConvenience => LayerId::Termination,
            UnlimitedLiability | ConsequentialDamages | OneSidedIndemnity => LayerId::Liability,
            PostEmploymentNonCompete | EmploymentBond | PostTerminationExclusivity => {
                LayerId::EmploymentRestraint
            }
            OverreachingIpAssignment
            | PersonalProjectClaim
            | PerpetualConfidentiality
            | MissingPublicDomainException => LayerId::IntellectualProperty,
            ForeignArbitrationSeat | BiasedArbitratorAppointment | UnfairCostBurden => {
                LayerId::DisputeResolution
            }
            UnilateralAmendment | WaiverOfRights | OneSidedForceMajeure => LayerId::Fairness,
        }
    }

    pub fn severity(self) -> Severity {
        use RiskKind::*;
        match self {
            ExcessivelyLongClause
            | AbsoluteLanguage
            | ObligationAsymmetry
            | ShortNoticePeriod
            | TerminationForConvenience
            | PerpetualConfidentiality
            | MissingPublicDomainException
            | ForeignArbitrationSeat
            | UnfairCostBurden
            | OneSidedForceMajeure => Severity::Medium,
            ImmediateTermination
            | UnilateralTermination
            | UnlimitedLiability
            | ConsequentialDamages
            | OneSidedIndemnity
            | PostEmploymentNonCompete
            | EmploymentBond
            | PostTerminationExclusivity
            | OverreachingIpAssignment
            | PersonalProjectClaim
            | BiasedArbitratorAppointment
            | UnilateralAmendment
            | WaiverOfRights => Severity::High,
        }
    }

    /// Fixed rationale used when the finding carries no computed numbers.
    pub fn description(self) -> &'static str {
        match self {
            RiskKind::ExcessivelyLongClause => {
                "Clause is long enough to reduce readability and hide risks."
            }
            RiskKind::AbsoluteLanguage => {
                "Use of terms like 'solely' or 'sole discretion' indicates lack of negotiation power."
            }
            RiskKind::ObligationAsymmetry => {
                "Employee carries significantly more obligations than the Company."
            }
            RiskKind::ImmediateTermination => {
                "Right to terminate without notice creates instability."
            }
            RiskKind::UnilateralTermination => {
                "Only the company has the right to terminate, which is unfair."
            }
            RiskKind::ShortNoticePeriod => "Notice period is dangerously short.",
            RiskKind::TerminationForConvenience => {
                "Company can end the engagement for no reason at any time."
            }
            RiskKind::UnlimitedLiability => {
                "Unlimited liability exposes the individual to unbounded financial risk."
            }
            RiskKind::ConsequentialDamages => {
                "Consequential damages can vastly exceed contract value and are high risk."
            }
            RiskKind::OneSidedIndemnity => {
                "One-sided indemnity unfairly shifts legal risk to the individual."
            }
            RiskKind::PostEmploymentNonCompete => {
                "Post-employment non-compete clauses are generally void as a restraint of trade."
            }
            RiskKind::EmploymentBond => {
                "Employment bonds and exit penalties may be coercive and unenforceable."
            }
            RiskKind::PostTerminationExclusivity => {
                "Restrictions on professional activity after termination may be invalid."
            }
            RiskKind::OverreachingIpAssignment => {
                "Clause claims ownership of inventions created before or after employment."
            }
            RiskKind::PersonalProjectClaim => {
                "Company claims ownership of work done on your own time or equipment."
            }
            RiskKind::PerpetualConfidentiality => {
                "Confidentiality obligation has no end date. Standard is 2-5 years."
            }
            RiskKind::MissingPublicDomainException => {
                "Confidentiality does not exclude information already in the public domain."
            }
            RiskKind::ForeignArbitrationSeat => {
                "Arbitration or jurisdiction seat is abroad, which is expensive for the individual."
            }
            RiskKind::BiasedArbitratorAppointment => {
                "Company has sole right to appoint the arbitrator."
            }
            RiskKind::UnfairCostBurden => {
                "Clause requires you to pay all legal or arbitration costs."
            }
            RiskKind::UnilateralAmendment => {
                "Company can change the contract terms at any time without your consent."
            }
            RiskKind::WaiverOfRights => {
                "Clause attempts to waive your fundamental legal or statutory rights."
            }
            RiskKind::OneSidedForceMajeure => {
                "Force majeure only protects the company from non-performance."
            }
        }
    }

    /// Build a flag with the fixed description.
    pub fn flag(self, clause_id: Option<&str>) -> Flag {
        self.flag_with(clause_id, self.description())
    }

    /// Build a flag with a computed description.
    pub fn flag_with(self, clause_id: Option<&str>, description: impl Into<String>) -> Flag {
        Flag {
            layer: self.layer(),
            clause_id: clause_id.map(str::to_string),
            title: self.title().to_string(),
            description: description.into(),
            severity: self.severity(),
            original_text: None,
            enrichment: None,
        }
    }
}

/// Markers that identify a restraint-of-trade title.
const RESTRAINT_OF_TRADE_MARKERS: [&str; 2] = ["Non-Compete", "Employment Bond"];

/// A single detected risk finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flag {
    pub layer: LayerId,
    /// `None` for document-wide findings.
    pub clause_id: Option<String>,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    /// Source clause text, linked by the enrichment collaborator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
    /// Additive enrichment written back by collaborators.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrichment: Option<FlagEnrichment>,
}

impl Flag {
    /// `clause_id`, or `"global"` for document-wide findings.
    pub fn scope(&self) -> &str {
        self.clause_id.as_deref().unwrap_or("global")
    }

    /// Identity used for cross-layer deduplication.
    pub fn key(&self) -> FlagKey {
        FlagKey {
            layer: self.layer,
            title: self.title.clone(),
            scope: self.scope().to_string(),
        }
    }

    /// True for High-severity non-compete or employment-bond findings.
    pub fn is_restraint_of_trade(&self) -> bool {
        self.severity == Severity::High
            && RESTRAINT_OF_TRADE_MARKERS
                .iter()
                .any(|marker| self.title.contains(marker))
    }
}

/// `(layer, title, clause id or "global")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlagKey {
    pub layer: LayerId,
    pub title: String,
    pub scope: String,
}

/// Confidence attached to an advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLabel {
    Low,
    Medium,
    High,
}

/// A court decision cited alongside a flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrecedentCitation {
    pub case_name: String,
    pub court: String,
    pub principle: String,
    pub year: String,
}

/// Optional fields written onto existing flags by enrichment collaborators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlagEnrichment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advisory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<ConfidenceLabel>,
    #[serde(default)]
    pub precedents: Vec<PrecedentCitation>,
}

/// Write access to the collaborator-owned fields of a flag.
///
/// Derefs to the flag for reading; layer, title, severity and clause id
/// cannot be changed through it.
pub struct FlagAnnotation<'f> {
    flag: &'f mut Flag,
}

impl<'f> FlagAnnotation<'f> {
    pub(crate) fn new(flag: &'f mut Flag) -> Self {
        Self { flag }
    }

    pub fn set_original_text(&mut self, text: Option<String>) {
        self.flag.original_text = text;
    }

    pub fn set_enrichment(&mut self, enrichment: FlagEnrichment) {
        self.flag.enrichment = Some(enrichment);
    }
}

impl std::ops::Deref for FlagAnnotation<'_> {
    type Target = Flag;

    fn deref(&self) -> &Flag {
        self.flag
    }
}

/// Output of one layer for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerResult {
    pub layer: LayerId,
    /// Flags in detection order.
    pub flags: Vec<Flag>,
    /// Maximum flag severity, or `Low` when there are no flags.
    pub severity: Severity,
    /// Protective language recognised by the layer.
    #[serde(default)]
    pub positive_findings: Vec<String>,
}

impl LayerResult {
    pub fn new(layer: LayerId, flags: Vec<Flag>, positive_findings: Vec<String>) -> Self {
        let severity = max_severity(&flags);
        Self {
            layer,
            flags,
            severity,
            positive_findings,
        }
    }

    pub fn empty(layer: LayerId) -> Self {
        Self::new(layer, Vec::new(), Vec::new())
    }

    /// Replace the flag list, recomputing severity.
    pub fn with_flags(self, flags: Vec<Flag>) -> Self {
        Self::new(self.layer, flags, self.positive_findings)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.flags.iter().filter(|f| f.severity == severity).count()
    }

    pub fn has_flag(&self, title: &str) -> bool {
        self.flags.iter().any(|f| f.title == title)
    }
}

fn max_severity(flags: &[Flag]) -> Severity {
    flags
        .iter()
        .map(|f| f.severity)
        .max()
        .unwrap_or(Severity::Low)
}
