//! Court decisions grouped by topic, with seeded random selection.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use layered_risk::PrecedentCitation;

/// Upper bound on citations attached to one flag.
pub const MAX_CITATIONS: usize = 3;

/// A precedent in the static library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Precedent {
    pub case_name: &'static str,
    pub court: &'static str,
    pub year: &'static str,
    pub principle: &'static str,
}

impl Precedent {
    const fn new(
        case_name: &'static str,
        court: &'static str,
        year: &'static str,
        principle: &'static str,
    ) -> Self {
        Self {
            case_name,
            court,
            year,
            principle,
        }
    }

    pub fn citation(&self) -> PrecedentCitation {
        PrecedentCitation {
            case_name: self.case_name.to_string(),
            court: self.court.to_string(),
            principle: self.principle.to_string(),
            year: self.year.to_string(),
        }
    }
}

const TERMINATION: &[Precedent] = &[
    Precedent::new(
        "Delhi Transport Corp v. D.T.C. Mazdoor Congress",
        "SC",
        "1991",
        "Termination without reason is arbitrary.",
    ),
    Precedent::new(
        "Central Inland Water v. Brojo Nath",
        "SC",
        "1986",
        "Unconscionable terms in standard contracts are void.",
    ),
    Precedent::new(
        "West Bengal State Electricity v. Desh Bandhu",
        "SC",
        "1985",
        "Notice period must be reasonable.",
    ),
];

const NON_COMPETE: &[Precedent] = &[
    Precedent::new(
        "Percept D'Mark v. Zaheer Khan",
        "SC",
        "2006",
        "Post-term non-compete is void (Sec 27).",
    ),
    Precedent::new(
        "Niranjan Shankar Golikari v. Century Spinning",
        "SC",
        "1967",
        "Non-compete valid solely during employment term.",
    ),
    Precedent::new(
        "Superintendence Co. v. Krishan Murgai",
        "SC",
        "1980",
        "Restraint of trade doctrine applies even after termination.",
    ),
];

const ARBITRATION: &[Precedent] = &[
    Precedent::new(
        "Perkins Eastman v. HSCC",
        "SC",
        "2019",
        "Unilateral appointment of sole arbitrator is invalid.",
    ),
    Precedent::new(
        "TRF Ltd. v. Energo Engineering",
        "SC",
        "2017",
        "Ineligible person cannot nominate arbitrator.",
    ),
    Precedent::new(
        "Bharat Broadband v. United Telecoms",
        "SC",
        "2019",
        "Parties cannot waive Sec 12(5) invalidity by agreement.",
    ),
];

const LIABILITY: &[Precedent] = &[
    Precedent::new(
        "Bharathi Knitting v. DHL",
        "SC",
        "1996",
        "Liability caps in signed contracts are generally binding unless unconscionable.",
    ),
    Precedent::new(
        "ONGC v. Saw Pipes",
        "SC",
        "2003",
        "Liquidated damages must be reasonable pre-estimate of loss.",
    ),
];

const INTELLECTUAL_PROPERTY: &[Precedent] = &[
    Precedent::new(
        "V.T. Thomas v. Malayala Manorama",
        "Kerala HC",
        "1989",
        "Employees own copyright in work done outside course of employment.",
    ),
    Precedent::new(
        "Burlington Home Shopping v. Rajnish",
        "Delhi HC",
        "1995",
        "Customer lists can be trade secrets.",
    ),
];

/// Precedent pool a flag title draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrecedentTopic {
    Termination,
    NonCompete,
    Arbitration,
    Liability,
    IntellectualProperty,
}

/// Ordered title rules; the first rule with a matching fragment wins.
const TOPIC_RULES: &[(PrecedentTopic, &[&str])] = &[
    (PrecedentTopic::NonCompete, &["compete", "bond", "garden"]),
    (PrecedentTopic::Arbitration, &["arbitrat", "dispute", "law"]),
    (PrecedentTopic::Liability, &["liab", "indemni", "damages"]),
    (
        PrecedentTopic::IntellectualProperty,
        &["intellectual", "ip assignment", "confident", "project"],
    ),
];

impl PrecedentTopic {
    /// Pick the topic for a flag title. Unmatched titles fall back to termination.
    pub fn for_title(title: &str) -> Self {
        let title = title.to_lowercase();
        TOPIC_RULES
            .iter()
            .find(|(_, fragments)| fragments.iter().any(|f| title.contains(f)))
            .map(|(topic, _)| *topic)
            .unwrap_or(PrecedentTopic::Termination)
    }

    pub fn pool(self) -> &'static [Precedent] {
        match self {
            PrecedentTopic::Termination => TERMINATION,
            PrecedentTopic::NonCompete => NON_COMPETE,
            PrecedentTopic::Arbitration => ARBITRATION,
            PrecedentTopic::Liability => LIABILITY,
            PrecedentTopic::IntellectualProperty => INTELLECTUAL_PROPERTY,
        }
    }
}

/// Draws citations from the topic pools using an owned, seedable RNG.
pub struct PrecedentSelector {
    rng: StdRng,
}

impl PrecedentSelector {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Between one and [`MAX_CITATIONS`] distinct precedents for `title`.
    pub fn select(&mut self, title: &str) -> Vec<PrecedentCitation> {
        let pool = PrecedentTopic::for_title(title).pool();
        let count = self.rng.gen_range(1..=MAX_CITATIONS.min(pool.len()));
        pool.choose_multiple(&mut self.rng, count)
            .map(Precedent::citation)
            .collect()
    }
}

impl Default for PrecedentSelector {
    fn default() -> Self {
        Self::seeded(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_map_to_topics_in_rule_order() {
        let cases = [
            ("Post-Employment Non-Compete", PrecedentTopic::NonCompete),
            ("Employment Bond / Exit Penalty", PrecedentTopic::NonCompete),
            ("Foreign Arbitration Seat", PrecedentTopic::Arbitration),
            ("Unlimited Liability", PrecedentTopic::Liability),
            ("One-Sided Indemnity", PrecedentTopic::Liability),
            ("Consequential Damages", PrecedentTopic::Liability),
            ("Overreaching IP Assignment", PrecedentTopic::IntellectualProperty),
            ("Claim on Personal Projects", PrecedentTopic::IntellectualProperty),
            ("Perpetual Confidentiality", PrecedentTopic::IntellectualProperty),
            ("Short Notice Period", PrecedentTopic::Termination),
            ("Unilateral Amendment", PrecedentTopic::Termination),
        ];
        for (title, topic) in cases {
            assert_eq!(PrecedentTopic::for_title(title), topic, "{}", title);
        }
    }

    #[test]
    fn selection_is_bounded_and_unique() {
        let mut selector = PrecedentSelector::seeded(7);
        for _ in 0..50 {
            let citations = selector.select("Unlimited Liability");
            assert!((1..=2).contains(&citations.len()));
            if citations.len() == 2 {
                assert_ne!(citations[0], citations[1]);
            }

            let citations = selector.select("Immediate Termination");
            assert!((1..=MAX_CITATIONS).contains(&citations.len()));
            let pool: Vec<_> = TERMINATION.iter().map(Precedent::citation).collect();
            assert!(citations.iter().all(|c| pool.contains(c)));
        }
    }

    #[test]
    fn same_seed_gives_same_citations() {
        let mut first = PrecedentSelector::seeded(42);
        let mut second = PrecedentSelector::seeded(42);
        for title in ["Immediate Termination", "Post-Employment Non-Compete", "Waiver of Rights"] {
            assert_eq!(first.select(title), second.select(title));
        }
    }
}
