//! The clause taxonomy: category names mapped to trigger keywords.
//!
//! A [`Taxonomy`] is plain data. It is built once (either the built-in
//! [`Taxonomy::standard`] table or a RON file) and then passed by reference to
//! the segmenter. Category order is significant: classification returns the
//! first category, in declaration order, with a matching keyword.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RiskError, RiskResult};

/// Category assigned to clauses that match no taxonomy keyword.
pub const UNCLASSIFIED: &str = "Unclassified";

/// One taxonomy entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseCategory {
    /// Display name, e.g. "Termination".
    pub name: String,
    /// Lower-case trigger keywords and phrases.
    pub keywords: Vec<String>,
}

impl ClauseCategory {
    pub fn new(name: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            name: name.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Returns true if any keyword occurs in `lowered` (already lower-cased).
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|kw| lowered.contains(kw.as_str()))
    }
}

/// Immutable, ordered keyword taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaxonomyFile")]
pub struct Taxonomy {
    categories: Vec<ClauseCategory>,
}

/// On-disk shape of a taxonomy, validated into a [`Taxonomy`].
#[derive(Debug, Deserialize)]
struct TaxonomyFile {
    categories: Vec<ClauseCategory>,
}

impl TryFrom<TaxonomyFile> for Taxonomy {
    type Error = RiskError;

    fn try_from(file: TaxonomyFile) -> Result<Self, Self::Error> {
        Taxonomy::new(file.categories)
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::standard()
    }
}

impl Taxonomy {
    /// Build a taxonomy from ordered categories.
    ///
    /// Keywords are lower-cased so they can be matched against lower-cased
    /// clause text. Rejects empty or duplicate names, the reserved
    /// [`UNCLASSIFIED`] name, and blank keywords.
    pub fn new(categories: Vec<ClauseCategory>) -> RiskResult<Self> {
        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(categories.len());

        for category in categories {
            let name = category.name.trim().to_string();
            if name.is_empty() {
                return Err(RiskError::Taxonomy {
                    message: "category name cannot be empty".to_string(),
                });
            }
            if name.eq_ignore_ascii_case(UNCLASSIFIED) {
                return Err(RiskError::Taxonomy {
                    message: format!("'{}' is reserved", UNCLASSIFIED),
                });
            }
            if !seen.insert(name.clone()) {
                return Err(RiskError::Taxonomy {
                    message: format!("duplicate category '{}'", name),
                });
            }

            let mut keywords = Vec::with_capacity(category.keywords.len());
            for keyword in category.keywords {
                let keyword = keyword.trim().to_lowercase();
                if keyword.is_empty() {
                    return Err(RiskError::Taxonomy {
                        message: format!("category '{}' has a blank keyword", name),
                    });
                }
                keywords.push(keyword);
            }

            normalized.push(ClauseCategory { name, keywords });
        }

        Ok(Self {
            categories: normalized,
        })
    }

    /// The built-in contract vocabulary.
    pub fn standard() -> Self {
        let categories = vec![
            ClauseCategory::new(
                "Termination",
                &[
                    "terminate",
                    "termination",
                    "notice period",
                    "termination for convenience",
                    "termination for cause",
                ],
            ),
            ClauseCategory::new(
                "Indemnification",
                &["indemnify", "indemnification", "hold harmless", "indemnity", "make good"],
            ),
            ClauseCategory::new(
                "Liability",
                &[
                    "liability",
                    "liable",
                    "damages",
                    "limitation of liability",
                    "consequential damages",
                ],
            ),
            ClauseCategory::new(
                "Non-Compete",
                &[
                    "non-compete",
                    "non compete",
                    "restrict",
                    "non-competition",
                    "restriction on business",
                ],
            ),
            ClauseCategory::new(
                "Confidentiality",
                &[
                    "confidential",
                    "confidentiality",
                    "nda",
                    "non-disclosure",
                    "proprietary information",
                ],
            ),
            ClauseCategory::new(
                "Governing Law",
                &["governed by", "laws of", "jurisdiction", "courts of", "venue"],
            ),
            ClauseCategory::new(
                "Arbitration",
                &["arbitration", "arbitral tribunal", "arbitrator", "dispute resolution"],
            ),
            ClauseCategory::new(
                "Force Majeure",
                &[
                    "force majeure",
                    "act of god",
                    "unforeseeable circumstances",
                    "beyond reasonable control",
                ],
            ),
            ClauseCategory::new(
                "Intellectual Property",
                &[
                    "intellectual property",
                    "ip rights",
                    "ownership",
                    "copyright",
                    "patent",
                    "trademark",
                ],
            ),
            ClauseCategory::new(
                "Payment Terms",
                &["payment", "invoice", "fees", "compensation", "billing"],
            ),
            ClauseCategory::new(
                "Term",
                &["term of agreement", "effective date", "duration", "initial term", "renewal"],
            ),
        ];

        Self { categories }
    }

    /// Parse a taxonomy from RON:
    ///
    /// ```
    /// use layered_risk::Taxonomy;
    ///
    /// let taxonomy = Taxonomy::from_ron_str(
    ///     r#"(categories: [(name: "Payment Terms", keywords: ["Invoice"])])"#,
    /// ).unwrap();
    /// assert_eq!(taxonomy.classify("send the invoice"), Some("Payment Terms"));
    /// ```
    pub fn from_ron_str(input: &str) -> RiskResult<Self> {
        let file: TaxonomyFile = ron::from_str(input).map_err(|e| RiskError::Taxonomy {
            message: e.to_string(),
        })?;
        Self::try_from(file)
    }

    /// Load a RON taxonomy file.
    pub fn load(path: &Path) -> RiskResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| RiskError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&content)
    }

    pub fn categories(&self) -> &[ClauseCategory] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// First category (in declaration order) with a keyword contained in
    /// `lowered`. The caller lower-cases the text.
    pub fn classify(&self, lowered: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|category| category.matches(lowered))
            .map(|category| category.name.as_str())
    }
}
