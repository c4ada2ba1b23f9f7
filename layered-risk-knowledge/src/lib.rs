#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-risk/issues/"
)]

//! Legal knowledge layered on top of `layered-risk` results.
//!
//! Nothing here feeds back into scoring. The [`Enricher`] only adds
//! provenance, advisories and precedent citations to flags the engine
//! already produced.
//!
//! ## Modules
//!
//! - [`precedents`] - Topic pools of court decisions and seeded selection
//! - [`redlines`] - Safer replacement wording keyed by flag title
//! - [`advisor`] - The [`Advisor`] seam and the offline [`StaticAdvisor`]
//! - [`scored`] - [`Scored<T>`] confidence wrapper for advisories

pub mod advisor;
mod enrich;
pub mod precedents;
pub mod redlines;
pub mod scored;

pub use advisor::{
    Advisories, Advisor, AdvisorError, AdvisoryRequest, StaticAdvisor, MAX_EXCERPT_CHARS,
    STATIC_ADVISORY,
};
pub use enrich::Enricher;
pub use precedents::{Precedent, PrecedentSelector, PrecedentTopic, MAX_CITATIONS};
pub use redlines::{redline_or_fallback, suggest_redline, FALLBACK_REDLINE};
pub use scored::{ScoreSource, Scored};
