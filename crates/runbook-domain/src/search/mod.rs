//! Hybrid Search Scoring
//!
//! Pure, side-effect-free scoring logic shared by every caller that needs
//! to rank documents: the application layer's search use case, and tests
//! that exercise the scoring contract directly. Dense-vector similarity is
//! computed by the embedding store; this module tokenizes/classifies
//! queries and combines the resulting signals.

mod query;
mod scorer;

pub use query::{lexical_overlap, process_query, process_query_validated};
pub use scorer::{metadata_score, score_result, BoostFacts, MetadataInputs, ScoreInputs};
