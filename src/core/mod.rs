// Core algorithm exports
pub mod matcher;
pub mod relevance;
pub mod requirements;
pub mod scale;
pub mod scoring;

pub use matcher::{average_max_amount, find_matches, CorpusError, MatchingEngine, DEFAULT_TOP_N};
pub use relevance::{cosine_similarity, tokenize, RelevanceIndex, TermVector, DEFAULT_MAX_FEATURES};
pub use requirements::requirement_score;
pub use scale::scale_scores;
pub use scoring::{composite_score, rank, ComponentScores};
