use std::path::Path;
use thiserror::Error;
use crate::core::{CorpusError, MatchingEngine};
use crate::models::ProgramRecord;

/// Errors raised while loading the program catalog
///
/// All of them are fatal at startup: matching against a partial or
/// malformed catalog would distort every score.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid catalog: {0}")]
    Corpus(#[from] CorpusError),
}

/// Parse a JSON array of program records
pub fn parse_catalog(json: &str) -> Result<Vec<ProgramRecord>, CatalogError> {
    Ok(serde_json::from_str(json)?)
}

/// Read a pre-cleaned catalog file
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<ProgramRecord>, CatalogError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let programs = parse_catalog(&json)?;
    tracing::info!("Loaded {} programs from {}", programs.len(), path.display());
    Ok(programs)
}

/// Read the catalog and build the shared matching engine over it
pub fn load_engine<P: AsRef<Path>>(path: P, max_features: usize) -> Result<MatchingEngine, CatalogError> {
    let programs = load_catalog(path)?;
    Ok(MatchingEngine::build(programs, max_features)?)
}
