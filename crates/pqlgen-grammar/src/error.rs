//! Error type shared by every generation stage.
//!
//! All variants are configuration or input problems: generation has no
//! transient failure modes, so callers abort on the first error.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GenError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenError {
    #[error("weight group `{group}` expects {expected} values, got {actual}")]
    WeightArity {
        group: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("weight group `{group}` has no positive weight among its available options")]
    ZeroWeights { group: &'static str },

    #[error("invalid select preset {0} (expected 0..=3)")]
    InvalidSelectPreset(u8),

    #[error("invalid clause-family preset {0} (expected 0..=16)")]
    InvalidFamilyPreset(u8),

    #[error("invalid setting `{name}`: {message}")]
    InvalidSetting { name: &'static str, message: String },

    #[error("cannot choose {what} from an empty candidate list")]
    EmptyCandidates { what: &'static str },

    #[error("malformed declaration line: {0}")]
    Declaration(String),

    #[error("failed to parse generator config: {0}")]
    ConfigParse(String),
}

/// Failure while streaming queries to a writer. Generation failures are
/// configuration problems; `Io` means the sink itself failed.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("query {index} could not be generated")]
    Generate {
        index: usize,
        #[source]
        source: GenError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
