pub mod bio;
pub mod cli;
pub mod core;
pub mod pipeline;
pub mod repository;
pub mod testing;
pub mod tools;
pub mod types;
pub mod workspace;

pub use crate::pipeline::driver::{BuildOutput, BuildParams, CallContext, PangenomeBuilder};
pub use crate::pipeline::error::{BuildFailure, StageError};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PangenomeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Number of genomes exceeds {limit}, which is too many for all-against-all blastp (got {count})")]
    TooManyGenomes { count: usize, limit: usize },

    #[error("Invalid synthetic index: {0}")]
    InvalidIndex(String),

    #[error("Unknown synthetic id: {0}")]
    UnknownSyntheticId(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error(transparent)]
    Stage(#[from] StageError),

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for PangenomeError {
    fn from(err: serde_json::Error) -> Self {
        PangenomeError::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PangenomeError>;
