//! Ortholog group construction pipeline

pub mod assembler;
pub mod driver;
pub mod error;
pub mod extractor;
pub mod ids;
pub mod log;
pub mod projector;

pub use driver::{BuildOutput, BuildParams, CallContext, PangenomeBuilder, MAX_GENOMES};
pub use error::{BuildFailure, Stage, StageError};
pub use extractor::{FeatureInfo, FeatureTable};
pub use ids::SyntheticId;
pub use log::{LogEvent, RunLog};
