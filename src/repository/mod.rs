//! Object repository access
//!
//! Genome sets and genomes are fetched by reference; the finished pangenome
//! is saved with provenance. [`WorkspaceClient`] talks to a remote workspace
//! service, [`LocalRepository`] keeps objects as JSON files on disk.

pub mod client;
pub mod local;
pub mod traits;

pub use client::WorkspaceClient;
pub use local::LocalRepository;
pub use traits::{fetch_as, ObjectInfo, ObjectRepository, ObjectSpec};
