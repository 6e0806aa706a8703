//! Test doubles for the external collaborators
//!
//! [`ScriptedRunner`] stands in for the toolchain and [`MemoryRepository`]
//! for the object repository, so whole builds can run without perl, BLAST,
//! MCL, a database or a network.

mod repository;
mod runner;

pub use repository::MemoryRepository;
pub use runner::ScriptedRunner;
