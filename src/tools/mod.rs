//! External toolchain integration
//!
//! The pipeline never talks to OrthoMCL, BLAST, MCL or the staging store
//! directly: each stage is described as a [`ToolCommand`] and executed by a
//! [`CommandRunner`], which lets tests substitute a scripted runner.

pub mod blast;
pub mod mcl;
pub mod orthomcl;
pub mod runner;
pub mod staging;
pub mod traits;

pub use runner::SystemRunner;
pub use traits::{CapturedOutput, CommandRunner, ToolCommand};
