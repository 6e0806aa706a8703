pub mod genome;
pub mod pangenome;

pub use genome::{Feature, Genome, GenomeSet, GenomeSetElement};
pub use pangenome::{OrthologGroup, OrthologMember, Pangenome, Provenance};
