use crate::pipeline::log::LogEvent;
use crate::PangenomeError;
use std::fmt;
use thiserror::Error;

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    FetchGenomeSet,
    CheckGenomeCount,
    StartStaging,
    InitSchema,
    WriteConfig,
    InstallSchema,
    FetchGenome { genome_index: usize },
    ExtractProteins { genome_index: usize },
    AdjustFasta { genome_index: usize },
    FilterFasta,
    FormatDb,
    Blastp,
    ParseBlast,
    LoadBlast,
    Pairs,
    DumpPairs,
    Mcl,
    MclToGroups,
    ParseGroups,
    SavePangenome,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::FetchGenomeSet => write!(f, "fetch genome set"),
            Stage::CheckGenomeCount => write!(f, "check genome count"),
            Stage::StartStaging => write!(f, "start staging service"),
            Stage::InitSchema => write!(f, "initialize staging schema"),
            Stage::WriteConfig => write!(f, "write orthomcl config"),
            Stage::InstallSchema => write!(f, "orthomclInstallSchema"),
            Stage::FetchGenome { genome_index } => write!(f, "fetch genome {}", genome_index),
            Stage::ExtractProteins { genome_index } => {
                write!(f, "extract proteins of genome {}", genome_index)
            }
            Stage::AdjustFasta { genome_index } => {
                write!(f, "orthomclAdjustFasta for genome {}", genome_index)
            }
            Stage::FilterFasta => write!(f, "orthomclFilterFasta"),
            Stage::FormatDb => write!(f, "formatdb"),
            Stage::Blastp => write!(f, "blastp"),
            Stage::ParseBlast => write!(f, "orthomclBlastParser"),
            Stage::LoadBlast => write!(f, "orthomclLoadBlast"),
            Stage::Pairs => write!(f, "orthomclPairs"),
            Stage::DumpPairs => write!(f, "orthomclDumpPairsFiles"),
            Stage::Mcl => write!(f, "mcl"),
            Stage::MclToGroups => write!(f, "orthomclMclToGroups"),
            Stage::ParseGroups => write!(f, "parse groups"),
            Stage::SavePangenome => write!(f, "save pangenome"),
        }
    }
}

/// An external process that exited unsuccessfully
#[derive(Error, Debug, Clone)]
#[error("Stage '{stage}' failed: {program} exited with {}", exit_description(.exit_code))]
pub struct StageError {
    pub stage: Stage,
    pub program: String,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// The single error a build returns.
///
/// Displays as the full run transcript, failure trace included. The failed
/// stage, the underlying error and the structured events are kept alongside
/// for callers that want more than text.
#[derive(Debug)]
pub struct BuildFailure {
    pub stage: Option<Stage>,
    pub cause: PangenomeError,
    pub log: String,
    pub events: Vec<LogEvent>,
}

impl BuildFailure {
    pub fn log(&self) -> &str {
        &self.log
    }

    pub fn stage_error(&self) -> Option<&StageError> {
        match &self.cause {
            PangenomeError::Stage(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for BuildFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.log)
    }
}

impl std::error::Error for BuildFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}

/// Render an error and its sources, one per line
pub fn failure_trace(stage: Option<Stage>, err: &PangenomeError) -> String {
    let mut trace = match stage {
        Some(stage) => format!("Failed at stage '{}': {}", stage, err),
        None => format!("Failed: {}", err),
    };
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        trace.push_str(&format!("\nCaused by: {}", cause));
        source = cause.source();
    }
    trace
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_error_message() {
        let err = StageError {
            stage: Stage::Mcl,
            program: "mcl".to_string(),
            exit_code: Some(2),
            stdout: String::new(),
            stderr: "bad input".to_string(),
        };
        assert_eq!(err.to_string(), "Stage 'mcl' failed: mcl exited with status 2");
    }

    #[test]
    fn test_build_failure_displays_log() {
        let failure = BuildFailure {
            stage: Some(Stage::FormatDb),
            cause: PangenomeError::Other("x".to_string()),
            log: "Running formatdb\nFailed\n".to_string(),
            events: Vec::new(),
        };
        assert_eq!(failure.to_string(), "Running formatdb\nFailed\n");
        assert!(failure.stage_error().is_none());
    }

    #[test]
    fn test_failure_trace_names_stage() {
        let err = PangenomeError::Parse("bad line".to_string());
        let trace = failure_trace(Some(Stage::ParseGroups), &err);
        assert_eq!(trace, "Failed at stage 'parse groups': Parse error: bad line");
    }
}
