/// Trait definitions for external tool execution
use crate::Result;
use std::path::{Path, PathBuf};

/// A fully described invocation of an external tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    /// Logical tool name, e.g. `orthomclAdjustFasta`
    pub tool: String,
    /// Executable to launch
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    /// File fed to the child's stdin
    pub stdin: Option<PathBuf>,
    /// File receiving the child's stdout instead of the transcript
    pub stdout: Option<PathBuf>,
}

impl ToolCommand {
    pub fn new(tool: &str, program: &str, cwd: &Path) -> Self {
        Self {
            tool: tool.to_string(),
            program: program.to_string(),
            args: Vec::new(),
            cwd: cwd.to_path_buf(),
            stdin: None,
            stdout: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn path_arg(self, path: &Path) -> Self {
        let arg = path.to_string_lossy().to_string();
        self.arg(arg)
    }

    pub fn stdin_from(mut self, path: &Path) -> Self {
        self.stdin = Some(path.to_path_buf());
        self
    }

    pub fn stdout_to(mut self, path: &Path) -> Self {
        self.stdout = Some(path.to_path_buf());
        self
    }

    /// Human-readable command line for logs
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            if arg.contains(char::is_whitespace) {
                line.push_str(&format!("\"{}\"", arg));
            } else {
                line.push_str(arg);
            }
        }
        if let Some(stdin) = &self.stdin {
            line.push_str(&format!(" < {}", stdin.display()));
        }
        if let Some(stdout) = &self.stdout {
            line.push_str(&format!(" > {}", stdout.display()));
        }
        line
    }
}

/// What a finished child process left behind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    pub success: bool,
    pub exit_code: Option<i32>,
    /// Empty when stdout was redirected to a file
    pub stdout: String,
    pub stderr: String,
}

impl CapturedOutput {
    pub fn ok() -> Self {
        Self {
            success: true,
            exit_code: Some(0),
            ..Default::default()
        }
    }
}

/// Common interface for launching external tools.
///
/// Implementations block until the child exits and return everything it
/// wrote to the captured streams. A non-zero exit is reported through
/// [`CapturedOutput::success`], not as an `Err`; `Err` means the process
/// could not be run at all.
pub trait CommandRunner: Send + Sync {
    fn run(&self, command: &ToolCommand) -> Result<CapturedOutput>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_rendering() {
        let command = ToolCommand::new("blastp", "blastall", Path::new("/w"))
            .arg("-F")
            .arg("m S")
            .stdout_to(Path::new("/w/blastres.txt"));

        assert_eq!(command.command_line(), "blastall -F \"m S\" > /w/blastres.txt");
    }
}
