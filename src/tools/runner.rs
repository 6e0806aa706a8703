use crate::tools::traits::{CapturedOutput, CommandRunner, ToolCommand};
use crate::{PangenomeError, Result};
use std::fs::File;
use std::process::{Command, Stdio};

/// Runs tools as child processes of the current process
#[derive(Debug, Default, Clone)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, command: &ToolCommand) -> Result<CapturedOutput> {
        tracing::debug!("[{}] {}", command.cwd.display(), command.command_line());

        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args).current_dir(&command.cwd);

        match &command.stdin {
            Some(path) => cmd.stdin(Stdio::from(File::open(path)?)),
            None => cmd.stdin(Stdio::null()),
        };
        match &command.stdout {
            Some(path) => cmd.stdout(Stdio::from(File::create(path)?)),
            None => cmd.stdout(Stdio::piped()),
        };
        cmd.stderr(Stdio::piped());

        let output = cmd.output().map_err(|e| {
            PangenomeError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to run {}: {}", command.program, e),
            ))
        })?;

        Ok(CapturedOutput {
            success: output.status.success(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_captures_streams_and_status() {
        let dir = TempDir::new().unwrap();
        let command = ToolCommand::new("sh", "sh", dir.path())
            .arg("-c")
            .arg("echo out; echo err >&2; exit 3");

        let output = SystemRunner::new().run(&command).unwrap();
        assert!(!output.success);
        assert_eq!(output.exit_code, Some(3));
        assert_eq!(output.stdout, "out\n");
        assert_eq!(output.stderr, "err\n");
    }

    #[test]
    fn test_redirects_stdin_and_stdout() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.txt");
        let output_path = dir.path().join("out.txt");
        std::fs::write(&input, "a b c\n").unwrap();

        let command = ToolCommand::new("cat", "cat", dir.path())
            .stdin_from(&input)
            .stdout_to(&output_path);

        let output = SystemRunner::new().run(&command).unwrap();
        assert!(output.success);
        assert!(output.stdout.is_empty());
        assert_eq!(std::fs::read_to_string(&output_path).unwrap(), "a b c\n");
    }

    #[test]
    fn test_missing_program_is_an_error() {
        let dir = TempDir::new().unwrap();
        let command = ToolCommand::new("nope", "definitely-not-a-real-binary-xyz", dir.path());
        let err = SystemRunner::new().run(&command).unwrap_err();
        assert!(err.to_string().contains("definitely-not-a-real-binary-xyz"));
    }
}
