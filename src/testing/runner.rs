use crate::tools::traits::{CapturedOutput, CommandRunner, ToolCommand};
use crate::Result;
use std::collections::HashMap;
use std::sync::Mutex;

type Script = Box<dyn Fn(&ToolCommand) -> Result<CapturedOutput> + Send + Sync>;

/// Runner that records commands instead of launching them.
///
/// Unscripted tools succeed silently; if their stdout is redirected, an empty
/// file is created the way a shell redirect would.
#[derive(Default)]
pub struct ScriptedRunner {
    scripts: HashMap<String, Script>,
    calls: Mutex<Vec<ToolCommand>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `script` whenever `tool` is invoked
    pub fn on<F>(mut self, tool: &str, script: F) -> Self
    where
        F: Fn(&ToolCommand) -> Result<CapturedOutput> + Send + Sync + 'static,
    {
        self.scripts.insert(tool.to_string(), Box::new(script));
        self
    }

    /// Make `tool` write `contents` to its redirected stdout
    pub fn writing_stdout(self, tool: &str, contents: &str) -> Self {
        let contents = contents.to_string();
        self.on(tool, move |command| {
            if let Some(path) = &command.stdout {
                std::fs::write(path, &contents)?;
            }
            Ok(CapturedOutput::ok())
        })
    }

    /// Make `tool` print to its captured streams and exit successfully
    pub fn printing(self, tool: &str, stdout: &str, stderr: &str) -> Self {
        let (stdout, stderr) = (stdout.to_string(), stderr.to_string());
        self.on(tool, move |_| {
            Ok(CapturedOutput {
                stdout: stdout.clone(),
                stderr: stderr.clone(),
                ..CapturedOutput::ok()
            })
        })
    }

    /// Make `tool` exit with `exit_code` after printing `stderr`
    pub fn failing(self, tool: &str, exit_code: i32, stderr: &str) -> Self {
        let stderr = stderr.to_string();
        self.on(tool, move |_| {
            Ok(CapturedOutput {
                success: false,
                exit_code: Some(exit_code),
                stdout: String::new(),
                stderr: stderr.clone(),
            })
        })
    }

    /// Every command run so far, in order
    pub fn calls(&self) -> Vec<ToolCommand> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    /// Tool names of every command run so far, in order
    pub fn tools(&self) -> Vec<String> {
        self.calls().into_iter().map(|command| command.tool).collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, command: &ToolCommand) -> Result<CapturedOutput> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(command.clone());
        }

        match self.scripts.get(&command.tool) {
            Some(script) => script(command),
            None => {
                if let Some(path) = &command.stdout {
                    std::fs::File::create(path)?;
                }
                Ok(CapturedOutput::ok())
            }
        }
    }
}
