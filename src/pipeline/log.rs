//! Append-only run transcript
//!
//! The transcript is what callers receive as `output_log` on success and as
//! the failure message otherwise. It only ever grows.

/// One entry of the transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEvent {
    /// A stage transition, e.g. "Running mcl"
    Stage(String),
    /// A line captured from a child process's stdout
    Output(String),
    /// A line captured from a child process's stderr
    Error(String),
    /// A summary line written by the pipeline itself
    Note(String),
    /// The failure trace appended when a run aborts
    Failure(String),
}

#[derive(Debug, Clone, Default)]
pub struct RunLog {
    text: String,
    events: Vec<LogEvent>,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a stage transition
    pub fn stage(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!("{}", message);
        self.text.push_str(&message);
        self.text.push('\n');
        self.events.push(LogEvent::Stage(message));
    }

    /// Record a summary line between stages
    pub fn note(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!("{}", message);
        self.text.push_str(&message);
        self.text.push('\n');
        self.events.push(LogEvent::Note(message));
    }

    /// Record captured stdout/stderr of a child process.
    ///
    /// Each section is only written when the stream produced something;
    /// blank lines are dropped and every kept line is prefixed with `|`.
    pub fn capture(&mut self, stdout: &str, stderr: &str) {
        if !stdout.is_empty() {
            self.text.push_str("Output:\n");
            for line in stdout.lines().filter(|line| !line.is_empty()) {
                self.push_line(line);
                self.events.push(LogEvent::Output(line.to_string()));
            }
        }
        if !stderr.is_empty() {
            self.text.push_str("Errors:\n");
            for line in stderr.lines().filter(|line| !line.is_empty()) {
                self.push_line(line);
                self.events.push(LogEvent::Error(line.to_string()));
            }
        }
    }

    /// Append the trace of the error that aborted the run
    pub fn failure(&mut self, trace: &str) {
        tracing::warn!("{}", trace);
        self.text.push_str(trace);
        self.text.push('\n');
        self.events.push(LogEvent::Failure(trace.to_string()));
    }

    fn push_line(&mut self, line: &str) {
        self.text.push('|');
        self.text.push_str(line);
        self.text.push('\n');
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn events(&self) -> &[LogEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn into_text(self) -> String {
        self.text
    }
}
