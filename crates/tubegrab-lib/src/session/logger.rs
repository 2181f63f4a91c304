use super::RunContext;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only destination for session log lines.
pub trait LogSink: Send {
    fn append(&self, line: &str) -> std::io::Result<()>;
}

/// Appends to a text file, creating it on first use. Never truncates.
#[derive(Clone, Debug)]
pub struct FileLogSink {
    path: PathBuf,
}

impl FileLogSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSink for FileLogSink {
    fn append(&self, line: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line.trim_end())
    }
}

pub fn log_session_start(context: &RunContext) {
    let started = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    context.write_log(&format!("\n=== Session {started} ==="));
    context.write_log(&format!("URLs: {}", context.counters.total));
}

pub fn log_session_summary(context: &RunContext) {
    context.write_log(&format!(
        "Done: {} ok, {} failed",
        context.counters.done, context.counters.failed
    ));
}
