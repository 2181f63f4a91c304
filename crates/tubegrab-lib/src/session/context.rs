use super::LogSink;
use crate::progress::CountPolicy;
use std::collections::HashSet;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Counters {
    pub done: usize,
    pub failed: usize,
    pub total: usize,
}

/// State of one session: counters, counting policy and the log capability.
pub struct RunContext {
    pub counters: Counters,
    pub policy: CountPolicy,
    pub(crate) completed_urls: HashSet<String>,
    log: Box<dyn LogSink>,
}

impl RunContext {
    pub fn new(total: usize, policy: CountPolicy, log: Box<dyn LogSink>) -> Self {
        Self {
            counters: Counters {
                total,
                ..Counters::default()
            },
            policy,
            completed_urls: HashSet::new(),
            log,
        }
    }

    /// Appends a line to the session log. Failures are ignored.
    pub fn write_log(&self, line: &str) {
        if let Err(e) = self.log.append(line) {
            tracing::debug!("Ignoring log write failure: {}", e);
        }
    }
}

impl std::fmt::Debug for RunContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunContext")
            .field("counters", &self.counters)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
