use super::{CountPolicy, ProgressEvent, ProgressSink};
use crate::session::RunContext;

/// Counts finished units into the run context and reports each one.
pub struct ProgressAggregator<'a> {
    context: &'a mut RunContext,
}

impl<'a> ProgressAggregator<'a> {
    pub fn new(context: &'a mut RunContext) -> Self {
        Self { context }
    }

    fn on_finished(&mut self, filename: String, source_url: Option<String>) {
        let counts = match self.context.policy {
            CountPolicy::PerUnit => true,
            CountPolicy::PerUrl => {
                let key = source_url.unwrap_or_else(|| filename.clone());
                self.context.completed_urls.insert(key)
            }
        };

        if !counts {
            tracing::debug!(file = %filename, "Unit finished for an already counted URL");
            return;
        }

        self.context.counters.done += 1;
        let msg = format!(
            "({}/{}) ✓ Finished: {}",
            self.context.counters.done, self.context.counters.total, filename
        );
        println!("{msg}");
        self.context.write_log(&msg);
    }
}

impl ProgressSink for ProgressAggregator<'_> {
    fn on_event(&mut self, event: ProgressEvent) {
        match event {
            ProgressEvent::Finished {
                filename,
                source_url,
            } => self.on_finished(filename, source_url),
            ProgressEvent::Message(line) => tracing::debug!(target: "yt_dlp", "{}", line),
        }
    }
}
