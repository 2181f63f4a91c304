use super::{DownloadOptions, MediaDownloader};
use crate::error::TubeGrabError;
use crate::progress::{ProgressEvent, ProgressSink};
use crate::update::UPDATED_ENV_VAR;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

/// Prefix of the line yt-dlp prints once a file has been moved to its final path.
pub const FINISHED_MARKER: &str = "[finished] ";

pub(crate) const FINISHED_PRINT_TEMPLATE: &str = "after_move:[finished] %(original_url)s\t%(filepath)s";

const NA: &str = "NA";

/// Parses a completion line into a `Finished` event.
pub fn parse_finished_line(line: &str) -> Option<ProgressEvent> {
    let rest = line.strip_prefix(FINISHED_MARKER)?;
    let (source_url, filename) = match rest.split_once('\t') {
        Some((url, file)) => (Some(url), file),
        None => (None, rest),
    };

    let filename = filename.trim();
    if filename.is_empty() {
        return None;
    }

    Some(ProgressEvent::Finished {
        filename: filename.to_string(),
        source_url: source_url
            .map(str::trim)
            .filter(|url| !url.is_empty() && *url != NA)
            .map(str::to_string),
    })
}

/// Runs the yt-dlp program once per media kind.
#[derive(Clone, Debug)]
pub struct YtDlp {
    binary: PathBuf,
    envs: Vec<(String, String)>,
}

impl YtDlp {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            envs: Vec::new(),
        }
    }

    /// Adds an environment variable to every spawned yt-dlp process.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Tells spawned processes that yt-dlp was already updated in this run.
    pub fn mark_updated(self) -> Self {
        self.with_env(UPDATED_ENV_VAR, "1")
    }

    pub fn binary(&self) -> &std::path::Path {
        &self.binary
    }
}

/// Reads `reader` to the end, one lossily decoded line at a time.
async fn for_each_line<R, F>(reader: R, mut on_line: F) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
    F: FnMut(String),
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            return Ok(());
        }
        let line = String::from_utf8_lossy(&buf);
        on_line(line.trim_end_matches(['\r', '\n']).to_string());
    }
}

#[async_trait]
impl MediaDownloader for YtDlp {
    async fn download(
        &self,
        options: &DownloadOptions,
        urls: &[String],
        sink: &mut dyn ProgressSink,
    ) -> Result<i32, TubeGrabError> {
        let args = options.to_args();
        tracing::debug!(kind = %options.kind, binary = %self.binary.display(), ?args, "Starting yt-dlp");

        let mut child = Command::new(&self.binary)
            .args(&args)
            .arg("--")
            .args(urls)
            .envs(self.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| TubeGrabError::ToolSpawn {
                tool: self.binary.display().to_string(),
                reason: e.to_string(),
            })?;

        let stdout = child.stdout.take().ok_or_else(|| {
            TubeGrabError::Unexpected(eyre::eyre!("yt-dlp stdout unavailable"))
        })?;
        let stderr = child.stderr.take().ok_or_else(|| {
            TubeGrabError::Unexpected(eyre::eyre!("yt-dlp stderr unavailable"))
        })?;

        // Drained separately so a chatty stderr never blocks stdout.
        let kind = options.kind;
        let stderr_task = tokio::spawn(async move {
            let drained = for_each_line(stderr, |line| {
                tracing::warn!(target: "yt_dlp", %kind, "{}", line);
            })
            .await;
            if let Err(e) = drained {
                tracing::debug!("stderr reader failed: {}", e);
            }
        });

        let read = for_each_line(stdout, |line| match parse_finished_line(&line) {
            Some(event) => sink.on_event(event),
            None => sink.on_event(ProgressEvent::Message(line)),
        })
        .await;

        if let Err(e) = read {
            tracing::warn!(%kind, "Lost yt-dlp output, stopping it: {}", e);
            if let Err(kill_err) = child.kill().await {
                tracing::debug!("Failed to kill yt-dlp: {}", kill_err);
            }
            stderr_task.abort();
            return Err(e.into());
        }

        let status = child.wait().await?;
        if let Err(e) = stderr_task.await {
            tracing::debug!("stderr reader ended abnormally: {}", e);
        }

        let code = status.code().unwrap_or(-1);
        tracing::debug!(%kind, code, "yt-dlp exited");
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_finished_line_with_url() {
        let event = parse_finished_line("[finished] https://youtu.be/abc\t/m/Artist-Title.m4a");
        assert_eq!(
            event,
            Some(ProgressEvent::Finished {
                filename: "/m/Artist-Title.m4a".to_string(),
                source_url: Some("https://youtu.be/abc".to_string()),
            })
        );
    }

    #[test]
    fn test_parse_finished_line_with_missing_url() {
        let event = parse_finished_line("[finished] NA\t/v/unknown-Title.mp4");
        assert_eq!(
            event,
            Some(ProgressEvent::Finished {
                filename: "/v/unknown-Title.mp4".to_string(),
                source_url: None,
            })
        );
    }

    #[test]
    fn test_parse_ignores_other_output() {
        assert_eq!(parse_finished_line("[download] Destination: x.mp4"), None);
        assert_eq!(parse_finished_line("[finished] url\t  "), None);
    }

    #[test]
    fn test_print_template_carries_marker() {
        let (_, template) = FINISHED_PRINT_TEMPLATE
            .split_once(':')
            .expect("template has a stage");
        assert!(template.starts_with(FINISHED_MARKER));
    }

    #[tokio::test]
    async fn test_missing_binary_is_a_spawn_error() {
        struct Discard;
        impl ProgressSink for Discard {
            fn on_event(&mut self, _event: ProgressEvent) {}
        }

        let downloader = YtDlp::new("/nonexistent/tubegrab/yt-dlp");
        let options = crate::download::build_audio_options(
            std::path::Path::new("/tmp"),
            &crate::config::Settings::default(),
            false,
        );
        let result = downloader
            .download(&options, &["https://example.com".to_string()], &mut Discard)
            .await;
        assert!(matches!(result, Err(TubeGrabError::ToolSpawn { .. })));
    }

    #[tokio::test]
    async fn test_lines_are_decoded_lossily() {
        let raw: &[u8] = b"[finished] u\t/v/Title \xe9t\xe9.mp4\r\nplain\nlast";
        let mut lines = Vec::new();
        for_each_line(raw, |line| lines.push(line))
            .await
            .expect("in-memory read");

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "[finished] u\t/v/Title \u{fffd}t\u{fffd}.mp4");
        assert_eq!(lines[1], "plain");
        assert_eq!(lines[2], "last");
        assert!(parse_finished_line(&lines[0]).is_some());
    }

    #[test]
    fn test_mark_updated_sets_guard_for_children() {
        let downloader = YtDlp::new("yt-dlp").mark_updated();
        assert_eq!(
            downloader.envs,
            vec![(UPDATED_ENV_VAR.to_string(), "1".to_string())]
        );
    }
}
