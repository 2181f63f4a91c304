use async_trait::async_trait;
use eyre::Result;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tubegrab_lib::cli::{RunParams, ShutdownOptions};
use tubegrab_lib::config::Settings;
use tubegrab_lib::download::{DownloadOptions, MediaDownloader};
use tubegrab_lib::error::TubeGrabError;
use tubegrab_lib::media::{MediaKind, MediaSelection, OutputDirs};
use tubegrab_lib::progress::{CountPolicy, ProgressEvent, ProgressSink};
use tubegrab_lib::session::LogSink;

/// Log sink that keeps lines in memory.
#[derive(Clone, Default)]
pub struct RecordingLog {
    lines: Arc<Mutex<Vec<String>>>,
}

impl RecordingLog {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl LogSink for RecordingLog {
    fn append(&self, line: &str) -> std::io::Result<()> {
        self.lines.lock().unwrap().push(line.to_string());
        Ok(())
    }
}

/// Scripted result of one media-kind call.
#[derive(Clone, Copy, Debug)]
pub enum Outcome {
    /// Finish every URL and exit with the given code.
    Exit(i32),
    /// Fail before producing anything.
    SpawnError,
}

/// Downloader double: reports one finished unit per URL and records each call.
pub struct ScriptedDownloader {
    pub audio: Outcome,
    pub video: Outcome,
    calls: Mutex<Vec<(MediaKind, Vec<String>)>>,
}

impl ScriptedDownloader {
    pub fn new(audio: Outcome, video: Outcome) -> Self {
        Self {
            audio,
            video,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(MediaKind, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaDownloader for ScriptedDownloader {
    async fn download(
        &self,
        options: &DownloadOptions,
        urls: &[String],
        sink: &mut dyn ProgressSink,
    ) -> Result<i32, TubeGrabError> {
        self.calls
            .lock()
            .unwrap()
            .push((options.kind, urls.to_vec()));

        let outcome = match options.kind {
            MediaKind::Audio => self.audio,
            MediaKind::Video => self.video,
        };

        match outcome {
            Outcome::SpawnError => Err(TubeGrabError::ToolSpawn {
                tool: "yt-dlp".to_string(),
                reason: "scripted failure".to_string(),
            }),
            Outcome::Exit(code) => {
                let ext = match options.kind {
                    MediaKind::Audio => "m4a",
                    MediaKind::Video => "mp4",
                };
                for (idx, url) in urls.iter().enumerate() {
                    sink.on_event(ProgressEvent::Finished {
                        filename: format!("item{idx}.{ext}"),
                        source_url: Some(url.clone()),
                    });
                }
                Ok(code)
            }
        }
    }
}

/// Output directories inside a fresh temporary directory (not yet created).
pub fn setup_output_dirs() -> Result<(TempDir, OutputDirs)> {
    let temp_dir = tempfile::tempdir()?;
    let dirs = OutputDirs {
        video: temp_dir.path().join("Videos"),
        music: temp_dir.path().join("Music"),
    };
    Ok((temp_dir, dirs))
}

pub fn create_run_params(
    dirs: OutputDirs,
    urls: &[&str],
    selection: MediaSelection,
    count_policy: CountPolicy,
) -> RunParams {
    RunParams {
        settings: Settings::default(),
        urls: urls.iter().map(|u| u.to_string()).collect(),
        selection,
        dirs,
        allow_playlists: false,
        auto_update: false,
        count_policy,
        shutdown: ShutdownOptions::default(),
    }
}

pub fn write_links_file(dir: &Path, contents: &str) -> Result<PathBuf> {
    let path = dir.join("links.txt");
    std::fs::write(&path, contents)?;
    Ok(path)
}

/// Installs an executable shell script standing in for yt-dlp.
#[cfg(unix)]
pub fn write_fake_ytdlp(dir: &Path, body: &str) -> Result<PathBuf> {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-yt-dlp");
    std::fs::write(&path, format!("#!/bin/sh\n{body}"))?;
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))?;
    Ok(path)
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter("tubegrab_lib=debug,tubegrab_e2e_tests=debug")
        .with_test_writer()
        .try_init()
        .ok();
}
