use crate::cli::RunParams;
use crate::download::{MediaDownloader, run_downloads};
use crate::error::TubeGrabError;
use crate::links::playlist_urls;
use crate::session::{Counters, FileLogSink, RunContext, log_session_start, log_session_summary};
use crate::tools::have_ffmpeg;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub counters: Counters,
    pub exit_code: u8,
    pub log_path: PathBuf,
}

pub async fn run_session(
    params: RunParams,
    downloader: &dyn MediaDownloader,
) -> Result<SessionReport, TubeGrabError> {
    let RunParams {
        settings,
        urls,
        selection,
        dirs,
        allow_playlists,
        count_policy,
        ..
    } = params;

    dirs.ensure_exist()?;

    let log_path = dirs.log_dir(selection).join(&settings.log_file_name);
    tracing::debug!("Session log at {}", log_path.display());

    let mut context = RunContext::new(
        urls.len(),
        count_policy,
        Box::new(FileLogSink::new(&log_path)),
    );
    log_session_start(&context);

    if !have_ffmpeg() {
        eprintln!(
            "[!] ffmpeg not found. Install ffmpeg for audio extraction and muxing (e.g. apt install ffmpeg)."
        );
    }

    if !allow_playlists {
        for url in playlist_urls(&urls) {
            tracing::info!("{} references a playlist; only its video is fetched (pass --allow-playlists for the whole list)", url);
        }
    }

    let exit_code = run_downloads(
        downloader,
        selection,
        &dirs,
        &settings,
        allow_playlists,
        &urls,
        &mut context,
    )
    .await;

    let counters = context.counters;
    println!(
        "\n✅ Done: {} succeeded, ❌ {} failed.",
        counters.done, counters.failed
    );
    log_session_summary(&context);

    Ok(SessionReport {
        counters,
        exit_code,
        log_path,
    })
}
