use super::{MediaDownloader, build_audio_options, build_video_options};
use crate::config::Settings;
use crate::error::{EXIT_FAILURE, TubeGrabError};
use crate::media::{MediaKind, MediaSelection, OutputDirs};
use crate::progress::ProgressAggregator;
use crate::session::RunContext;

/// Runs one downloader call per selected media kind, audio first.
///
/// A failed kind is counted in `context.counters.failed` and does not stop the
/// next one. Returns `1` if any call failed, `0` otherwise.
pub async fn run_downloads(
    downloader: &dyn MediaDownloader,
    selection: MediaSelection,
    dirs: &OutputDirs,
    settings: &Settings,
    allow_playlists: bool,
    urls: &[String],
    context: &mut RunContext,
) -> u8 {
    let mut exit_code = 0;

    for kind in selection.kinds() {
        let dir = dirs.for_kind(kind);
        println!(
            "[*] Download {} → {} ({} files)",
            kind,
            dir.display(),
            urls.len()
        );

        let options = match kind {
            MediaKind::Audio => build_audio_options(dir, settings, allow_playlists),
            MediaKind::Video => build_video_options(dir, settings, allow_playlists),
        };

        let result = {
            let mut aggregator = ProgressAggregator::new(context);
            downloader.download(&options, urls, &mut aggregator).await
        };

        if let Err(failure) = check_result(kind, result) {
            match failure {
                KindFailure::ExitCode(code) => {
                    tracing::warn!(%kind, code, "Downloader reported failure");
                }
                KindFailure::Error(e) => eprintln!("[{kind}] Error: {e}"),
            }
            context.counters.failed += 1;
            exit_code = EXIT_FAILURE;
        }
    }

    exit_code
}

enum KindFailure {
    ExitCode(i32),
    Error(TubeGrabError),
}

fn check_result(kind: MediaKind, result: Result<i32, TubeGrabError>) -> Result<(), KindFailure> {
    match result {
        Ok(0) => {
            tracing::debug!(%kind, "Download call succeeded");
            Ok(())
        }
        Ok(code) => Err(KindFailure::ExitCode(code)),
        Err(e) => Err(KindFailure::Error(e)),
    }
}
