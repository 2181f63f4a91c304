use crate::cli::args::RunRequest;
use crate::cli::params::{RunParams, ShutdownOptions};
use crate::config::load_config;
use crate::error::TubeGrabError;
use crate::links::collect_urls;
use crate::media::{MediaSelection, OutputDirs};
use std::path::{Path, PathBuf};

/// Expands a leading `~` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    let home = dirs::home_dir();
    match (path, home) {
        ("~", Some(home)) => home,
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}

fn default_dir(name: &str) -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(name))
        .unwrap_or_else(|| PathBuf::from(name))
}

pub fn resolve_command(command: RunRequest) -> Result<RunParams, TubeGrabError> {
    let RunRequest {
        audio,
        video,
        file,
        video_dir,
        music_dir,
        allow_playlists,
        hard_exit,
        debug_threads,
        auto_update,
        config_path,
        count_policy,
        urls,
    } = command;

    let settings = load_config(config_path.as_deref())?;

    let urls = collect_urls(file.as_deref().map(Path::new), urls)?;
    if urls.is_empty() {
        return Err(TubeGrabError::NoUrls);
    }

    let dirs = OutputDirs {
        video: video_dir
            .as_deref()
            .map(expand_home)
            .unwrap_or_else(|| default_dir("Videos")),
        music: music_dir
            .as_deref()
            .map(expand_home)
            .unwrap_or_else(|| default_dir("Music")),
    };

    let count_policy = count_policy.unwrap_or(settings.count_policy);

    Ok(RunParams {
        settings,
        urls,
        selection: MediaSelection::from_flags(audio, video),
        dirs,
        allow_playlists,
        auto_update,
        count_policy,
        shutdown: ShutdownOptions {
            hard_exit,
            debug_threads,
        },
    })
}
