use crate::progress::CountPolicy;
use clap::{ArgAction, CommandFactory, Parser};
use tracing::Level;

/// Parsed command line, before settings and link files are consulted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunRequest {
    pub audio: bool,
    pub video: bool,
    pub file: Option<String>,
    pub video_dir: Option<String>,
    pub music_dir: Option<String>,
    pub allow_playlists: bool,
    pub hard_exit: bool,
    pub debug_threads: bool,
    pub auto_update: bool,
    pub config_path: Option<String>,
    pub count_policy: Option<CountPolicy>,
    pub urls: Vec<String>,
}

pub struct Args {
    pub command: RunRequest,
    pub log_level: Level,
}

#[derive(Debug, Parser)]
#[command(
    name = "tubegrab",
    version,
    about = "Download YouTube links as video (mp4), audio (m4a) or both"
)]
struct Cli {
    #[arg(
        long = "verbose",
        help = "Sets the level of verbosity",
        action = ArgAction::Count
    )]
    verbose: u8,

    #[arg(short = 'v', long = "video", help = "Download video (MP4) to ~/Videos")]
    video: bool,

    #[arg(short = 'a', long = "audio", help = "Download audio (M4A) to ~/Music")]
    audio: bool,

    #[arg(
        short = 'f',
        long = "file",
        value_name = "FILE",
        help = "File with links (one per line)"
    )]
    file: Option<String>,

    #[arg(
        long = "video-dir",
        value_name = "DIR",
        help = "Target directory for videos (default: ~/Videos)"
    )]
    video_dir: Option<String>,

    #[arg(
        long = "music-dir",
        value_name = "DIR",
        help = "Target directory for audio (default: ~/Music)"
    )]
    music_dir: Option<String>,

    #[arg(long = "allow-playlists", help = "Allow playlist downloads (off by default)")]
    allow_playlists: bool,

    #[arg(
        long = "hard-exit",
        help = "Exit the process immediately after the summary (works around hanging threads)"
    )]
    hard_exit: bool,

    #[arg(long = "debug-threads", help = "Print active threads at shutdown for diagnosis")]
    debug_threads: bool,

    #[arg(
        long = "auto-update",
        help = "Update yt-dlp before starting; the new version is used right away"
    )]
    auto_update: bool,

    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Optional settings file (yaml, toml or json)"
    )]
    config: Option<String>,

    #[arg(
        long = "count-policy",
        value_name = "POLICY",
        value_enum,
        help = "How finished downloads are counted (overrides the settings file)"
    )]
    count_policy: Option<CountPolicy>,

    #[arg(value_name = "URL", help = "YouTube URL(s) or playlist(s)")]
    urls: Vec<String>,
}

impl From<Cli> for RunRequest {
    fn from(cli: Cli) -> Self {
        let Cli {
            verbose: _,
            video,
            audio,
            file,
            video_dir,
            music_dir,
            allow_playlists,
            hard_exit,
            debug_threads,
            auto_update,
            config,
            count_policy,
            urls,
        } = cli;

        RunRequest {
            audio,
            video,
            file,
            video_dir,
            music_dir,
            allow_playlists,
            hard_exit,
            debug_threads,
            auto_update,
            config_path: config,
            count_policy,
            urls,
        }
    }
}

/// Rendered `--help` text.
pub fn usage() -> String {
    Cli::command().render_help().to_string()
}

pub fn parse_args() -> Args {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(log_level.into())
                .from_env_lossy(),
        )
        .init();

    Args {
        command: cli.into(),
        log_level,
    }
}
