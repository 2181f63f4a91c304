use std::io::Write;
use std::process::ExitCode;
use tubegrab_lib::cli::{parse_args, resolve_command, run_session, usage};
use tubegrab_lib::diagnostics::print_non_main_threads;
use tubegrab_lib::download::YtDlp;
use tubegrab_lib::error::TubeGrabError;
use tubegrab_lib::tools::resolve_ytdlp;
use tubegrab_lib::update::{UpdateCommand, already_updated, run_auto_update};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    if let Err(e) = color_eyre::install() {
        eprintln!("[!] Failed to install error reporter: {e}");
    }

    let args = parse_args();
    tracing::debug!("Log level {}", args.log_level);

    let params = match resolve_command(args.command) {
        Ok(params) => params,
        Err(e) => return fail(e),
    };

    let ytdlp = resolve_ytdlp(params.settings.ytdlp_path.as_deref());

    let updated = params.auto_update
        && match UpdateCommand::from_settings(&params.settings, &ytdlp) {
            Ok(command) => run_auto_update(&command, already_updated()).await,
            Err(e) => {
                eprintln!("[!] {e} (continuing with current version).");
                false
            }
        };

    let shutdown = params.shutdown;
    let mut downloader = YtDlp::new(ytdlp);
    if updated {
        downloader = downloader.mark_updated();
    }

    let report = match run_session(params, &downloader).await {
        Ok(report) => report,
        Err(e) => return fail(e),
    };

    if shutdown.debug_threads {
        print_non_main_threads();
    }

    let _ = std::io::stdout().flush();
    let _ = std::io::stderr().flush();

    if shutdown.hard_exit {
        std::process::exit(i32::from(report.exit_code));
    }
    ExitCode::from(report.exit_code)
}

fn fail(error: TubeGrabError) -> ExitCode {
    eprintln!("[!] {error}");
    if error.wants_usage() {
        println!("{}", usage());
    }
    ExitCode::from(error.exit_code())
}
