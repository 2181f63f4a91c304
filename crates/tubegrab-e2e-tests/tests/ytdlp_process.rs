#![cfg(unix)]

use tubegrab_e2e_tests::{create_run_params, init_tracing, setup_output_dirs, write_fake_ytdlp};
use tubegrab_lib::cli::run_session;
use tubegrab_lib::download::YtDlp;
use tubegrab_lib::media::MediaSelection;
use tubegrab_lib::progress::CountPolicy;

/// Prints one completion line per URL after `--`, mimicking yt-dlp's `--print after_move:` output.
const SUCCEEDING_SCRIPT: &str = r#"
printf '%s\n' "$@" >> "$0.calls"
echo "[youtube] Extracting URL"
case " $* " in
  *" --extract-audio "*) ext=m4a ;;
  *) ext=mp4 ;;
esac
urls=0
for arg in "$@"; do
  if [ "$urls" = 1 ]; then
    printf '[finished] %s\t/out/%s.%s\n' "$arg" "$(basename "$arg")" "$ext"
  fi
  if [ "$arg" = "--" ]; then urls=1; fi
done
exit 0
"#;

const FAILING_SCRIPT: &str = r#"
echo "ERROR: [youtube] abc: Video unavailable" >&2
exit 1
"#;

#[tokio::test]
async fn test_completion_lines_are_counted() {
    init_tracing();

    let (temp_dir, dirs) = setup_output_dirs().expect("Failed to setup output dirs");
    let script = write_fake_ytdlp(temp_dir.path(), SUCCEEDING_SCRIPT).expect("Failed to write script");

    let params = create_run_params(
        dirs.clone(),
        &["https://youtu.be/a", "https://youtu.be/b"],
        MediaSelection::from_flags(false, false),
        CountPolicy::PerUnit,
    );
    let report = run_session(params, &YtDlp::new(&script))
        .await
        .expect("Session should run");

    assert_eq!(report.exit_code, 0);
    assert_eq!(report.counters.done, 4);

    let log = std::fs::read_to_string(&report.log_path).expect("Log should exist");
    assert!(log.contains("(1/2) ✓ Finished: /out/a.m4a"), "log was: {log}");
    assert!(log.contains("(4/2) ✓ Finished: /out/b.mp4"), "log was: {log}");

    let calls = std::fs::read_to_string(format!("{}.calls", script.display()))
        .expect("Script should record its arguments");
    let args: Vec<&str> = calls.lines().collect();
    assert!(args.contains(&"--no-playlist"));
    assert!(args.contains(&"--extract-audio"));
    assert!(args.contains(&"--merge-output-format"));
    let music_template = format!("{}/%(artist)s-%(title)s.%(ext)s", dirs.music.display());
    assert!(args.contains(&music_template.as_str()));
}

#[tokio::test]
async fn test_per_url_policy_with_real_process() {
    init_tracing();

    let (temp_dir, dirs) = setup_output_dirs().expect("Failed to setup output dirs");
    let script = write_fake_ytdlp(temp_dir.path(), SUCCEEDING_SCRIPT).expect("Failed to write script");

    let params = create_run_params(
        dirs,
        &["https://youtu.be/a", "https://youtu.be/b"],
        MediaSelection::from_flags(false, false),
        CountPolicy::PerUrl,
    );
    let report = run_session(params, &YtDlp::new(&script))
        .await
        .expect("Session should run");

    assert_eq!(report.counters.done, 2);
}

#[tokio::test]
async fn test_nonzero_exit_marks_failure() {
    init_tracing();

    let (temp_dir, dirs) = setup_output_dirs().expect("Failed to setup output dirs");
    let script = write_fake_ytdlp(temp_dir.path(), FAILING_SCRIPT).expect("Failed to write script");

    let params = create_run_params(
        dirs,
        &["https://youtu.be/a"],
        MediaSelection::from_flags(false, false),
        CountPolicy::PerUnit,
    );
    let report = run_session(params, &YtDlp::new(&script))
        .await
        .expect("Session should run");

    assert_eq!(report.exit_code, 1);
    assert_eq!(report.counters.failed, 2);
    assert_eq!(report.counters.done, 0);
}

#[tokio::test]
async fn test_missing_binary_marks_both_kinds_failed() {
    init_tracing();

    let (temp_dir, dirs) = setup_output_dirs().expect("Failed to setup output dirs");
    let params = create_run_params(
        dirs,
        &["https://youtu.be/a"],
        MediaSelection::from_flags(false, false),
        CountPolicy::PerUnit,
    );
    let report = run_session(params, &YtDlp::new(temp_dir.path().join("no-such-yt-dlp")))
        .await
        .expect("Session should run");

    assert_eq!(report.exit_code, 1);
    assert_eq!(report.counters.failed, 2);
}

/// Emits a title in a legacy code page before the completion line.
const LATIN1_SCRIPT: &str = r#"
printf 'Title \351t\351\n'
urls=0
for arg in "$@"; do
  if [ "$urls" = 1 ]; then
    printf '[finished] %s\t/out/\351t\351.mp4\n' "$arg"
  fi
  if [ "$arg" = "--" ]; then urls=1; fi
done
sleep 1
touch "$0.done"
exit 0
"#;

#[tokio::test]
async fn test_non_utf8_output_does_not_fail_the_kind() {
    init_tracing();

    let (temp_dir, dirs) = setup_output_dirs().expect("Failed to setup output dirs");
    let script = write_fake_ytdlp(temp_dir.path(), LATIN1_SCRIPT).expect("Failed to write script");

    let params = create_run_params(
        dirs,
        &["https://youtu.be/a"],
        MediaSelection::from_flags(false, true),
        CountPolicy::PerUnit,
    );
    let report = run_session(params, &YtDlp::new(&script))
        .await
        .expect("Session should run");

    assert_eq!(report.exit_code, 0);
    assert_eq!(report.counters.failed, 0);
    assert_eq!(report.counters.done, 1);
    assert!(
        std::path::Path::new(&format!("{}.done", script.display())).exists(),
        "yt-dlp should have run to completion before the session returned"
    );

    let log = std::fs::read_to_string(&report.log_path).expect("Log should exist");
    assert!(log.contains("(1/1) ✓ Finished: /out/\u{fffd}t\u{fffd}.mp4"), "log was: {log}");
}

#[tokio::test]
async fn test_update_guard_reaches_ytdlp() {
    init_tracing();

    let (temp_dir, dirs) = setup_output_dirs().expect("Failed to setup output dirs");
    let script = write_fake_ytdlp(
        temp_dir.path(),
        r#"printf '%s\n' "${YTDLP_UPDATED:-unset}" >> "$0.env"
exit 0
"#,
    )
    .expect("Failed to write script");

    let params = create_run_params(
        dirs,
        &["https://youtu.be/a"],
        MediaSelection::from_flags(false, false),
        CountPolicy::PerUnit,
    );
    run_session(params, &YtDlp::new(&script).mark_updated())
        .await
        .expect("Session should run");

    let seen = std::fs::read_to_string(format!("{}.env", script.display()))
        .expect("Script should record its environment");
    assert_eq!(seen, "1\n1\n", "Both media kinds should see the guard");
}
