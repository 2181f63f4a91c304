use crate::config::Settings;
use crate::error::TubeGrabError;
use std::path::Path;
use tokio::process::Command;

/// Set to `1` when yt-dlp has already been updated for this invocation chain.
pub const UPDATED_ENV_VAR: &str = "YTDLP_UPDATED";

const CHANGE_MARKERS: [&str; 3] = [
    "Updated yt-dlp to",
    "Successfully installed",
    "Successfully upgraded",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl UpdateCommand {
    /// The configured update command, or `<yt-dlp> -U`.
    pub fn from_settings(settings: &Settings, ytdlp: &Path) -> Result<Self, TubeGrabError> {
        match settings.update_command.as_deref() {
            Some([program, args @ ..]) => Ok(Self {
                program: program.clone(),
                args: args.to_vec(),
            }),
            Some([]) => Err(TubeGrabError::Update {
                reason: "update_command is empty".to_string(),
            }),
            None => Ok(Self {
                program: ytdlp.to_string_lossy().into_owned(),
                args: vec!["-U".to_string()],
            }),
        }
    }
}

/// True when the environment marks yt-dlp as already updated.
pub fn already_updated() -> bool {
    is_update_guard(std::env::var(UPDATED_ENV_VAR).ok().as_deref())
}

fn is_update_guard(value: Option<&str>) -> bool {
    value == Some("1")
}

pub fn output_indicates_change(stdout: &str, stderr: &str) -> bool {
    CHANGE_MARKERS
        .iter()
        .any(|marker| stdout.contains(marker) || stderr.contains(marker))
}

/// Runs the update command and reports whether the installed version changed.
///
/// The caller decides what a change means for the current run.
pub async fn check_for_update(command: &UpdateCommand) -> Result<bool, TubeGrabError> {
    tracing::debug!(program = %command.program, args = ?command.args, "Running update command");

    let output = Command::new(&command.program)
        .args(&command.args)
        .output()
        .await
        .map_err(|e| TubeGrabError::Update {
            reason: format!("failed to run {}: {}", command.program, e),
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    if !output.status.success() {
        tracing::debug!(%stderr, "Update command failed");
        return Err(TubeGrabError::Update {
            reason: format!("{} exited with {}", command.program, output.status),
        });
    }

    Ok(output_indicates_change(&stdout, &stderr))
}

/// Startup update step: skipped when `already_updated`, never fatal.
///
/// Returns whether yt-dlp changed. Each download spawns a fresh yt-dlp process,
/// so a changed version is picked up without restarting tubegrab; the caller
/// marks those processes with [`UPDATED_ENV_VAR`].
pub async fn run_auto_update(command: &UpdateCommand, already_updated: bool) -> bool {
    if already_updated {
        tracing::debug!("{} is set, skipping update check", UPDATED_ENV_VAR);
        return false;
    }

    println!("[*] Checking for yt-dlp updates…");
    match check_for_update(command).await {
        Ok(true) => {
            println!("[*] yt-dlp updated. The new version is used for this run.");
            true
        }
        Ok(false) => {
            tracing::info!("yt-dlp is up to date");
            false
        }
        Err(e) => {
            eprintln!("[!] {e} (continuing with current version).");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_markers() {
        assert!(output_indicates_change(
            "Updated yt-dlp to stable@2025.01.01",
            ""
        ));
        assert!(output_indicates_change("", "Successfully installed yt-dlp-2025.1.1"));
        assert!(!output_indicates_change(
            "yt-dlp is up to date (stable@2025.01.01)",
            ""
        ));
    }

    #[test]
    fn test_default_update_command_uses_ytdlp() {
        let command = UpdateCommand::from_settings(&Settings::default(), Path::new("/usr/bin/yt-dlp"))
            .expect("default command");
        assert_eq!(command.program, "/usr/bin/yt-dlp");
        assert_eq!(command.args, vec!["-U".to_string()]);
    }

    #[test]
    fn test_configured_update_command() {
        let settings = Settings {
            update_command: Some(vec![
                "python3".to_string(),
                "-m".to_string(),
                "pip".to_string(),
                "install".to_string(),
                "-U".to_string(),
                "yt-dlp".to_string(),
            ]),
            ..Settings::default()
        };
        let command = UpdateCommand::from_settings(&settings, Path::new("yt-dlp")).expect("command");
        assert_eq!(command.program, "python3");
        assert_eq!(command.args.len(), 5);

        let empty = Settings {
            update_command: Some(vec![]),
            ..Settings::default()
        };
        assert!(UpdateCommand::from_settings(&empty, Path::new("yt-dlp")).is_err());
    }

    #[tokio::test]
    async fn test_missing_update_program_is_reported() {
        let command = UpdateCommand {
            program: "nonexistent-tubegrab-updater-xyz".to_string(),
            args: vec![],
        };
        assert!(matches!(
            check_for_update(&command).await,
            Err(TubeGrabError::Update { .. })
        ));
    }

    #[test]
    fn test_update_guard_value() {
        assert!(is_update_guard(Some("1")));
        assert!(!is_update_guard(Some("0")));
        assert!(!is_update_guard(Some("")));
        assert!(!is_update_guard(None));
    }

    #[cfg(unix)]
    fn announcing_update() -> UpdateCommand {
        UpdateCommand {
            program: "sh".to_string(),
            args: vec![
                "-c".to_string(),
                "echo 'Updated yt-dlp to stable@2025.01.01'".to_string(),
            ],
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_guard_skips_update_command() {
        assert!(!run_auto_update(&announcing_update(), true).await);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_reported_change_without_guard() {
        assert!(run_auto_update(&announcing_update(), false).await);
    }

    #[tokio::test]
    async fn test_failed_update_is_not_fatal() {
        let command = UpdateCommand {
            program: "nonexistent-tubegrab-updater-xyz".to_string(),
            args: vec![],
        };
        assert!(!run_auto_update(&command, false).await);
    }
}
