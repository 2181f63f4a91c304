use crate::config::Settings;
use crate::media::{MediaSelection, OutputDirs};
use crate::progress::CountPolicy;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShutdownOptions {
    pub hard_exit: bool,
    pub debug_threads: bool,
}

#[derive(Debug, Clone)]
pub struct RunParams {
    pub settings: Settings,
    pub urls: Vec<String>,
    pub selection: MediaSelection,
    pub dirs: OutputDirs,
    pub allow_playlists: bool,
    pub auto_update: bool,
    pub count_policy: CountPolicy,
    pub shutdown: ShutdownOptions,
}
