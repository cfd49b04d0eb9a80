//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "gridkit";
const APPLICATION: &str = "gridkit-replay";

const LATEST_LOG: &str = "latest.log";

/// Maximum number of archived log files to keep.
const MAX_OLD_LOGS: usize = 10;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Directory for log files.
///
/// - Linux: `$XDG_CACHE_HOME/gridkit-replay` or `~/.cache/gridkit-replay`
/// - macOS: `~/Library/Caches/dev.gridkit.gridkit-replay`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Directory holding `config.json`.
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Default config file location.
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.json"))
}

/// Path to the log file of the current run.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LATEST_LOG))
}

/// Create (or truncate) the log file at `path`, making its directory first.
pub fn create_log_file(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    File::create(path)
}

/// Archive the previous run's log and prune old archives.
///
/// Call before creating the new log file.
pub fn rotate_logs() {
    if let Some(cache) = cache_dir() {
        rotate_logs_in(&cache);
    }
}

/// Rename `latest.log` in `dir` to a timestamped name, keeping at most
/// `MAX_OLD_LOGS` archives.
pub fn rotate_logs_in(dir: &Path) {
    let latest = dir.join(LATEST_LOG);
    if latest.exists() {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S%.3f");
        let _ = fs::rename(&latest, dir.join(format!("{timestamp}.log")));
    }
    prune_archives(dir);
}

fn prune_archives(dir: &Path) {
    let Ok(entries) = fs::read_dir(dir) else { return };

    let mut archives: Vec<_> = entries
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            name.ends_with(".log") && name != LATEST_LOG
        })
        .collect();

    // Oldest first; names are timestamps so they break modification-time ties.
    archives.sort_by_key(|e| (e.metadata().and_then(|m| m.modified()).ok(), e.file_name()));

    let excess = archives.len().saturating_sub(MAX_OLD_LOGS);
    for entry in archives.iter().take(excess) {
        let _ = fs::remove_file(entry.path());
    }
}
