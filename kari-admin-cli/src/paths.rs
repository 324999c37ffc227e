//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "kariajuda";
const APPLICATION: &str = "kari-admin";

/// Number of archived log files kept besides `latest.log`.
const MAX_OLD_LOGS: usize = 25;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Persistent application data.
///
/// - Linux: `$XDG_DATA_HOME/kari-admin` or `~/.local/share/kari-admin`
/// - macOS: `~/Library/Application Support/com.kariajuda.kari-admin`
/// - Windows: `C:\Users\<User>\AppData\Roaming\kariajuda\kari-admin\data`
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Regenerable data; logs go here.
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// The settings database, which also holds the saved session.
pub fn settings_db() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("settings.db"))
}

pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("latest.log"))
}

/// Archives `latest.log` under a timestamped name and prunes old logs.
///
/// Call this at startup before creating the new log file.
pub fn rotate_logs() {
    let Some(cache) = cache_dir() else { return };
    rotate_logs_in(&cache, chrono::Local::now().format("%Y%m%d_%H%M%S").to_string());
}

fn rotate_logs_in(dir: &Path, stamp: String) {
    let latest = dir.join("latest.log");
    if latest.exists() {
        let _ = fs::rename(&latest, dir.join(format!("{}.log", stamp)));
    }
    prune_logs(dir, MAX_OLD_LOGS);
}

/// Removes the oldest archived logs until at most `keep` remain.
fn prune_logs(dir: &Path, keep: usize) {
    let Ok(entries) = fs::read_dir(dir) else { return };

    let mut archived: Vec<_> = entries
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            name.ends_with(".log") && name != "latest.log"
        })
        .collect();

    if archived.len() <= keep {
        return;
    }

    // Archive names are timestamps, so name order is age order.
    archived.sort_by_key(|e| e.file_name());
    let excess = archived.len() - keep;
    for entry in archived.iter().take(excess) {
        let _ = fs::remove_file(entry.path());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_archives_latest_and_prunes() {
        let dir = tempfile::tempdir().unwrap();
        for day in 1..=27 {
            fs::write(dir.path().join(format!("202401{:02}_120000.log", day)), "").unwrap();
        }
        fs::write(dir.path().join("latest.log"), "current").unwrap();

        rotate_logs_in(dir.path(), "20240201_080000".to_string());

        let mut names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();

        assert_eq!(names.len(), MAX_OLD_LOGS);
        assert!(!names.contains(&"latest.log".to_string()));
        assert_eq!(names.last().unwrap(), "20240201_080000.log");
        assert_eq!(names.first().unwrap(), "20240104_120000.log");
    }
}
