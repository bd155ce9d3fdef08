//! Tracing subscriber setup: stdout always, plus a per-run file when a log
//! directory is configured. The file is what `/status/logs` tails.

use std::{
    fs::{self, File},
    io,
    path::{Path, PathBuf},
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_FILE_PREFIX: &str = "deck-proxy";

/// Name of the log file for a run started at `started`.
pub fn log_file_name(started: SystemTime) -> String {
    let secs = started
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    format!("{LOG_FILE_PREFIX}-{secs}.log")
}

fn open_log_file(dir: &Path) -> io::Result<(PathBuf, File)> {
    fs::create_dir_all(dir)?;
    let path = dir.join(log_file_name(SystemTime::now()));
    let file = File::options().create(true).append(true).open(&path)?;
    Ok((path, file))
}

/// Install the global subscriber. `RUST_LOG` overrides the `info` default.
/// Returns the path of the log file, if one was opened.
pub fn init(log_dir: Option<&Path>) -> io::Result<Option<PathBuf>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (path, file_layer) = match log_dir {
        Some(dir) => {
            let (path, file) = open_log_file(dir)?;
            let layer = fmt::layer().with_ansi(false).with_writer(Arc::new(file));
            (Some(path), Some(layer))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();
    Ok(path)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn file_name_uses_unix_seconds() {
        let started = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        assert_eq!(log_file_name(started), "deck-proxy-1700000000.log");
    }

    #[test]
    fn opens_file_inside_new_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        let (path, _file) = open_log_file(&nested).unwrap();
        assert!(path.starts_with(&nested));
        assert!(path.exists());
    }
}
