//! Reading the tail of the newest log file.

use std::{
    collections::VecDeque,
    fs,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use thiserror::Error;

pub const DEFAULT_LIMIT: i64 = 100;
pub const MAX_LIMIT: usize = 1000;

#[derive(Debug, Error)]
pub enum LogTailError {
    #[error("failed to list log directory {path}: {source}")]
    ListDir { path: PathBuf, source: io::Error },

    #[error("failed to read log file {path}: {source}")]
    ReadFile { path: PathBuf, source: io::Error },
}

/// Last lines of one log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTail {
    pub file: String,
    pub lines: Vec<String>,
}

/// Clamp a requested line count into `[1, MAX_LIMIT]`.
pub fn clamp_limit(limit: i64) -> usize {
    limit.clamp(1, MAX_LIMIT as i64) as usize
}

/// The most recently modified regular file in `dir`, if any.
/// A missing directory is treated as empty.
pub fn latest_log_file(dir: &Path) -> Result<Option<PathBuf>, LogTailError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(LogTailError::ListDir {
                path: dir.to_path_buf(),
                source,
            })
        }
    };

    let newest = entries
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let metadata = entry.metadata().ok()?;
            if !metadata.is_file() {
                return None;
            }
            Some((metadata.modified().ok()?, entry.path()))
        })
        .max_by(|(a, a_path), (b, b_path)| a.cmp(b).then_with(|| a_path.cmp(b_path)))
        .map(|(_, path)| path);
    Ok(newest)
}

/// Read the last `limit` lines of `path`, oldest first.
pub fn tail_file(path: &Path, limit: usize) -> Result<Vec<String>, LogTailError> {
    let read_err = |source| LogTailError::ReadFile {
        path: path.to_path_buf(),
        source,
    };
    let file = fs::File::open(path).map_err(read_err)?;

    let mut lines = VecDeque::with_capacity(limit.min(MAX_LIMIT));
    for line in BufReader::new(file).lines() {
        if lines.len() == limit {
            lines.pop_front();
        }
        lines.push_back(line.map_err(read_err)?);
    }
    Ok(lines.into())
}

/// Tail of the newest file in `dir`, or `None` when there is no log file.
pub fn tail_latest(dir: &Path, limit: usize) -> Result<Option<LogTail>, LogTailError> {
    let Some(path) = latest_log_file(dir)? else {
        return Ok(None);
    };
    let lines = tail_file(&path, limit)?;
    let file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Some(LogTail { file, lines }))
}
