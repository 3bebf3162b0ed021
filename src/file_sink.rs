// file_sink.rs
// Purpose: Append fully formatted lines to a log file, one write per call

use crate::errors::{LogError, LogResult};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Picks the file a line goes to. An absent or empty override falls back to `default`.
pub fn resolve_path(requested: Option<&Path>, default: &Path) -> PathBuf {
    match requested {
        Some(path) if !path.as_os_str().is_empty() => path.to_path_buf(),
        _ => default.to_path_buf(),
    }
}

/// Appends `line` plus a newline to `path`, creating the file if needed.
///
/// The line goes out in a single `write_all` on an append-mode handle, so concurrent
/// writers get whatever atomicity the platform gives append writes. The handle is
/// dropped on every return path. Parent directories are not created.
pub fn append(path: &Path, line: &str) -> LogResult<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LogError::io("opening log file", path, e))?;

    let mut buf = String::with_capacity(line.len() + 1);
    buf.push_str(line);
    buf.push('\n');

    file.write_all(buf.as_bytes())
        .map_err(|e| LogError::io("writing log line", path, e))?;
    file.flush()
        .map_err(|e| LogError::io("flushing log file", path, e))?;

    tracing::trace!(target: "relaylog", path = %path.display(), bytes = buf.len(), "appended log line");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_override_uses_default() {
        let default = Path::new("./log.log");
        assert_eq!(resolve_path(None, default), PathBuf::from("./log.log"));
        assert_eq!(resolve_path(Some(Path::new("")), default), PathBuf::from("./log.log"));
        assert_eq!(
            resolve_path(Some(Path::new("/tmp/other.log")), default),
            PathBuf::from("/tmp/other.log")
        );
    }

    #[test]
    fn appends_without_truncating() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("app.log");

        append(&path, "first").unwrap();
        append(&path, "second").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("missing").join("app.log");

        let err = append(&path, "line").unwrap_err();
        match err {
            LogError::Io { operation, path: failed, .. } => {
                assert_eq!(operation, "opening log file");
                assert_eq!(failed, path);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!path.exists());
    }

    #[test]
    fn concurrent_appends_do_not_interleave() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("shared.log");

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let path = path.clone();
                std::thread::spawn(move || {
                    for n in 0..50 {
                        append(&path, &format!("worker-{worker}-line-{n}")).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 400);
        assert!(lines.iter().all(|l| l.starts_with("worker-") && l.contains("-line-")));
    }
}
