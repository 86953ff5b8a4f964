//! Small helpers for logging and the filesystem.

use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Truncate a string for logging purposes.
///
/// Strings longer than `max` characters are cut at a character boundary and
/// an ellipsis is appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(60), 10), "aaaaaaaaaa…");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…", &s[..cut]),
    }
}

/// Ensure `output` can be written as a file and its directory is writable.
///
/// Rejects an output path that is an existing directory, creates the parent
/// directory if needed, then writes and removes a probe file, so a bad output
/// path is caught before any source is fetched.
#[instrument(level = "info", skip_all, fields(output = %output.display()))]
pub async fn ensure_writable_parent(output: &Path) -> Result<(), Box<dyn Error>> {
    if fs::metadata(output).await.is_ok_and(|m| m.is_dir()) {
        return Err(format!("output path {} is a directory", output.display()).into());
    }

    let dir = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).await?;

    let probe_path = dir.join("..__probe_write__");
    stdfs::File::create(&probe_path)?;
    let _ = stdfs::remove_file(&probe_path);
    info!(dir = %dir.display(), "Output directory is writable");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("fetch error", 50), "fetch error");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(80);
        let result = truncate_for_log(&s, 50);
        assert_eq!(result, format!("{}…", "a".repeat(50)));
    }

    #[test]
    fn test_truncate_for_log_multibyte() {
        assert_eq!(truncate_for_log("ÅÅÅÅ", 2), "ÅÅ…");
    }

    #[tokio::test]
    async fn test_ensure_writable_parent_creates_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let output = tmp.path().join("nested/deeper/cameras.json");
        ensure_writable_parent(&output).await.unwrap();
        assert!(tmp.path().join("nested/deeper").is_dir());
        assert!(!tmp.path().join("nested/deeper/..__probe_write__").exists());
    }

    #[tokio::test]
    async fn test_ensure_writable_parent_rejects_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let err = ensure_writable_parent(tmp.path()).await.unwrap_err();
        assert!(err.to_string().contains("is a directory"));
    }

    #[tokio::test]
    async fn test_ensure_writable_parent_bare_filename() {
        ensure_writable_parent(Path::new("cameras.json")).await.unwrap();
    }
}
