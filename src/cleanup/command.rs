//! Placeholder expansion and shell execution of cleanup commands.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{CleanupError, Result};
use crate::item::FileItem;

/// Directory `%t` expands to.
///
/// Follows the freedesktop.org trash layout under the user's data directory.
pub fn trash_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".local").join("share")))
        .unwrap_or_else(std::env::temp_dir)
        .join("Trash")
        .join("files")
}

/// Quote `s` for `/bin/sh`.
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

/// Expand `%p` (path), `%n` (name), `%t` (trash directory) and `%%`.
///
/// Unknown placeholders are kept literally.
pub fn expand(command: &str, item: &FileItem) -> String {
    let mut out = String::with_capacity(command.len());
    let mut chars = command.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        match chars.peek() {
            Some('p') => {
                out.push_str(&shell_quote(&item.path.to_string_lossy()));
                chars.next();
            }
            Some('n') => {
                out.push_str(&shell_quote(&item.name));
                chars.next();
            }
            Some('t') => {
                out.push_str(&shell_quote(&trash_dir().to_string_lossy()));
                chars.next();
            }
            Some('%') => {
                out.push('%');
                chars.next();
            }
            _ => out.push('%'),
        }
    }

    out
}

/// Run an already expanded command through `/bin/sh -c` in `dir`.
pub fn run(command: &str, dir: &Path) -> Result<()> {
    tracing::debug!(command, dir = %dir.display(), "Running cleanup command");

    let output = Command::new("/bin/sh")
        .arg("-c")
        .arg(command)
        .current_dir(dir)
        .output()
        .map_err(|source| CleanupError::Spawn {
            command: command.to_string(),
            source,
        })?;

    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        tracing::warn!(command, code = ?output.status.code(), "Cleanup command failed");
        Err(CleanupError::CommandFailed {
            command: command.to_string(),
            dir: dir.to_path_buf(),
            code: output.status.code(),
            stderr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(path: &str) -> FileItem {
        FileItem {
            path: PathBuf::from(path),
            name: Path::new(path)
                .file_name()
                .unwrap()
                .to_string_lossy()
                .into_owned(),
            is_dir: true,
            is_dot_entry: false,
            is_local: true,
        }
    }

    #[test]
    fn test_expand_path_and_name() {
        let expanded = expand("tar cjf %n.tar.bz2 %n && ls %p", &item("/data/photos"));
        assert_eq!(
            expanded,
            "tar cjf 'photos'.tar.bz2 'photos' && ls '/data/photos'"
        );
    }

    #[test]
    fn test_expand_quotes_single_quotes() {
        let expanded = expand("rm -rf %p", &item("/tmp/it's here"));
        assert_eq!(expanded, r"rm -rf '/tmp/it'\''s here'");
    }

    #[test]
    fn test_expand_percent_escape_and_unknown() {
        let expanded = expand("echo 100%% %x", &item("/a"));
        assert_eq!(expanded, "echo 100% %x");
    }

    #[test]
    fn test_expand_trailing_percent() {
        assert_eq!(expand("echo %", &item("/a")), "echo %");
    }

    #[test]
    fn test_expand_trash() {
        let expanded = expand("mv %p %t", &item("/a"));
        assert!(expanded.contains("Trash"));
    }

    #[test]
    fn test_trash_dir_is_absolute() {
        let dir = trash_dir();
        assert!(dir.is_absolute());
        assert!(dir.ends_with("Trash/files"));
    }

    #[test]
    fn test_run_success() {
        let tmp = tempfile::TempDir::new().unwrap();
        run("touch marker", tmp.path()).unwrap();
        assert!(tmp.path().join("marker").exists());
    }

    #[test]
    fn test_run_failure_reports_code() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = run("echo oops >&2; exit 3", tmp.path()).unwrap_err();

        match err {
            CleanupError::CommandFailed { code, stderr, .. } => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "oops");
            }
            other => panic!("Expected CommandFailed, got {:?}", other),
        }
    }
}
