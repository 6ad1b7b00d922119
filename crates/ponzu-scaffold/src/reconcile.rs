//! Copying user content into the vendored framework tree before a build

use crate::error::{Error, Result};
use colored::Colorize;
use std::path::Path;
use tokio::fs;

/// Outcome of one reconciliation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    Success,
    /// User files whose names are reserved by the framework, in directory order
    Conflict(Vec<String>),
}

impl Reconciliation {
    pub fn is_success(&self) -> bool {
        matches!(self, Reconciliation::Success)
    }
}

/// Copy every file in `user_dir` (one level, no recursion) into `vendored_dir`, overwriting
/// existing files. Files named in `protected` are never copied; all of them are collected and
/// returned as a conflict.
pub async fn reconcile(
    user_dir: &Path,
    vendored_dir: &Path,
    protected: &[&str],
) -> Result<Reconciliation> {
    let mut entries = fs::read_dir(user_dir)
        .await
        .map_err(|e| Error::fs("read", user_dir, e))?;

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| Error::fs("read", user_dir, e))?
    {
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| Error::fs("read", entry.path(), e))?;
        if file_type.is_dir() {
            tracing::debug!(path = %entry.path().display(), "skipping subdirectory");
            continue;
        }
        files.push(entry.file_name());
    }
    files.sort();

    let mut conflicts = Vec::new();
    for name in files {
        let name_str = name.to_string_lossy();
        if protected.iter().any(|p| *p == name_str) {
            conflicts.push(name_str.into_owned());
            continue;
        }

        let from = user_dir.join(&name);
        let to = vendored_dir.join(&name);
        fs::copy(&from, &to)
            .await
            .map_err(|e| Error::fs("copy", &from, e))?;
        tracing::debug!(file = %name_str, "copied user file");
    }

    if conflicts.is_empty() {
        Ok(Reconciliation::Success)
    } else {
        Ok(Reconciliation::Conflict(conflicts))
    }
}

/// Print the conflict report and the way out of it
pub fn report_conflicts(files: &[String], retry_command: &str) {
    eprintln!("{}", "Ponzu couldn't fully build your project:".red().bold());
    eprintln!("Some of your files in the content directory exist in the vendored directory.");
    eprintln!("You must rename the following files, as they conflict with Ponzu core:");
    for file in files {
        eprintln!("  {} {}", "->".blue(), file);
    }
    eprintln!(
        "Once the files above have been renamed, run '{}' to retry.",
        retry_command
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::PROTECTED_FILES;
    use tempfile::TempDir;

    fn dirs() -> (TempDir, std::path::PathBuf, std::path::PathBuf) {
        let tmp = TempDir::new().unwrap();
        let user = tmp.path().join("content");
        let vendored = tmp.path().join("vendor/content");
        std::fs::create_dir_all(&user).unwrap();
        std::fs::create_dir_all(&vendored).unwrap();
        (tmp, user, vendored)
    }

    #[tokio::test]
    async fn test_conflicting_file_is_reported_and_not_copied() {
        let (_tmp, user, vendored) = dirs();
        std::fs::write(user.join("foo.txt"), "foo").unwrap();
        std::fs::write(user.join("item.go"), "package content // user").unwrap();

        let result = reconcile(&user, &vendored, PROTECTED_FILES).await.unwrap();

        assert_eq!(result, Reconciliation::Conflict(vec!["item.go".to_string()]));
        assert_eq!(std::fs::read_to_string(vendored.join("foo.txt")).unwrap(), "foo");
        assert!(!vendored.join("item.go").exists());
    }

    #[tokio::test]
    async fn test_all_conflicts_collected() {
        let (_tmp, user, vendored) = dirs();
        std::fs::write(user.join("types.go"), "user types").unwrap();
        std::fs::write(user.join("item.go"), "user item").unwrap();
        std::fs::write(user.join("vendored.txt"), "framework").unwrap();
        std::fs::write(vendored.join("item.go"), "framework item").unwrap();

        let result = reconcile(&user, &vendored, PROTECTED_FILES).await.unwrap();

        assert_eq!(
            result,
            Reconciliation::Conflict(vec!["item.go".to_string(), "types.go".to_string()])
        );
        assert_eq!(
            std::fs::read_to_string(vendored.join("item.go")).unwrap(),
            "framework item"
        );
        assert!(!vendored.join("types.go").exists());
    }

    #[tokio::test]
    async fn test_reconcile_is_idempotent() {
        let (_tmp, user, vendored) = dirs();
        std::fs::write(user.join("song.go"), "package content // song").unwrap();
        std::fs::write(user.join("review.go"), "package content // review").unwrap();

        let first = reconcile(&user, &vendored, PROTECTED_FILES).await.unwrap();
        let after_first = std::fs::read_to_string(vendored.join("song.go")).unwrap();
        let second = reconcile(&user, &vendored, PROTECTED_FILES).await.unwrap();
        let after_second = std::fs::read_to_string(vendored.join("song.go")).unwrap();

        assert!(first.is_success());
        assert!(second.is_success());
        assert_eq!(after_first, after_second);
        assert_eq!(
            std::fs::read_to_string(vendored.join("review.go")).unwrap(),
            "package content // review"
        );
    }

    #[tokio::test]
    async fn test_existing_destination_is_overwritten() {
        let (_tmp, user, vendored) = dirs();
        std::fs::write(vendored.join("song.go"), "old").unwrap();
        std::fs::write(user.join("song.go"), "new").unwrap();

        let result = reconcile(&user, &vendored, PROTECTED_FILES).await.unwrap();

        assert!(result.is_success());
        assert_eq!(std::fs::read_to_string(vendored.join("song.go")).unwrap(), "new");
    }

    #[tokio::test]
    async fn test_subdirectories_are_not_descended() {
        let (_tmp, user, vendored) = dirs();
        std::fs::create_dir_all(user.join("nested")).unwrap();
        std::fs::write(user.join("nested/item.go"), "deep").unwrap();

        let result = reconcile(&user, &vendored, PROTECTED_FILES).await.unwrap();

        assert!(result.is_success());
        assert!(!vendored.join("nested").exists());
    }

    #[tokio::test]
    async fn test_missing_user_dir_is_a_filesystem_error() {
        let (tmp, _user, vendored) = dirs();
        let err = reconcile(&tmp.path().join("nope"), &vendored, PROTECTED_FILES)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Filesystem { .. }));
    }
}
