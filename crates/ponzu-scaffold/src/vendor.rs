//! Relocation of framework-owned subtrees into the vendor tree
//!
//! Vendoring is a sequence of filesystem moves with no atomicity. The first failing step is
//! returned unchanged and nothing is rolled back: a project can be left half-vendored. Use
//! [`inspect`] to see how far it got and [`discard`] to remove the project explicitly.

use crate::error::{Error, Result};
use crate::framework::FrameworkConfig;
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

/// Move the framework subtrees of a freshly cloned project into its vendor tree and create an
/// empty user content directory in their place.
pub async fn vendor<F: FrameworkConfig>(project: &Path, framework: &F) -> Result<PathBuf> {
    let vendor_dir = project.join(framework.vendor_path());
    fs::create_dir_all(&vendor_dir)
        .await
        .map_err(|e| Error::fs("create vendor directory", &vendor_dir, e))?;

    for name in framework.vendor_manifest() {
        let from = project.join(name);
        let to = vendor_dir.join(name);
        tracing::debug!(from = %from.display(), to = %to.display(), "vendoring subtree");
        fs::rename(&from, &to)
            .await
            .map_err(|e| Error::fs("move", &from, e))?;
    }

    let user_dir = project.join(framework.user_content_dir());
    fs::create_dir(&user_dir)
        .await
        .map_err(|e| Error::fs("create user content directory", &user_dir, e))?;

    tracing::info!(vendor = %vendor_dir.display(), "vendored framework packages");
    Ok(vendor_dir)
}

/// Where one manifest subtree currently lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubtreeState {
    /// Still at the project root, not yet moved
    Pending,
    /// Inside the vendor tree, with this many files
    Vendored(usize),
    /// In neither place
    Missing,
}

/// Observable vendoring state of a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorReport {
    pub vendor_dir_exists: bool,
    pub subtrees: Vec<(&'static str, SubtreeState)>,
    pub user_dir_exists: bool,
}

impl VendorReport {
    /// Every step of [`vendor`] has completed
    pub fn is_complete(&self) -> bool {
        self.vendor_dir_exists
            && self.user_dir_exists
            && self
                .subtrees
                .iter()
                .all(|(_, state)| matches!(state, SubtreeState::Vendored(_)))
    }
}

/// Report how far vendoring got for `project`.
///
/// The user content directory shares its name with a vendored subtree; once that subtree has
/// been moved, a directory of the same name at the root is the user directory.
pub fn inspect<F: FrameworkConfig>(project: &Path, framework: &F) -> VendorReport {
    let vendor_dir = project.join(framework.vendor_path());
    let user_name = framework.user_content_dir();

    let subtrees: Vec<_> = framework
        .vendor_manifest()
        .iter()
        .map(|&name| {
            let vendored = vendor_dir.join(name);
            let state = if vendored.is_dir() {
                SubtreeState::Vendored(count_files(&vendored))
            } else if project.join(name).is_dir() {
                SubtreeState::Pending
            } else {
                SubtreeState::Missing
            };
            (name, state)
        })
        .collect();

    let user_moved = subtrees
        .iter()
        .any(|(name, state)| *name == user_name && matches!(state, SubtreeState::Vendored(_)));

    VendorReport {
        vendor_dir_exists: vendor_dir.is_dir(),
        subtrees,
        user_dir_exists: user_moved && project.join(user_name).is_dir(),
    }
}

/// Remove a (possibly half-built) project
pub async fn discard(project: &Path) -> Result<()> {
    tracing::info!(path = %project.display(), "discarding project");
    fs::remove_dir_all(project)
        .await
        .map_err(|e| Error::fs("remove", project, e))
}

fn count_files(dir: &Path) -> usize {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::Ponzu;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    /// Relative path -> contents for every file under `dir`
    fn snapshot(dir: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
        WalkDir::new(dir)
            .into_iter()
            .map(|e| e.unwrap())
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                let rel = e.path().strip_prefix(dir).unwrap().to_path_buf();
                (rel, std::fs::read(e.path()).unwrap())
            })
            .collect()
    }

    fn cloned_project(root: &Path) -> PathBuf {
        let project = root.join("project");
        for (rel, contents) in [
            ("content/item.go", "package content // item"),
            ("content/types.go", "package content // types"),
            ("management/editor/editor.go", "package editor"),
            ("system/db/db.go", "package db"),
            ("cmd/ponzu/main.go", "package main"),
        ] {
            let path = project.join(rel);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, contents).unwrap();
        }
        project
    }

    #[tokio::test]
    async fn test_vendor_moves_manifest_subtrees() {
        let tmp = TempDir::new().unwrap();
        let project = cloned_project(tmp.path());
        let before: Vec<_> = Ponzu
            .vendor_manifest()
            .iter()
            .map(|name| snapshot(&project.join(name)))
            .collect();

        let vendor_dir = vendor(&project, &Ponzu).await.unwrap();

        assert_eq!(
            vendor_dir,
            project.join("cmd/ponzu/vendor/github.com/bosssauce/ponzu")
        );
        for (name, contents) in Ponzu.vendor_manifest().iter().zip(before) {
            assert_eq!(snapshot(&vendor_dir.join(name)), contents, "{}", name);
        }
        assert!(!project.join("management").exists());
        assert!(!project.join("system").exists());
        // Fresh, empty user content directory
        let user_entries = std::fs::read_dir(project.join("content")).unwrap().count();
        assert_eq!(user_entries, 0);
        assert!(inspect(&project, &Ponzu).is_complete());
    }

    #[tokio::test]
    async fn test_vendor_stops_at_first_missing_subtree() {
        let tmp = TempDir::new().unwrap();
        let project = cloned_project(tmp.path());
        std::fs::remove_dir_all(project.join("management")).unwrap();

        let err = vendor(&project, &Ponzu).await.unwrap_err();
        assert!(err.to_string().contains("management"));

        // content was moved, system was not; no rollback
        let report = inspect(&project, &Ponzu);
        assert!(!report.is_complete());
        assert_eq!(report.subtrees[0], ("content", SubtreeState::Vendored(2)));
        assert_eq!(report.subtrees[1], ("management", SubtreeState::Missing));
        assert_eq!(report.subtrees[2], ("system", SubtreeState::Pending));
        assert!(!report.user_dir_exists);
    }

    #[test]
    fn test_inspect_fresh_clone_is_pending() {
        let tmp = TempDir::new().unwrap();
        let project = cloned_project(tmp.path());

        let report = inspect(&project, &Ponzu);

        assert!(!report.vendor_dir_exists);
        assert!(report
            .subtrees
            .iter()
            .all(|(_, state)| *state == SubtreeState::Pending));
        assert!(!report.user_dir_exists);
    }

    #[tokio::test]
    async fn test_discard_removes_project() {
        let tmp = TempDir::new().unwrap();
        let project = cloned_project(tmp.path());

        discard(&project).await.unwrap();
        assert!(!project.exists());
    }
}
