//! Project path resolution and overwrite confirmation

use crate::error::{Error, Result};
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::{Component, Path, PathBuf};

/// Environment variable holding the workspace root
pub const WORKSPACE_ROOT_ENV: &str = "GOPATH";

/// Question shown before an existing project path is destroyed
pub const OVERWRITE_PROMPT: &str = "Path exists, overwrite contents? (y/N):";

/// Workspace every project path is resolved against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Create a workspace rooted at `root`. An empty root is a configuration error.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if root.as_os_str().is_empty() {
            return Err(Error::MissingWorkspaceRoot(WORKSPACE_ROOT_ENV));
        }
        Ok(Self { root })
    }

    /// Create a workspace from the root named by `var`
    pub fn from_env(var: &'static str) -> Result<Self> {
        let root = std::env::var_os(var).unwrap_or_default();
        Self::new(root).map_err(|_| Error::MissingWorkspaceRoot(var))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/src`
    pub fn src_dir(&self) -> PathBuf {
        self.root.join("src")
    }

    /// Resolve a project path under `<root>/src`.
    ///
    /// Absolute inputs are re-rooted inside the workspace rather than used as-is. The result
    /// is always strictly below `<root>/src`: paths with `..` or without any named component
    /// (`""`, `"."`, `"/"`) are rejected.
    pub fn resolve(&self, relative: impl AsRef<Path>) -> Result<PathBuf> {
        let relative = relative.as_ref();
        let mut resolved = self.src_dir();
        let mut named = 0;
        for component in relative.components() {
            match component {
                Component::Normal(part) => {
                    resolved.push(part);
                    named += 1;
                }
                Component::ParentDir => {
                    return Err(Error::InvalidProjectPath(relative.to_path_buf()))
                }
                Component::RootDir | Component::Prefix(_) | Component::CurDir => {}
            }
        }
        if named == 0 {
            return Err(Error::InvalidProjectPath(relative.to_path_buf()));
        }
        Ok(resolved)
    }
}

/// Outcome of the overwrite check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Nothing exists at the path
    Proceed,
    /// Leave the existing path alone
    Abort,
    /// Destroy the existing path, then proceed
    Overwrite,
}

/// Parsed answer to the overwrite prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    Unrecognized(String),
}

impl Answer {
    /// Case-insensitive; empty input (including a bare newline) means no
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed.to_lowercase().as_str() {
            "y" | "yes" => Answer::Yes,
            "n" | "no" | "" => Answer::No,
            _ => Answer::Unrecognized(trimmed.to_string()),
        }
    }
}

/// Source of answers for confirmation prompts
pub trait Confirm {
    /// Show `question` and return the raw line entered
    fn ask(&mut self, question: &str) -> io::Result<String>;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> io::Result<String>,
{
    fn ask(&mut self, question: &str) -> io::Result<String> {
        self(question)
    }
}

/// Reads answers from standard input
#[derive(Debug, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        println!("{}", question);
        io::stdout().flush()?;
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line)
    }
}

/// Decide what to do with `path` before a project is created there
pub fn check_overwrite<C: Confirm + ?Sized>(path: &Path, confirm: &mut C) -> Result<Decision> {
    if !path.exists() {
        return Ok(Decision::Proceed);
    }

    let input = confirm.ask(OVERWRITE_PROMPT).map_err(Error::Prompt)?;
    match Answer::parse(&input) {
        Answer::Yes => Ok(Decision::Overwrite),
        Answer::No => Ok(Decision::Abort),
        Answer::Unrecognized(answer) => {
            tracing::debug!(%answer, "unrecognized overwrite answer");
            eprintln!(
                "{} Input not recognized. No files overwritten. Answer as 'y' or 'n' only.",
                "Warning:".yellow()
            );
            Ok(Decision::Abort)
        }
    }
}

/// Remove everything at `path`
pub async fn destroy(path: &Path) -> Result<()> {
    tracing::info!(path = %path.display(), "removing existing project path");
    let metadata = tokio::fs::symlink_metadata(path)
        .await
        .map_err(|e| Error::fs("overwrite", path, e))?;
    let removed = if metadata.is_dir() {
        tokio::fs::remove_dir_all(path).await
    } else {
        tokio::fs::remove_file(path).await
    };
    removed.map_err(|e| Error::fs("overwrite", path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn answering(answer: &'static str) -> impl FnMut(&str) -> io::Result<String> {
        move |_question: &str| Ok(answer.to_string())
    }

    #[test]
    fn test_resolve_joins_workspace_src() {
        let ws = Workspace::new("/go").unwrap();
        assert_eq!(
            ws.resolve("github.com/me/site").unwrap(),
            PathBuf::from("/go/src/github.com/me/site")
        );
    }

    #[test]
    fn test_resolve_reroots_absolute_paths() {
        let ws = Workspace::new("/go").unwrap();
        assert_eq!(
            ws.resolve("/etc/site").unwrap(),
            PathBuf::from("/go/src/etc/site")
        );
    }

    #[test]
    fn test_resolve_rejects_parent_components() {
        let ws = Workspace::new("/go").unwrap();
        assert!(matches!(
            ws.resolve("../outside"),
            Err(Error::InvalidProjectPath(_))
        ));
    }

    #[test]
    fn test_resolve_rejects_workspace_src_itself() {
        let ws = Workspace::new("/go").unwrap();
        for input in ["", ".", "/", "./", "/./"] {
            assert!(
                matches!(ws.resolve(input), Err(Error::InvalidProjectPath(_))),
                "{:?}",
                input
            );
        }
    }

    #[test]
    fn test_from_env_rejects_empty_root() {
        std::env::set_var("PONZU_TEST_EMPTY_ROOT", "");
        assert!(matches!(
            Workspace::from_env("PONZU_TEST_EMPTY_ROOT"),
            Err(Error::MissingWorkspaceRoot("PONZU_TEST_EMPTY_ROOT"))
        ));
        assert!(matches!(
            Workspace::from_env("PONZU_TEST_UNSET_ROOT"),
            Err(Error::MissingWorkspaceRoot("PONZU_TEST_UNSET_ROOT"))
        ));
    }

    #[test]
    fn test_empty_root_is_rejected() {
        assert!(matches!(
            Workspace::new(""),
            Err(Error::MissingWorkspaceRoot(_))
        ));
    }

    #[test]
    fn test_answer_parsing() {
        for yes in ["y", "Y", "yes", "YES", "Yes\n"] {
            assert_eq!(Answer::parse(yes), Answer::Yes, "{:?}", yes);
        }
        for no in ["n", "no", "NO", "", "\n", "\r\n"] {
            assert_eq!(Answer::parse(no), Answer::No, "{:?}", no);
        }
        assert_eq!(
            Answer::parse("maybe\n"),
            Answer::Unrecognized("maybe".to_string())
        );
    }

    #[test]
    fn test_missing_path_proceeds_without_prompt() {
        let tmp = TempDir::new().unwrap();
        let mut confirm = |_: &str| -> io::Result<String> { panic!("should not prompt") };
        let decision = check_overwrite(&tmp.path().join("missing"), &mut confirm).unwrap();
        assert_eq!(decision, Decision::Proceed);
    }

    #[test]
    fn test_existing_path_decisions() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("file.txt"), "keep").unwrap();

        for input in ["n", "no", "", "\n"] {
            let decision = check_overwrite(tmp.path(), &mut answering(input)).unwrap();
            assert_eq!(decision, Decision::Abort, "{:?}", input);
        }
        for input in ["y", "yes", "Y", "YES"] {
            let decision = check_overwrite(tmp.path(), &mut answering(input)).unwrap();
            assert_eq!(decision, Decision::Overwrite, "{:?}", input);
        }
        let decision = check_overwrite(tmp.path(), &mut answering("sure")).unwrap();
        assert_eq!(decision, Decision::Abort);

        // The check itself never touches the path
        assert!(tmp.path().join("file.txt").exists());
    }

    #[tokio::test]
    async fn test_destroy_removes_tree() {
        let tmp = TempDir::new().unwrap();
        let project = tmp.path().join("project");
        std::fs::create_dir_all(project.join("a/b")).unwrap();
        std::fs::write(project.join("a/b/c.txt"), "x").unwrap();

        destroy(&project).await.unwrap();
        assert!(!project.exists());
    }

    #[tokio::test]
    async fn test_destroy_missing_path_fails_with_path() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("missing");
        let err = destroy(&missing).await.unwrap_err();
        assert!(err.to_string().contains("missing"));
    }
}
