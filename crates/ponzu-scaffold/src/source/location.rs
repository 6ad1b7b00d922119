//! Source locations and per-mode clone plans

use crate::error::{Error, Result};
use crate::framework::FrameworkConfig;
use crate::workspace::Workspace;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

/// Repository identity (e.g. `github.com/bosssauce/ponzu`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoIdentity {
    pub host: &'static str,
    pub owner: &'static str,
    pub name: &'static str,
}

impl RepoIdentity {
    pub const fn new(host: &'static str, owner: &'static str, name: &'static str) -> Self {
        Self { host, owner, name }
    }

    /// `<host>/<owner>/<name>` as a relative path
    pub fn path(&self) -> PathBuf {
        [self.host, self.owner, self.name].iter().collect()
    }

    /// Checkout location inside the workspace source tree
    pub fn local(&self, workspace: &Workspace) -> SourceLocation {
        SourceLocation::Local(workspace.src_dir().join(self.path()))
    }

    /// `https://<host>/<owner>/<name>.git`
    pub fn remote(&self) -> Result<SourceLocation> {
        let url = format!("https://{}/{}/{}.git", self.host, self.owner, self.name);
        Url::parse(&url)
            .map(SourceLocation::Remote)
            .map_err(|source| Error::InvalidRemote { url, source })
    }
}

impl fmt::Display for RepoIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.host, self.owner, self.name)
    }
}

/// Where framework source can be cloned from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Local(PathBuf),
    Remote(Url),
}

impl SourceLocation {
    /// Argument handed to `git clone`
    fn as_clone_arg(&self) -> OsString {
        match self {
            SourceLocation::Local(path) => path.as_os_str().to_owned(),
            SourceLocation::Remote(url) => url.as_str().into(),
        }
    }

    /// Long form used in error messages
    pub fn describe(&self) -> String {
        match self {
            SourceLocation::Local(path) => format!("local machine [{}]", path.display()),
            SourceLocation::Remote(url) => format!("the network [{}]", url),
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, SourceLocation::Local(_))
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLocation::Local(path) => write!(f, "{}", path.display()),
            SourceLocation::Remote(url) => write!(f, "{}", url),
        }
    }
}

/// Options recognized by the bootstrap operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Clone the development branch instead of the default branch
    pub dev: bool,
    /// Workspace-relative checkout used instead of the canonical one. Only read when `dev` is set.
    pub fork: String,
}

/// One `git clone` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneAttempt {
    pub location: SourceLocation,
    pub branch: Option<String>,
    pub single_branch: bool,
}

impl CloneAttempt {
    /// Plain clone of the default branch
    pub fn default_branch(location: SourceLocation) -> Self {
        Self {
            location,
            branch: None,
            single_branch: false,
        }
    }

    /// Arguments for `git`, in the order `clone <source> [--branch b --single-branch] <dest>`
    pub fn git_args(&self, destination: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["clone".into(), self.location.as_clone_arg()];
        if let Some(branch) = &self.branch {
            args.push("--branch".into());
            args.push(branch.into());
        }
        if self.single_branch {
            args.push("--single-branch".into());
        }
        args.push(destination.as_os_str().to_owned());
        args
    }
}

/// Ordered clone attempts for one fetch.
///
/// Normal mode tries the local checkout and then the network. Development mode makes a
/// single attempt against the local (or fork) checkout and has no network fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPlan {
    pub attempts: Vec<CloneAttempt>,
    /// Remove the `.git` directory from the destination after a successful clone
    pub strip_git_metadata: bool,
}

impl FetchPlan {
    /// Try `primary`, then `fallback`
    pub fn with_fallback(primary: SourceLocation, fallback: SourceLocation) -> Self {
        Self {
            attempts: vec![
                CloneAttempt::default_branch(primary),
                CloneAttempt::default_branch(fallback),
            ],
            strip_git_metadata: true,
        }
    }

    /// Single-branch clone of `branch` from `location`, no fallback
    pub fn development(location: SourceLocation, branch: &str) -> Self {
        Self {
            attempts: vec![CloneAttempt {
                location,
                branch: Some(branch.to_string()),
                single_branch: true,
            }],
            strip_git_metadata: false,
        }
    }

    /// Select the plan for the given options.
    ///
    /// A fork is resolved like a project path: re-rooted under `<root>/src`, `..` rejected.
    pub fn for_options<F: FrameworkConfig>(
        workspace: &Workspace,
        framework: &F,
        options: &BuildOptions,
    ) -> Result<Self> {
        let repo = framework.repo();
        if options.dev {
            let local = if options.fork.is_empty() {
                repo.local(workspace)
            } else {
                SourceLocation::Local(workspace.resolve(&options.fork)?)
            };
            Ok(Self::development(local, framework.dev_branch()))
        } else {
            Ok(Self::with_fallback(repo.local(workspace), repo.remote()?))
        }
    }
}
