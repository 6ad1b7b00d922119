//! Framework configuration trait
//!
//! Describes where the framework source lives and how a project built from it is laid out:
//! which subtrees are vendored, which file names are reserved, and how the toolchain is
//! invoked. [`Ponzu`] is the built-in configuration.

use crate::source::RepoIdentity;
use std::path::{Path, PathBuf};

/// Subtrees owned by the framework, moved into the vendor tree on bootstrap
pub const VENDOR_MANIFEST: &[&str] = &["content", "management", "system"];

/// Files in the vendored content package that user files must never replace
pub const PROTECTED_FILES: &[&str] = &["item.go", "types.go"];

/// Configuration trait for a vendored framework
pub trait FrameworkConfig {
    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Repository the framework source is cloned from
    fn repo(&self) -> RepoIdentity;

    /// Branch cloned in development mode
    fn dev_branch(&self) -> &'static str;

    /// Top-level subtrees relocated into the vendor tree, in order
    fn vendor_manifest(&self) -> &'static [&'static str];

    /// Reserved file names inside the vendored user content package
    fn protected_files(&self) -> &'static [&'static str];

    /// Directory at the project root holding user-authored content.
    /// Must be one of the vendored subtrees.
    fn user_content_dir(&self) -> &'static str;

    /// Path segments of the command package that owns the vendor directory
    fn cmd_subdir(&self) -> &'static [&'static str];

    /// Entry point files of the command package
    fn entry_points(&self) -> &'static [&'static str];

    /// Name of the compiled artifact
    fn output_name(&self) -> &'static str;

    /// Toolchain binary invoked for builds
    fn toolchain(&self) -> &'static str;

    /// Instructions shown after a project is created
    fn next_steps(&self, dir: &Path) -> Vec<String>;

    /// `<cmd-subdir>/vendor/<repo-identity-path>`, relative to the project root
    fn vendor_path(&self) -> PathBuf {
        let mut path: PathBuf = self.cmd_subdir().iter().collect();
        path.push("vendor");
        path.push(self.repo().path());
        path
    }

    /// Vendored copy of the user content package, relative to the project root
    fn vendored_content_path(&self) -> PathBuf {
        self.vendor_path().join(self.user_content_dir())
    }

    /// Entry point paths relative to the project root
    fn entry_point_paths(&self) -> Vec<PathBuf> {
        let cmd: PathBuf = self.cmd_subdir().iter().collect();
        self.entry_points().iter().map(|f| cmd.join(f)).collect()
    }
}

/// The Ponzu CMS framework
#[derive(Debug, Clone, Copy, Default)]
pub struct Ponzu;

impl FrameworkConfig for Ponzu {
    fn display_name(&self) -> &'static str {
        "Ponzu"
    }

    fn repo(&self) -> RepoIdentity {
        RepoIdentity::new("github.com", "bosssauce", "ponzu")
    }

    fn dev_branch(&self) -> &'static str {
        "ponzu-dev"
    }

    fn vendor_manifest(&self) -> &'static [&'static str] {
        VENDOR_MANIFEST
    }

    fn protected_files(&self) -> &'static [&'static str] {
        PROTECTED_FILES
    }

    fn user_content_dir(&self) -> &'static str {
        "content"
    }

    fn cmd_subdir(&self) -> &'static [&'static str] {
        &["cmd", "ponzu"]
    }

    fn entry_points(&self) -> &'static [&'static str] {
        &["main.go", "options.go"]
    }

    fn output_name(&self) -> &'static str {
        "ponzu-server"
    }

    fn toolchain(&self) -> &'static str {
        "go"
    }

    fn next_steps(&self, dir: &Path) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        if current.as_deref() != Some(dir) {
            steps.push(format!("cd {}", dir.display()));
        }
        steps.push("Add your content types to ./content".to_string());
        steps.push("ponzu-tools build".to_string());
        steps.push(format!("./{}", self.output_name()));

        steps
    }
}
