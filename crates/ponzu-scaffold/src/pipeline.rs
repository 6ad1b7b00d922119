//! Bootstrap and build entry points
//!
//! Bootstrap runs once per project: resolve the path, confirm any overwrite, clone the framework
//! and vendor its packages. Build runs on every request: reconcile user content into the vendor
//! tree and, only if that produced no conflicts, compile.

use crate::compile::Compiler;
use crate::error::{Error, Result};
use crate::framework::FrameworkConfig;
use crate::reconcile::{self, Reconciliation};
use crate::source::{self, BuildOptions, Cloner, FetchPlan};
use crate::vendor;
use crate::workspace::{self, Confirm, Decision, Workspace};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Outcome of a bootstrap that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bootstrap {
    /// Project created at this path
    Created(PathBuf),
    /// The user declined to overwrite an existing path
    Aborted,
}

/// Creates projects for one framework inside one workspace
pub struct Scaffolder<'a, F, C> {
    workspace: &'a Workspace,
    framework: &'a F,
    cloner: C,
}

impl<'a, F: FrameworkConfig, C: Cloner> Scaffolder<'a, F, C> {
    pub fn new(workspace: &'a Workspace, framework: &'a F, cloner: C) -> Self {
        Self {
            workspace,
            framework,
            cloner,
        }
    }

    /// Create a new project at `relative` (resolved inside the workspace).
    ///
    /// A failure after the project directory was created leaves it in place; see
    /// [`vendor::inspect`] and [`vendor::discard`].
    pub async fn bootstrap<P: Confirm + ?Sized>(
        &self,
        relative: impl AsRef<Path>,
        options: &BuildOptions,
        confirm: &mut P,
    ) -> Result<Bootstrap> {
        let path = self.workspace.resolve(relative)?;

        match workspace::check_overwrite(&path, confirm)? {
            Decision::Abort => return Ok(Bootstrap::Aborted),
            Decision::Overwrite => workspace::destroy(&path).await?,
            Decision::Proceed => {}
        }

        tokio::fs::create_dir_all(&path)
            .await
            .map_err(|e| Error::fs("create", &path, e))?;

        let plan = FetchPlan::for_options(self.workspace, self.framework, options)?;
        let fetched = source::fetch(&self.cloner, &plan, &path).await?;

        vendor::vendor(&path, self.framework).await?;

        if options.dev {
            println!(
                "{} Dev build cloned from {}:{}",
                "->".blue(),
                fetched.location,
                self.framework.dev_branch()
            );
        } else {
            println!(
                "{} New {} project created at {}",
                "Success:".green().bold(),
                self.framework.display_name().to_lowercase(),
                path.display()
            );
        }

        Ok(Bootstrap::Created(path))
    }
}

/// Reconcile user content in `project_dir` into its vendor tree, then compile.
///
/// Conflicts are printed and returned as [`Error::Conflict`]; the toolchain is not run.
pub async fn build_and_compile<F: FrameworkConfig>(project_dir: &Path, framework: &F) -> Result<()> {
    let user_dir = project_dir.join(framework.user_content_dir());
    let vendored_dir = project_dir.join(framework.vendored_content_path());

    let result =
        reconcile::reconcile(&user_dir, &vendored_dir, framework.protected_files()).await?;
    if let Reconciliation::Conflict(files) = result {
        reconcile::report_conflicts(&files, "ponzu-tools build");
        return Err(Error::Conflict { files });
    }

    Compiler::new(framework.toolchain(), project_dir)
        .compile(&framework.entry_point_paths(), framework.output_name())
        .await
}
