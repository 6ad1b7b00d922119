//! Charm-style CLI front end using cliclack

use crate::framework::FrameworkConfig;
use crate::pipeline::{self, Bootstrap, Scaffolder};
use crate::runtime::check::{self, Tool};
use crate::source::{BuildOptions, GitCloner};
use crate::vendor::{self, SubtreeState};
use crate::workspace::{Confirm, Workspace, WORKSPACE_ROOT_ENV};
use anyhow::Result;
use std::io;
use std::path::{Path, PathBuf};

/// Arguments for creating a project
#[derive(Debug, Clone, Default)]
pub struct NewArgs {
    /// Project path, relative to `<workspace>/src`
    pub path: PathBuf,

    /// Clone the development branch
    pub dev: bool,

    /// Alternate local checkout for development clones
    pub fork: String,

    /// Workspace root; `GOPATH` when absent
    pub workspace_root: Option<PathBuf>,
}

/// Asks confirmation questions through a cliclack input
#[derive(Debug, Default)]
pub struct ClackConfirm;

impl Confirm for ClackConfirm {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        cliclack::input(question)
            .placeholder("y/N")
            .required(false)
            .interact()
    }
}

fn workspace(root: &Option<PathBuf>) -> Result<Workspace> {
    let ws = match root {
        Some(root) => Workspace::new(root.clone())?,
        None => Workspace::from_env(WORKSPACE_ROOT_ENV)?,
    };
    Ok(ws)
}

/// Report tool availability; missing tools are a warning, the subprocess decides
fn preflight(tool: Tool) -> Result<()> {
    match check::check_tools(&[tool]) {
        Ok(found) => {
            for info in found {
                cliclack::log::success(format!(
                    "{} installed ({})",
                    info.tool,
                    info.version.as_deref().unwrap_or("unknown")
                ))?;
            }
        }
        Err(e) => cliclack::log::warning(format!("{}", e))?,
    }
    Ok(())
}

/// Create a new project interactively
pub async fn run_new<F: FrameworkConfig>(framework: &F, args: NewArgs) -> Result<()> {
    cliclack::intro(format!("New {} project", framework.display_name()))?;

    let ws = workspace(&args.workspace_root)?;
    preflight(Tool::Git)?;

    let options = BuildOptions {
        dev: args.dev,
        fork: args.fork,
    };
    if options.dev {
        cliclack::log::info(format!(
            "Development mode: cloning branch {}",
            framework.dev_branch()
        ))?;
    }

    let scaffolder = Scaffolder::new(&ws, framework, GitCloner::default());
    let outcome = match scaffolder
        .bootstrap(&args.path, &options, &mut ClackConfirm)
        .await
    {
        Ok(outcome) => outcome,
        Err(e) => {
            cliclack::log::error(format!("{}", e))?;
            if let Ok(project) = ws.resolve(&args.path) {
                if project.exists() {
                    cliclack::log::remark(format!(
                        "A partial project may remain at {}. Run `ponzu-tools inspect {}` to \
                         see its state or `ponzu-tools discard {}` to remove it.",
                        project.display(),
                        args.path.display(),
                        args.path.display()
                    ))?;
                }
            }
            cliclack::outro_cancel("Project not created")?;
            return Err(e.into());
        }
    };

    match outcome {
        Bootstrap::Aborted => {
            cliclack::outro("No files overwritten.")?;
        }
        Bootstrap::Created(project) => {
            print_next_steps(framework, &project)?;
        }
    }

    Ok(())
}

/// Reconcile and compile the project in `project_dir`
pub async fn run_build<F: FrameworkConfig>(framework: &F, project_dir: &Path) -> Result<()> {
    cliclack::intro(format!("Build {} project", framework.display_name()))?;
    preflight(Tool::Go)?;

    match pipeline::build_and_compile(project_dir, framework).await {
        Ok(()) => {
            cliclack::outro(format!("Built ./{}", framework.output_name()))?;
            Ok(())
        }
        Err(e) => {
            cliclack::outro_cancel("Build stopped")?;
            Err(e.into())
        }
    }
}

/// Show how far vendoring got for a project
pub fn run_inspect<F: FrameworkConfig>(
    framework: &F,
    path: &Path,
    workspace_root: &Option<PathBuf>,
) -> Result<()> {
    let ws = workspace(workspace_root)?;
    let project = ws.resolve(path)?;
    cliclack::intro(format!("{}", project.display()))?;

    if !project.exists() {
        cliclack::outro_cancel("Nothing exists at this path")?;
        return Ok(());
    }

    let report = vendor::inspect(&project, framework);
    let vendor_line = format!("vendor directory {}", framework.vendor_path().display());
    if report.vendor_dir_exists {
        cliclack::log::success(vendor_line)?;
    } else {
        cliclack::log::warning(format!("{} missing", vendor_line))?;
    }

    for (name, state) in &report.subtrees {
        match state {
            SubtreeState::Vendored(files) => {
                cliclack::log::success(format!("{}: vendored ({} files)", name, files))?
            }
            SubtreeState::Pending => cliclack::log::warning(format!("{}: not moved", name))?,
            SubtreeState::Missing => cliclack::log::error(format!("{}: missing", name))?,
        }
    }

    let user_line = format!("user directory ./{}", framework.user_content_dir());
    if report.user_dir_exists {
        cliclack::log::success(user_line)?;
    } else {
        cliclack::log::warning(format!("{} missing", user_line))?;
    }

    if report.is_complete() {
        cliclack::outro("Project is fully vendored")?;
    } else {
        cliclack::outro_cancel("Project is partially vendored")?;
    }
    Ok(())
}

/// Remove a project after confirmation
pub async fn run_discard(path: &Path, workspace_root: &Option<PathBuf>, yes: bool) -> Result<()> {
    let ws = workspace(workspace_root)?;
    let project = ws.resolve(path)?;
    cliclack::intro(format!("Discard {}", project.display()))?;

    if !project.exists() {
        cliclack::outro("Nothing to remove")?;
        return Ok(());
    }

    let confirmed = yes
        || cliclack::confirm(format!("Remove {} and everything in it?", project.display()))
            .initial_value(false)
            .interact()?;
    if !confirmed {
        cliclack::outro_cancel("Nothing removed")?;
        return Ok(());
    }

    vendor::discard(&project).await?;
    cliclack::outro("Removed")?;
    Ok(())
}

fn print_next_steps<F: FrameworkConfig>(framework: &F, project_dir: &Path) -> Result<()> {
    let steps = framework.next_steps(project_dir);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}
