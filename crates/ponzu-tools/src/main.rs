//! Ponzu CLI - Create and build Ponzu projects

use anyhow::Result;
use clap::{Parser, Subcommand};
use ponzu_scaffold::tui::NewArgs;
use ponzu_scaffold::Ponzu;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ponzu-tools")]
#[command(about = "CLI for creating and building Ponzu projects")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new Ponzu project inside $GOPATH/src
    New(CliNewArgs),
    /// Copy ./content into the vendored framework and compile the server
    Build,
    /// Show how far vendoring got for a project (for recovering failed creates)
    Inspect(ProjectArgs),
    /// Remove a project, e.g. one left behind by a failed create
    Discard(DiscardArgs),
}

#[derive(Parser, Debug)]
pub struct CliNewArgs {
    /// Project path, relative to $GOPATH/src
    pub path: PathBuf,

    /// Clone the ponzu-dev branch instead of the stable default (for development use)
    #[arg(long)]
    pub dev: bool,

    /// Alternate local checkout, relative to $GOPATH/src (only used with --dev)
    #[arg(long, default_value = "")]
    pub fork: String,

    /// Workspace root
    #[arg(long, env = "GOPATH")]
    pub gopath: Option<PathBuf>,
}

impl From<CliNewArgs> for NewArgs {
    fn from(args: CliNewArgs) -> Self {
        NewArgs {
            path: args.path,
            dev: args.dev,
            fork: args.fork,
            workspace_root: args.gopath,
        }
    }
}

#[derive(Parser, Debug)]
pub struct ProjectArgs {
    /// Project path, relative to $GOPATH/src
    pub path: PathBuf,

    /// Workspace root
    #[arg(long, env = "GOPATH")]
    pub gopath: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct DiscardArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Remove without asking
    #[arg(short, long)]
    pub yes: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("PONZU_LOG"))
        .with_writer(std::io::stderr)
        .init();

    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let framework = Ponzu;

    let result = match args.command {
        Command::New(new_args) => ponzu_scaffold::tui::run_new(&framework, new_args.into()).await,
        Command::Build => {
            let project_dir = std::env::current_dir()?;
            ponzu_scaffold::tui::run_build(&framework, &project_dir).await
        }
        Command::Inspect(project) => {
            ponzu_scaffold::tui::run_inspect(&framework, &project.path, &project.gopath)
        }
        Command::Discard(discard) => {
            ponzu_scaffold::tui::run_discard(
                &discard.project.path,
                &discard.project.gopath,
                discard.yes,
            )
            .await
        }
    };

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
