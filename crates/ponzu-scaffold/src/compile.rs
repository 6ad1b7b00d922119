//! Toolchain invocation

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command as TokioCommand;

/// `<program> build -o <output> <entry points...>` run from a project directory
#[derive(Debug, Clone)]
pub struct Compiler {
    program: String,
    working_dir: PathBuf,
}

impl Compiler {
    pub fn new(program: impl Into<String>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            working_dir: working_dir.into(),
        }
    }

    /// Build `output_name` from `entry_points`, streaming toolchain output.
    ///
    /// A failure to launch and a non-zero exit are reported the same way.
    pub async fn compile<P: AsRef<Path>>(&self, entry_points: &[P], output_name: &str) -> Result<()> {
        let mut cmd = TokioCommand::new(&self.program);
        cmd.arg("build")
            .arg("-o")
            .arg(output_name)
            .args(entry_points.iter().map(|p| p.as_ref().as_os_str()))
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        tracing::debug!(program = %self.program, dir = %self.working_dir.display(), "running build");

        let status = cmd
            .status()
            .await
            .map_err(|e| Error::Build(format!("failed to start {}: {}", self.program, e)))?;

        if !status.success() {
            return Err(Error::Build(format!("{} build {}", self.program, status)));
        }

        tracing::info!(output = output_name, "build finished");
        Ok(())
    }
}
