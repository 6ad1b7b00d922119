//! Toolchain detection for git and Go

use anyhow::Result;
use std::fmt;
use std::process::Command;

/// External tools the pipeline shells out to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Git,
    Go,
}

impl Tool {
    pub fn display_name(&self) -> &'static str {
        match self {
            Tool::Git => "git",
            Tool::Go => "Go",
        }
    }

    fn program(&self) -> &'static str {
        match self {
            Tool::Git => "git",
            Tool::Go => "go",
        }
    }

    fn install_hint(&self) -> &'static str {
        match self {
            Tool::Git => "git (install from https://git-scm.com)",
            Tool::Go => "Go (install from https://go.dev/dl)",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Tool detection result
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub tool: Tool,
    pub version: Option<String>,
    pub available: bool,
}

fn probe(tool: Tool) -> ToolInfo {
    // Both tools accept `version` as a subcommand
    let output = Command::new(tool.program()).arg("version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            ToolInfo {
                tool,
                version: Some(version),
                available: true,
            }
        }
        _ => ToolInfo {
            tool,
            version: None,
            available: false,
        },
    }
}

/// Check if git is available
pub fn check_git() -> ToolInfo {
    probe(Tool::Git)
}

/// Check if the Go toolchain is available
pub fn check_go() -> ToolInfo {
    probe(Tool::Go)
}

/// Check every tool; fails listing the missing ones with install hints
pub fn check_tools(tools: &[Tool]) -> Result<Vec<ToolInfo>> {
    let results: Vec<ToolInfo> = tools.iter().map(|&tool| probe(tool)).collect();

    let missing: Vec<&str> = results
        .iter()
        .filter(|info| !info.available)
        .map(|info| info.tool.install_hint())
        .collect();

    if !missing.is_empty() {
        anyhow::bail!(
            "Missing required tools:\n{}",
            missing
                .iter()
                .map(|m| format!("  - {}", m))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_reports_consistent_state() {
        for info in [check_git(), check_go()] {
            assert_eq!(info.available, info.version.is_some());
        }
    }

    #[test]
    fn test_check_tools_lists_missing_with_hints() {
        let git = check_git();
        match check_tools(&[Tool::Git]) {
            Ok(results) => {
                assert!(git.available);
                assert_eq!(results.len(), 1);
            }
            Err(e) => {
                assert!(!git.available);
                assert!(e.to_string().contains("git-scm.com"));
            }
        }
    }
}
