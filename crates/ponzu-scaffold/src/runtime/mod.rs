//! External toolchain detection
//!
//! This module provides availability and version checks for the tools the pipeline runs
//! as subprocesses (git for fetching, Go for building).

pub mod check;

pub use check::{check_git, check_go, check_tools, Tool, ToolInfo};
