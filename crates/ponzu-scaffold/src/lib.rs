//! Ponzu Scaffold - Project bootstrap and build pipeline
//!
//! This library creates Ponzu projects from the framework repository and builds them. A project
//! keeps the framework's own packages in a vendor tree under its command package, separate from
//! the user-editable content package at the project root.
//!
//! # Architecture
//!
//! Bootstrap (once per project):
//!
//! - **workspace** - Resolve the project path under the workspace root, confirm overwrites
//! - **source** - Clone the framework, local checkout first, then the network
//! - **vendor** - Move framework packages into `cmd/ponzu/vendor/...`
//!
//! Build (every request):
//!
//! - **reconcile** - Copy user content into the vendor tree, refusing protected names
//! - **compile** - Run the Go toolchain
//!
//! [`pipeline`] wires these together as [`Scaffolder::bootstrap`] and [`build_and_compile`].
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based front end
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use ponzu_scaffold::{BuildOptions, GitCloner, Ponzu, Scaffolder, StdinConfirm, Workspace};
//!
//! let workspace = Workspace::from_env("GOPATH")?;
//! let scaffolder = Scaffolder::new(&workspace, &Ponzu, GitCloner::default());
//! scaffolder
//!     .bootstrap("github.com/me/site", &BuildOptions::default(), &mut StdinConfirm)
//!     .await?;
//! ```

pub mod compile;
pub mod error;
pub mod framework;
pub mod pipeline;
pub mod reconcile;
pub mod runtime;
pub mod source;
pub mod vendor;
pub mod workspace;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use framework::{FrameworkConfig, Ponzu, PROTECTED_FILES, VENDOR_MANIFEST};
pub use pipeline::{build_and_compile, Bootstrap, Scaffolder};
pub use reconcile::Reconciliation;
pub use source::{BuildOptions, Cloner, FetchPlan, GitCloner, SourceLocation};
pub use workspace::{Confirm, Decision, StdinConfirm, Workspace};
