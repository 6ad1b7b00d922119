//! Framework source locations and fetching
//!
//! This module provides:
//! - Repository identity and its local/remote locations
//! - Per-mode fetch plans (local then network, or a single development clone)
//! - `git clone` execution with fallback between attempts

pub mod fetcher;
pub mod location;

pub use fetcher::{fetch, CloneFailure, Cloner, Fetched, GitCloner};
pub use location::{BuildOptions, CloneAttempt, FetchPlan, RepoIdentity, SourceLocation};
