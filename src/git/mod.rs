//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the **ONLY doorway** to Git. All repository reads flow
//! through this interface; no other module imports `git2`. Stevedore never
//! writes to the repository.
//!
//! We use the `git2` crate exclusively (no shelling out to the git CLI).
//!
//! # Example
//!
//! ```ignore
//! use stevedore::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! let paths = git.changed_paths("HEAD~1", "HEAD")?;
//! let summary = git.summary("HEAD")?;
//! ```

mod interface;

pub use interface::{Git, GitError};
