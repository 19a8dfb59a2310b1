//! Stevedore - CI release helpers for app monorepos
//!
//! Stevedore is a single-binary tool run once per CI job to answer the
//! release-automation questions of an application monorepo: which apps had
//! their version bumped, is this commit a release commit, what would a
//! pull request deploy, and how does a bumped version propagate into the
//! packaging toolchain's manifests.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to handlers)
//! - [`core`] - Domain types, configuration, changed-set and release logic
//! - [`git`] - Single interface for all Git operations
//! - [`ci`] - CI output channel (key=value file, stdout fallback)
//! - [`exec`] - Narrow subprocess abstraction for the lock-refresh command
//! - [`sync`] - Version propagation across packaging manifests
//! - [`ui`] - Output verbosity and markdown rendering
//!
//! # Correctness Invariants
//!
//! Stevedore maintains the following invariants:
//!
//! 1. All Git reads flow through the [`git`] interface; no other module
//!    touches the repository
//! 2. After a successful sync, the source manifest and both packaging
//!    manifests hold byte-identical version text
//! 3. Multi-line CI output always uses a delimiter that does not occur in
//!    the payload
//! 4. "Not a release commit" and "nothing changed" are normal outcomes,
//!    never errors

pub mod ci;
pub mod cli;
pub mod core;
pub mod exec;
pub mod git;
pub mod sync;
pub mod ui;
