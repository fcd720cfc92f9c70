//! Moving the working directory between snapshots
//!
//! - `conflict`: detects untracked files an incoming snapshot would overwrite
//! - `migration`: plans the file writes and deletions the workspace then applies
//!
//! Branch checkout, reset, fast-forward and merge all run the conflict check first and
//! only then apply a migration, so an aborted operation leaves the working directory
//! untouched.

pub mod conflict;
pub mod migration;
