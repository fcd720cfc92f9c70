//! Core repository components
//!
//! The persistent parts of a repository:
//!
//! - `database`: content-addressed object store for blobs and commits
//! - `staging`: pending additions and removals for the next commit
//! - `registry`: branch pointers, the current branch and head
//! - `workspace`: working directory file system operations
//! - `repository`: the aggregate tying them together, with load/save transactions

pub mod database;
pub mod registry;
pub mod repository;
pub mod staging;
pub mod workspace;
