//! Twig: a small content-addressed version-control engine.
//!
//! The crate is organized the way a git-like tool is:
//!
//! - `areas`: the persistent parts of a repository (object store, staging area,
//!   branch registry, working directory) and the `Repository` that ties them together
//! - `artifacts`: the data structures and algorithms operating on those areas
//!   (objects, checkout migrations, merge base discovery, three-way resolution, status)
//! - `commands`: user-facing operations implemented on `Repository`

pub mod areas;
pub mod artifacts;
pub mod commands;
