//! Working tree status inspection
//!
//! Compares the working directory against the head commit and the staging area.
//!
//! ## Components
//!
//! - `file_change`: kinds of unstaged working-directory changes
//! - `status_info`: collection of the status sections and their rendering

pub mod file_change;
pub mod status_info;
