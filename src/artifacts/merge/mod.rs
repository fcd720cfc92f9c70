//! Merge algorithms
//!
//! - `merge_base`: breadth-first discovery of the common ancestor two histories merge from
//! - `resolution`: per-path three-way classification and conflict blob construction

pub mod merge_base;
pub mod resolution;
