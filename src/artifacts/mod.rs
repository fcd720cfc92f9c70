//! Version-control data structures and algorithms
//!
//! - `branch`: branch names and commit id abbreviations
//! - `checkout`: working-directory migrations and untracked-file protection
//! - `core`: shared utilities (errors, checksummed files, pager wrapper)
//! - `merge`: merge base discovery and three-way file resolution
//! - `objects`: object types (blob, commit) and their identities
//! - `status`: working tree status inspection

pub mod branch;
pub mod checkout;
pub mod core;
pub mod merge;
pub mod objects;
pub mod status;
