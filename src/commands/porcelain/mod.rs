//! Porcelain commands (user-facing operations)
//!
//! ## Commands
//!
//! - `init`: Initialize a new repository with its root commit
//! - `add`, `rm`: Stage files for addition or removal
//! - `commit`: Record the staged snapshot
//! - `log`, `global-log`, `find`: Inspect history
//! - `status`: Show branches, staged files and working tree changes
//! - `checkout`: Switch branches or restore files
//! - `branch`, `rm-branch`: Create or delete branch pointers
//! - `reset`: Move the current branch to an arbitrary commit
//! - `merge`: Merge another branch into the current one

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod status;
