//! Command implementations
//!
//! Every user-facing operation is a method on [`crate::areas::repository::Repository`],
//! grouped by command under `porcelain`. Apart from `init`, each one runs inside a
//! repository transaction and writes its user-visible output to the repository writer.

pub mod porcelain;
