//! User-reportable repository errors
//!
//! [`RepositoryError`] covers every condition a command reports to the user instead of
//! failing hard. Each variant displays as the exact message shown to the user; commands
//! return it through `anyhow::Error` and the binary downcasts it to decide where it is
//! printed and which exit code to use.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The command was run outside of an initialized repository.
    #[error("Not in an initialized Twig directory.")]
    NotInitialized,

    #[error("A Twig version-control system already exists in the current directory.")]
    AlreadyInitialized,

    #[error("File does not exist.")]
    FileNotFound,

    /// The path leaves the working directory, points into the repository directory or
    /// contains control characters.
    #[error("Invalid file path: {0:?}")]
    InvalidPath(String),

    #[error("No reason to remove the file.")]
    NothingToRemove,

    #[error("Please enter a commit message.")]
    EmptyCommitMessage,

    #[error("No changes added to the commit.")]
    NothingToCommit,

    #[error("No such branch exists.")]
    NoSuchBranch,

    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,

    #[error("A branch with that name already exists.")]
    BranchExists,

    /// The branch name violates the ref-name rules.
    #[error("Invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("Cannot remove the current branch.")]
    RemoveCurrentBranch,

    /// Raised by `rm-branch` and `merge` when the named branch is unknown.
    #[error("A branch with that name does not exist.")]
    BranchNotFound,

    /// The commit id is unknown or an ambiguous abbreviation.
    #[error("No commit with that id exists.")]
    CommitNotFound,

    #[error("File does not exist in that commit.")]
    FileNotInCommit,

    #[error("Found no commit with that message.")]
    NoCommitWithMessage,

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("Cannot merge a branch with itself.")]
    MergeWithItself,

    /// A working-directory file unknown to head would be overwritten.
    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileInTheWay,
}

impl RepositoryError {
    /// Whether the error is a usage error that ends the process with a failure exit code
    pub fn is_usage_error(&self) -> bool {
        matches!(self, RepositoryError::NotInitialized)
    }
}
