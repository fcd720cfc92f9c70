use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::objects::commit::{BranchSnapshot, Commit};
use anyhow::Context;
use std::fs;

impl Repository {
    /// Create the repository directory, its stores and the root commit
    ///
    /// The root commit has no files, is dated at the Unix epoch and records the default
    /// branch without a tip, so every fresh repository starts from the same commit id.
    pub fn init(&mut self) -> anyhow::Result<()> {
        if self.is_initialized() {
            return Err(RepositoryError::AlreadyInitialized.into());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .twig/objects directory")?;
        fs::create_dir_all(self.staging().store_path())
            .context("Failed to create .twig/staging directory")?;

        let branch = BranchName::default_branch();
        let root = Commit::root(
            branch.to_string(),
            BranchSnapshot::from([(branch.to_string(), None)]),
        );
        let root_id = self
            .database()
            .store(&root)
            .context("Failed to store the initial commit")?;

        self.registry_mut().init(root_id);
        self.write_updates()
            .context("Failed to create .twig/registry file")?;
        tracing::debug!(path = %self.path().display(), "initialized repository");

        Ok(())
    }
}
