use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::error::RepositoryError;

impl Repository {
    /// Create a branch pointing at head; the current branch does not change
    pub fn create_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        self.transaction(|repository| {
            let branch = BranchName::try_parse(branch_name.to_string())?;
            repository.registry_mut().create_branch(branch)
        })
    }

    /// Delete a branch pointer; the commits it pointed to stay in the store
    pub fn delete_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        self.transaction(|repository| {
            let branch = repository
                .registry()
                .find_branch(branch_name)
                .ok_or(RepositoryError::BranchNotFound)?;
            repository.registry_mut().delete_branch(&branch)
        })
    }
}
