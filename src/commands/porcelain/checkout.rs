use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::core::error::RepositoryError;
use std::io::Write;

impl Repository {
    /// Switch to `branch_name`, replacing the working files of head with those of its tip
    pub fn checkout_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        self.transaction(|repository| {
            let branch = repository
                .registry()
                .find_branch(branch_name)
                .ok_or(RepositoryError::NoSuchBranch)?;
            if &branch == repository.registry().current_branch() {
                return Err(RepositoryError::AlreadyOnBranch.into());
            }

            let target_oid = repository
                .registry()
                .branch_tip(&branch)
                .cloned()
                .ok_or(RepositoryError::NoSuchBranch)?;
            let head = repository.head_commit()?;
            let target = repository.load_commit(&target_oid)?;

            repository.ensure_no_untracked_overwrite(head.files(), target.files())?;
            repository.migrate_workspace(head.files(), target.files())?;

            repository.registry_mut().switch_to(branch.clone(), target_oid);
            repository.staging_mut().clear();

            writeln!(repository.writer(), "Switched to branch '{branch}'")?;

            Ok(())
        })
    }

    /// Restore `file_name` from `revision` (head when omitted) into the working directory
    ///
    /// The staging area is left untouched.
    pub fn checkout_file(&mut self, revision: Option<&str>, file_name: &str) -> anyhow::Result<()> {
        self.transaction(|repository| {
            let file_name = repository.workspace().normalize_path(file_name)?;
            let commit_oid = match revision {
                Some(revision) => Revision::new(revision).resolve(repository.database())?,
                None => repository.registry().head().clone(),
            };
            let commit = repository.load_commit(&commit_oid)?;

            let blob_oid = commit
                .file(&file_name)
                .ok_or(RepositoryError::FileNotInCommit)?;
            let blob = repository
                .database()
                .parse_object_as_blob(blob_oid)?
                .ok_or_else(|| anyhow::anyhow!("object {blob_oid} is not a blob"))?;

            repository.workspace().write_file(&file_name, blob.content())
        })
    }
}
