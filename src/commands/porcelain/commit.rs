use crate::areas::repository::Repository;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::objects::commit::{Commit, FileMap, load_timestamp_from_env};
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeSet;
use std::io::Write;

impl Repository {
    /// Record the staged snapshot as a new commit on the current branch
    pub fn commit(&mut self, message: &str) -> anyhow::Result<ObjectId> {
        self.transaction(|repository| {
            if message.trim().is_empty() {
                return Err(RepositoryError::EmptyCommitMessage.into());
            }
            if repository.staging().is_empty() {
                return Err(RepositoryError::NothingToCommit.into());
            }

            let head = repository.head_commit()?;

            // blobs must be in the store before a commit can reference them
            for blob in repository.staging().staged_blobs()? {
                repository.database().store(&blob)?;
            }

            let files = repository.staging().build_snapshot(head.files());
            let removed = repository.staging().removals().clone();
            let commit_id = repository.write_commit(None, files, removed, message.to_string())?;
            repository.staging_mut().clear();

            writeln!(
                repository.writer(),
                "[{} {}] {}",
                repository.registry().current_branch(),
                commit_id.to_short_oid(),
                message.lines().next().unwrap_or_default()
            )?;

            Ok(commit_id)
        })
    }

    /// Store a commit on top of head and advance the current branch to it
    pub(crate) fn write_commit(
        &mut self,
        merge_parent: Option<ObjectId>,
        files: FileMap,
        removed: BTreeSet<String>,
        message: String,
    ) -> anyhow::Result<ObjectId> {
        let commit = Commit::new(
            self.registry().head().clone(),
            merge_parent,
            load_timestamp_from_env(),
            self.registry().current_branch().to_string(),
            files,
            removed,
            self.registry().snapshot(),
            message,
        );

        let commit_id = self.database().store(&commit)?;
        self.registry_mut().advance(commit_id.clone());

        Ok(commit_id)
    }
}
