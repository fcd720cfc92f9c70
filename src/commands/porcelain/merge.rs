use crate::areas::repository::Repository;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::merge::merge_base::MergeBaseFinder;
use crate::artifacts::merge::resolution::ThreeWayMerge;
use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeSet;
use std::io::Write;

/// What a merge did to the current branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Head was an ancestor of the target; the current branch now points at the target
    FastForwarded,
    /// The target is already part of the current branch's history
    TargetIsAncestor,
    /// A merge commit was created
    Merged {
        commit_id: ObjectId,
        conflicted: bool,
    },
}

impl Repository {
    /// Merge the tip of `branch_name` into the current branch
    pub fn merge(&mut self, branch_name: &str) -> anyhow::Result<MergeOutcome> {
        self.transaction(|repository| {
            if !repository.staging().is_empty() {
                return Err(RepositoryError::UncommittedChanges.into());
            }

            let branch = repository
                .registry()
                .find_branch(branch_name)
                .ok_or(RepositoryError::BranchNotFound)?;
            let current_branch = repository.registry().current_branch().clone();
            if branch == current_branch {
                return Err(RepositoryError::MergeWithItself.into());
            }

            let head_oid = repository.registry().head().clone();
            let target_oid = repository
                .registry()
                .branch_tip(&branch)
                .cloned()
                .ok_or(RepositoryError::BranchNotFound)?;
            let base_oid = repository.find_merge_base(&head_oid, &target_oid)?;
            tracing::debug!(head = %head_oid, target = %target_oid, base = %base_oid, "merging");

            let head = repository.head_commit()?;
            let target = repository.load_commit(&target_oid)?;
            repository.ensure_no_untracked_overwrite(head.files(), target.files())?;

            if base_oid == head_oid {
                repository.migrate_workspace(head.files(), target.files())?;
                repository.registry_mut().advance(target_oid);
                writeln!(repository.writer(), "Current branch fast-forwarded.")?;

                return Ok(MergeOutcome::FastForwarded);
            }

            if base_oid == target_oid {
                writeln!(
                    repository.writer(),
                    "Given branch is an ancestor of the current branch."
                )?;

                return Ok(MergeOutcome::TargetIsAncestor);
            }

            let base = repository.load_commit(&base_oid)?;
            let resolution = ThreeWayMerge::new(
                base.files(),
                head.files(),
                target.files(),
                |oid: &ObjectId| repository.load_blob_content(oid),
            )
            .resolve()?;

            for blob in &resolution.conflict_blobs {
                repository.database().store(blob)?;
            }

            let removed = head
                .files()
                .keys()
                .filter(|path| !resolution.files.contains_key(*path))
                .cloned()
                .collect::<BTreeSet<_>>();
            let message = format!("Merged {branch} into {current_branch}.");
            let commit_id = repository.write_commit(
                Some(target_oid),
                resolution.files.clone(),
                removed,
                message,
            )?;

            repository.migrate_workspace(head.files(), &resolution.files)?;

            let conflicted = resolution.has_conflicts();
            if conflicted {
                writeln!(repository.writer(), "Encountered a merge conflict.")?;
            }

            Ok(MergeOutcome::Merged {
                commit_id,
                conflicted,
            })
        })
    }

    fn find_merge_base(&self, head: &ObjectId, target: &ObjectId) -> anyhow::Result<ObjectId> {
        let finder = MergeBaseFinder::new(|oid: &ObjectId| {
            let commit = self.load_commit(oid)?;

            Ok(SlimCommit {
                oid: oid.clone(),
                parents: commit.parents(),
            })
        });

        finder
            .find_merge_base(head, target)?
            .with_context(|| format!("no common ancestor between {head} and {target}"))
    }

    fn load_blob_content(&self, oid: &ObjectId) -> anyhow::Result<Bytes> {
        let blob = self
            .database()
            .parse_object_as_blob(oid)?
            .with_context(|| format!("object {oid} is not a blob"))?;

        Ok(blob.content().clone())
    }
}
