use crate::areas::repository::Repository;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::cmp::Reverse;
use std::io::Write;

impl Repository {
    /// Show the history of head along first parents, newest first
    pub fn log(&mut self) -> anyhow::Result<()> {
        self.transaction(|repository| {
            let mut current_commit_oid = Some(repository.registry().head().clone());

            while let Some(commit_oid) = current_commit_oid {
                let commit = repository.load_commit(&commit_oid)?;
                repository.display_commit(&commit_oid, &commit)?;

                current_commit_oid = commit.parent().cloned();
            }

            Ok(())
        })
    }

    /// Show every commit ever made, newest first
    pub fn global_log(&mut self) -> anyhow::Result<()> {
        self.transaction(|repository| {
            let mut commits = repository.all_commits()?;
            // same-second commits fall back to id order so the output is stable
            commits.sort_by_key(|(oid, commit)| (Reverse(commit.timestamp()), oid.clone()));

            for (commit_oid, commit) in &commits {
                repository.display_commit(commit_oid, commit)?;
            }

            Ok(())
        })
    }

    /// Print the ids of all commits whose message is exactly `message`
    pub fn find(&mut self, message: &str) -> anyhow::Result<()> {
        self.transaction(|repository| {
            let matches = repository
                .all_commits()?
                .into_iter()
                .filter(|(_, commit)| commit.message() == message)
                .map(|(oid, _)| oid)
                .collect::<Vec<_>>();

            if matches.is_empty() {
                return Err(RepositoryError::NoCommitWithMessage.into());
            }

            for oid in matches {
                writeln!(repository.writer(), "{oid}")?;
            }

            Ok(())
        })
    }

    /// Every commit in the object store, in id order
    fn all_commits(&self) -> anyhow::Result<Vec<(ObjectId, Commit)>> {
        self.database()
            .list_objects()?
            .into_iter()
            .filter(ObjectId::is_commit_id)
            .map(|oid| {
                let commit = self.load_commit(&oid)?;
                Ok((oid, commit))
            })
            .collect()
    }

    fn display_commit(&self, commit_oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "===")?;
        writeln!(writer, "commit {commit_oid}")?;
        if let (Some(parent), Some(merge_parent)) = (commit.parent(), commit.merge_parent()) {
            writeln!(
                writer,
                "Merge: {} {}",
                parent.to_short_oid(),
                merge_parent.to_short_oid()
            )?;
        }
        writeln!(writer, "Date: {}", commit.readable_timestamp())?;
        writeln!(writer, "{}", commit.message())?;
        writeln!(writer)?;

        Ok(())
    }
}
