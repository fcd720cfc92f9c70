use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;

impl Repository {
    /// Move the current branch and head to `revision`
    ///
    /// The working directory is replaced with the commit's files, the branch tips it
    /// recorded are restored for branches that still exist, and staging is cleared.
    pub fn reset(&mut self, revision: &str) -> anyhow::Result<()> {
        self.transaction(|repository| {
            let target_oid = Revision::new(revision).resolve(repository.database())?;
            let head = repository.head_commit()?;
            let target = repository.load_commit(&target_oid)?;

            repository.ensure_no_untracked_overwrite(head.files(), target.files())?;
            repository.migrate_workspace(head.files(), target.files())?;

            repository.registry_mut().replay_snapshot(target.branches());
            repository.registry_mut().advance(target_oid);
            repository.staging_mut().clear();
            tracing::debug!(commit = %repository.registry().head(), "reset current branch");

            Ok(())
        })
    }
}
