use crate::areas::repository::Repository;
use crate::artifacts::core::error::RepositoryError;

impl Repository {
    /// Unstage `file_name`, or stop tracking it and delete the working copy
    ///
    /// A pending addition is simply dropped. Otherwise the file must be tracked by head:
    /// it is marked for removal and deleted from the working directory if still there.
    pub fn rm(&mut self, file_name: &str) -> anyhow::Result<()> {
        self.transaction(|repository| {
            let path = repository.workspace().normalize_path(file_name)?;
            let file_name = path.as_str();
            if repository.staging_mut().unstage(file_name)? {
                return Ok(());
            }

            let head = repository.head_commit()?;
            if head.file(file_name).is_none() {
                return Err(RepositoryError::NothingToRemove.into());
            }

            repository.staging_mut().mark_removed(file_name);
            repository.workspace().remove_file(file_name)?;
            tracing::debug!(path = file_name, "marked file for removal");

            Ok(())
        })
    }
}
