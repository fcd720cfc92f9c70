use crate::areas::repository::Repository;
use crate::artifacts::core::error::RepositoryError;

impl Repository {
    /// Stage the working-directory version of `file_name` for the next commit
    pub fn add(&mut self, file_name: &str) -> anyhow::Result<()> {
        self.transaction(|repository| {
            let file_name = repository.workspace().normalize_path(file_name)?;
            if !repository.workspace().file_exists(&file_name) {
                return Err(RepositoryError::FileNotFound.into());
            }

            let blob = repository.workspace().parse_blob(&file_name)?;
            let head = repository.head_commit()?;

            repository.staging_mut().stage(&blob, head.files())
        })
    }
}
