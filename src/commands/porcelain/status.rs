use crate::areas::repository::Repository;
use crate::artifacts::status::status_info::Status;
use std::io::Write;

impl Repository {
    pub fn status(&mut self) -> anyhow::Result<()> {
        self.transaction(|repository| {
            let status_info = Status::new(repository).initialize()?;
            write!(repository.writer(), "{status_info}")?;

            Ok(())
        })
    }
}
