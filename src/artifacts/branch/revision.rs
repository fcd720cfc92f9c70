use crate::areas::database::Database;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::objects::COMMIT_ID_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;

/// A commit named by its full id or any unambiguous prefix of it
///
/// Only commit ids take part in the lookup: blob ids share the object store but live in
/// a longer id namespace, so a prefix that happens to match a blob is not ambiguous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision(String);

impl Revision {
    pub fn new(revision: impl Into<String>) -> Self {
        Revision(revision.into().trim().to_ascii_lowercase())
    }

    /// Resolve to the single commit id matching the revision
    ///
    /// Fails with [`RepositoryError::CommitNotFound`] when nothing matches, the prefix is
    /// ambiguous or the revision is not a hexadecimal string.
    pub fn resolve(&self, database: &Database) -> anyhow::Result<ObjectId> {
        if !self.looks_like_commit_id() {
            return Err(RepositoryError::CommitNotFound.into());
        }

        let mut candidates = database
            .find_objects_by_prefix(&self.0)?
            .into_iter()
            .filter(ObjectId::is_commit_id);

        match (candidates.next(), candidates.next()) {
            (Some(oid), None) => Ok(oid),
            (Some(_), Some(_)) => {
                tracing::debug!(revision = %self.0, "ambiguous commit id prefix");
                Err(RepositoryError::CommitNotFound.into())
            }
            _ => Err(RepositoryError::CommitNotFound.into()),
        }
    }

    fn looks_like_commit_id(&self) -> bool {
        !self.0.is_empty()
            && self.0.len() <= COMMIT_ID_LENGTH
            && self.0.chars().all(|c| c.is_ascii_hexdigit())
    }
}
