use crate::areas::staging::StagingArea;
use crate::areas::workspace::Workspace;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::objects::commit::FileMap;
use crate::artifacts::objects::object::Object;
use derive_new::new;

/// Guard against checkouts destroying files head does not know about
///
/// A working-directory file is in the way of an incoming snapshot when head does not
/// track it with exactly its current content, it is not staged with that content either,
/// and the incoming snapshot would write the same path.
#[derive(new)]
pub struct UntrackedFiles<'r> {
    workspace: &'r Workspace,
    head_files: &'r FileMap,
    staging: &'r StagingArea,
}

impl UntrackedFiles<'_> {
    /// Working-directory files the incoming snapshot would overwrite
    pub fn in_the_way(&self, incoming: &FileMap) -> anyhow::Result<Vec<String>> {
        let mut conflicts = Vec::new();

        for file_name in self.workspace.list_files()? {
            if !incoming.contains_key(&file_name) {
                continue;
            }

            let oid = self.workspace.parse_blob(&file_name)?.object_id()?;
            let tracked = self.head_files.get(&file_name) == Some(&oid);

            if !tracked && !self.staging.is_staged(&file_name, &oid) {
                conflicts.push(file_name);
            }
        }

        Ok(conflicts)
    }

    /// Fail with [`RepositoryError::UntrackedFileInTheWay`] if any file is in the way
    pub fn ensure_none_in_the_way(&self, incoming: &FileMap) -> anyhow::Result<()> {
        let conflicts = self.in_the_way(incoming)?;

        if conflicts.is_empty() {
            Ok(())
        } else {
            tracing::debug!(files = ?conflicts, "untracked files in the way");
            Err(RepositoryError::UntrackedFileInTheWay.into())
        }
    }
}
