use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};

// Terminology:
// - staged files: files with a pending addition in the staging area
// - removed files: files head tracks that the next commit will drop
// - modified files: tracked or staged files whose working copy differs from what the
//   next commit would record, or is missing from the working directory
// - untracked files: files neither head nor the staging area knows about, and files
//   marked for removal that were recreated afterwards
pub type ChangeSet = BTreeMap<String, WorkspaceChangeType>;
pub type FileSet = BTreeSet<String>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusInfo {
    pub(crate) current_branch: BranchName,
    pub(crate) branches: BTreeSet<BranchName>,
    pub(crate) staged_files: FileSet,
    pub(crate) removed_files: FileSet,
    pub(crate) workspace_changeset: ChangeSet,
    pub(crate) untracked_files: FileSet,
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl Status<'_> {
    pub fn initialize(&self) -> anyhow::Result<StatusInfo> {
        let registry = self.repository.registry();
        let staging = self.repository.staging();
        let head = self.repository.head_commit()?;
        let workspace_files = self.scan_workspace()?;

        let mut workspace_changeset = ChangeSet::new();

        for (path, head_oid) in head.files() {
            if staging.removals().contains(path) || staging.additions().contains_key(path) {
                continue;
            }

            match workspace_files.get(path) {
                None => {
                    workspace_changeset.insert(path.clone(), WorkspaceChangeType::Deleted);
                }
                Some(oid) if oid != head_oid => {
                    workspace_changeset.insert(path.clone(), WorkspaceChangeType::Modified);
                }
                Some(_) => {}
            }
        }

        for (path, staged_oid) in staging.additions() {
            match workspace_files.get(path) {
                None => {
                    workspace_changeset.insert(path.clone(), WorkspaceChangeType::Deleted);
                }
                Some(oid) if oid != staged_oid => {
                    workspace_changeset.insert(path.clone(), WorkspaceChangeType::Modified);
                }
                Some(_) => {}
            }
        }

        let untracked_files = workspace_files
            .keys()
            .filter(|path| {
                let known = head.file(path).is_some() || staging.additions().contains_key(*path);
                !known || staging.removals().contains(*path)
            })
            .cloned()
            .collect();

        Ok(StatusInfo {
            current_branch: registry.current_branch().clone(),
            branches: registry.branches().keys().cloned().collect(),
            staged_files: staging.additions().keys().cloned().collect(),
            removed_files: staging.removals().clone(),
            workspace_changeset,
            untracked_files,
        })
    }

    /// Blob id of every working-directory file, as `add` would stage it
    fn scan_workspace(&self) -> anyhow::Result<BTreeMap<String, ObjectId>> {
        let workspace = self.repository.workspace();

        workspace
            .list_files()?
            .into_iter()
            .map(|path| {
                let oid = workspace.parse_blob(&path)?.object_id()?;
                Ok((path, oid))
            })
            .collect()
    }
}

impl StatusInfo {
    fn write_section(
        f: &mut std::fmt::Formatter<'_>,
        title: &str,
        entries: impl IntoIterator<Item = String>,
    ) -> std::fmt::Result {
        writeln!(f, "=== {title} ===")?;
        for entry in entries {
            writeln!(f, "{entry}")?;
        }
        writeln!(f)
    }
}

impl std::fmt::Display for StatusInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Self::write_section(
            f,
            "Branches",
            self.branches.iter().map(|branch| {
                if branch == &self.current_branch {
                    format!("*{branch}")
                } else {
                    branch.to_string()
                }
            }),
        )?;
        Self::write_section(f, "Staged Files", self.staged_files.iter().cloned())?;
        Self::write_section(f, "Removed Files", self.removed_files.iter().cloned())?;
        Self::write_section(
            f,
            "Modifications Not Staged For Commit",
            self.workspace_changeset
                .iter()
                .map(|(path, change)| format!("{path} {change}")),
        )?;
        Self::write_section(f, "Untracked Files", self.untracked_files.iter().cloned())
    }
}
