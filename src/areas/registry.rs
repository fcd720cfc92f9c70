//! Branch and head registry
//!
//! Named pointers into the commit graph plus the current branch and head. The registry
//! is persisted as one file together with the staged removals:
//!
//! ```text
//! current <branch-name>
//! head <commit-id>
//! branch <commit-id|-> <branch-name>
//! removed <path>
//! <20-byte SHA-1 of the lines above>
//! ```
//!
//! A branch has no tip (`-`) only in the snapshot recorded by the root commit.
//!
//! Load-modify-save cycles are serialized through an exclusive lock on `registry.lock`,
//! which lives next to the registry file and is never replaced.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::checksum::Checksum;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::objects::commit::BranchSnapshot;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use fake::rand;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

const NO_COMMIT_MARKER: &str = "-";
const LOCK_EXTENSION: &str = "lock";

pub type BranchTips = BTreeMap<BranchName, Option<ObjectId>>;

#[derive(Debug)]
pub struct Registry {
    /// Path to the registry file
    path: Box<Path>,
    current_branch: BranchName,
    head: ObjectId,
    branches: BranchTips,
}

impl Registry {
    pub fn new(path: Box<Path>) -> Self {
        Registry {
            path,
            current_branch: BranchName::default_branch(),
            head: ObjectId::default(),
            branches: BranchTips::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the lock file guarding the registry, creating it on first use
    pub fn open_lock_file(&self) -> anyhow::Result<std::fs::File> {
        let lock_path = self.path.with_extension(LOCK_EXTENSION);

        std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("failed to open registry lock at {:?}", lock_path))
    }

    /// Reset to a single default branch pointing at the root commit
    pub fn init(&mut self, root: ObjectId) {
        let branch = BranchName::default_branch();

        self.branches = BranchTips::from([(branch.clone(), Some(root.clone()))]);
        self.current_branch = branch;
        self.head = root;
    }

    pub fn current_branch(&self) -> &BranchName {
        &self.current_branch
    }

    pub fn head(&self) -> &ObjectId {
        &self.head
    }

    pub fn branches(&self) -> &BranchTips {
        &self.branches
    }

    pub fn contains(&self, branch: &BranchName) -> bool {
        self.branches.contains_key(branch)
    }

    /// Look up an existing branch by a user-supplied name
    ///
    /// Names that fail validation cannot exist, so they simply find nothing.
    pub fn find_branch(&self, name: &str) -> Option<BranchName> {
        BranchName::try_parse(name.to_string())
            .ok()
            .filter(|branch| self.contains(branch))
    }

    pub fn branch_tip(&self, branch: &BranchName) -> Option<&ObjectId> {
        self.branches.get(branch).and_then(Option::as_ref)
    }

    /// State of all branches, as recorded in new commits
    pub fn snapshot(&self) -> BranchSnapshot {
        self.branches
            .iter()
            .map(|(name, tip)| (name.to_string(), tip.clone()))
            .collect()
    }

    /// Point a new branch at head
    pub fn create_branch(&mut self, branch: BranchName) -> anyhow::Result<()> {
        if self.contains(&branch) {
            return Err(RepositoryError::BranchExists.into());
        }

        self.branches.insert(branch, Some(self.head.clone()));
        Ok(())
    }

    /// Remove a branch pointer; the commits it pointed to are kept
    pub fn delete_branch(&mut self, branch: &BranchName) -> anyhow::Result<()> {
        if branch == &self.current_branch {
            return Err(RepositoryError::RemoveCurrentBranch.into());
        }

        match self.branches.remove(branch) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::BranchNotFound.into()),
        }
    }

    /// Move head and the current branch to `oid`
    pub fn advance(&mut self, oid: ObjectId) {
        self.branches
            .insert(self.current_branch.clone(), Some(oid.clone()));
        self.head = oid;
    }

    /// Make `branch` current, with head at its tip
    pub fn switch_to(&mut self, branch: BranchName, tip: ObjectId) {
        self.branches.insert(branch.clone(), Some(tip.clone()));
        self.current_branch = branch;
        self.head = tip;
    }

    /// Restore branch tips recorded by a commit
    ///
    /// Only branches that still exist are moved, and entries without a tip are skipped.
    pub fn replay_snapshot(&mut self, snapshot: &BranchSnapshot) {
        for (name, tip) in snapshot {
            let Some(tip) = tip else { continue };

            if let Ok(branch) = BranchName::try_parse(name.clone())
                && let Some(current_tip) = self.branches.get_mut(&branch)
            {
                *current_tip = Some(tip.clone());
            }
        }
    }

    /// Load the registry file, returning the staged removals persisted with it
    pub fn rehydrate(&mut self) -> anyhow::Result<BTreeSet<String>> {
        let mut registry_file = std::fs::OpenOptions::new()
            .read(true)
            .open(self.path())
            .with_context(|| format!("failed to open registry file at {:?}", self.path))?;
        let lock = file_guard::lock(&mut registry_file, file_guard::Lock::Shared, 0, 1)?;

        let content = Checksum::new(lock).read_verified()?;
        let content =
            String::from_utf8(content.to_vec()).context("Invalid registry: content is not UTF-8")?;

        let mut current_branch = None;
        let mut head = None;
        let mut branches = BranchTips::new();
        let mut removals = BTreeSet::new();

        for line in content.lines() {
            let (key, value) = line
                .split_once(' ')
                .with_context(|| format!("Invalid registry: malformed line {line:?}"))?;

            match key {
                "current" => current_branch = Some(BranchName::try_parse(value.to_string())?),
                "head" => head = Some(ObjectId::try_parse(value.to_string())?),
                "branch" => {
                    let (tip, name) = value
                        .split_once(' ')
                        .context("Invalid registry: invalid branch line")?;
                    let tip = if tip == NO_COMMIT_MARKER {
                        None
                    } else {
                        Some(ObjectId::try_parse(tip.to_string())?)
                    };
                    branches.insert(BranchName::try_parse(name.to_string())?, tip);
                }
                "removed" => {
                    removals.insert(value.to_string());
                }
                _ => anyhow::bail!("Invalid registry: unknown field {key:?}"),
            }
        }

        self.current_branch = current_branch.context("Invalid registry: missing current branch")?;
        self.head = head.context("Invalid registry: missing head")?;
        self.branches = branches;
        tracing::debug!(
            branch = %self.current_branch,
            head = %self.head,
            branches = self.branches.len(),
            "loaded registry"
        );

        Ok(removals)
    }

    /// Persist the registry together with the staged removals
    ///
    /// The file is written next to the registry and renamed over it, so a crash leaves
    /// either the old or the new state. Callers hold the lock from
    /// [`Registry::open_lock_file`] across the load and the save.
    pub fn write_updates(&self, removals: &BTreeSet<String>) -> anyhow::Result<()> {
        let mut lines = vec![
            format!("current {}", self.current_branch),
            format!("head {}", self.head),
        ];
        for (name, tip) in &self.branches {
            let tip = tip.as_ref().map_or(NO_COMMIT_MARKER, |oid| oid.as_ref());
            lines.push(format!("branch {tip} {name}"));
        }
        for path in removals {
            lines.push(format!("removed {path}"));
        }
        let mut content = lines.join("\n");
        content.push('\n');

        let registry_dir = self
            .path
            .parent()
            .with_context(|| format!("Invalid registry path {:?}", self.path))?;
        let temp_path = registry_dir.join(format!("tmp-registry-{}", rand::random::<u32>()));

        {
            let mut registry_file = std::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&temp_path)
                .with_context(|| format!("failed to open registry file at {:?}", temp_path))?;
            let lock = file_guard::lock(&mut registry_file, file_guard::Lock::Exclusive, 0, 1)?;

            let mut writer = Checksum::new(lock);
            writer.write(content.as_bytes())?;
            writer.write_checksum()?;
        }

        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("failed to replace registry file at {:?}", self.path))?;
        tracing::debug!(head = %self.head, "saved registry");

        Ok(())
    }
}
