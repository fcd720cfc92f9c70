//! Staging area
//!
//! Tracks what the next commit changes relative to the head commit:
//!
//! - `additions`: path → id of a blob persisted in the staging side store
//! - `removals`: paths to drop from the next snapshot even though head tracks them
//!
//! Additions are keyed by path, so staging a file twice keeps only its latest content.
//! They are rebuilt from the side store on load; removals are persisted with the
//! registry. Both are cleared by a successful commit or branch checkout.
//!
//! Blobs dropped from the side store are only deleted by [`StagingArea::flush`], which
//! the repository calls once the registry has been saved. Until then a failed operation
//! still finds its staged additions on the next load.

use crate::areas::database::Database;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::FileMap;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

#[derive(Debug)]
pub struct StagingArea {
    /// Side store holding the staged blobs
    store: Database,
    additions: BTreeMap<String, ObjectId>,
    removals: BTreeSet<String>,
    /// Side-store blobs to delete on the next flush
    discarded: Vec<ObjectId>,
}

impl StagingArea {
    pub fn new(path: Box<Path>) -> Self {
        StagingArea {
            store: Database::new(path),
            additions: BTreeMap::new(),
            removals: BTreeSet::new(),
            discarded: Vec::new(),
        }
    }

    pub fn store_path(&self) -> &Path {
        self.store.objects_path()
    }

    /// Load staged additions from the side store and take over the persisted removals
    pub fn rehydrate(&mut self, removals: BTreeSet<String>) -> anyhow::Result<()> {
        self.additions.clear();
        self.discarded.clear();

        for oid in self.store.list_objects()? {
            let blob = self
                .store
                .parse_object_as_blob(&oid)?
                .with_context(|| format!("staged object {oid} is not a blob"))?;
            self.additions.insert(blob.name().to_string(), oid);
        }
        self.removals = removals;

        Ok(())
    }

    pub fn additions(&self) -> &BTreeMap<String, ObjectId> {
        &self.additions
    }

    pub fn removals(&self) -> &BTreeSet<String> {
        &self.removals
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    /// Whether exactly this blob is pending addition under its path
    pub fn is_staged(&self, path: &str, oid: &ObjectId) -> bool {
        self.additions.get(path) == Some(oid)
    }

    /// Stage a working-directory snapshot of a file
    ///
    /// When the blob matches what head already tracks, any pending addition for the path
    /// is dropped instead and the path is no longer marked for removal.
    pub fn stage(&mut self, blob: &Blob, head_files: &FileMap) -> anyhow::Result<()> {
        let oid = blob.object_id()?;
        let path = blob.name().to_string();

        self.removals.remove(&path);

        if head_files.get(&path) == Some(&oid) {
            self.unstage(&path)?;
            tracing::debug!(%path, "file matches head, nothing staged");
            return Ok(());
        }

        if let Some(previous) = self.additions.insert(path.clone(), oid.clone())
            && previous != oid
        {
            self.discarded.push(previous);
        }
        self.store.store(blob)?;
        tracing::debug!(%path, %oid, "staged file");

        Ok(())
    }

    /// Drop the pending addition for `path`, returning whether there was one
    pub fn unstage(&mut self, path: &str) -> anyhow::Result<bool> {
        match self.additions.remove(path) {
            Some(oid) => {
                self.discarded.push(oid);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn mark_removed(&mut self, path: &str) {
        self.removals.insert(path.to_string());
    }

    /// Load every staged blob, in path order
    pub fn staged_blobs(&self) -> anyhow::Result<Vec<Blob>> {
        self.additions
            .values()
            .map(|oid| {
                self.store
                    .parse_object_as_blob(oid)?
                    .with_context(|| format!("staged object {oid} is not a blob"))
            })
            .collect()
    }

    /// The snapshot of the next commit: `parent_files` with additions overlaid and
    /// removals dropped
    pub fn build_snapshot(&self, parent_files: &FileMap) -> FileMap {
        let mut files = parent_files.clone();
        files.extend(
            self.additions
                .iter()
                .map(|(path, oid)| (path.clone(), oid.clone())),
        );
        files.retain(|path, _| !self.removals.contains(path));

        files
    }

    pub fn clear(&mut self) {
        self.discarded
            .extend(std::mem::take(&mut self.additions).into_values());
        self.removals.clear();
    }

    /// Delete the blobs dropped since the last load from the side store
    pub fn flush(&mut self) -> anyhow::Result<()> {
        for oid in std::mem::take(&mut self.discarded) {
            if !self.additions.values().any(|staged| staged == &oid) {
                self.store.remove(&oid)?;
            }
        }

        Ok(())
    }
}
