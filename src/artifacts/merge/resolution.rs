//! Three-way file resolution
//!
//! Every path in the union of the base, head and target snapshots is classified on its
//! own. A path's state is the blob id a snapshot maps it to, or absence. The rules, in
//! order:
//!
//! | head vs target | base vs target | base vs head | result        |
//! |----------------|----------------|--------------|---------------|
//! | equal          |                |              | head's state  |
//! |                | equal          |              | head's state  |
//! |                |                | equal        | target's state|
//! | otherwise      |                |              | conflict      |
//!
//! A conflicting path gets a fresh blob holding both sides between conflict markers.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::FileMap;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::{BufMut, Bytes, BytesMut};
use std::collections::BTreeSet;

const CONFLICT_HEAD_MARKER: &[u8] = b"<<<<<<< HEAD\n";
const CONFLICT_SEPARATOR: &[u8] = b"=======\n";
const CONFLICT_TARGET_MARKER: &[u8] = b">>>>>>>\n";

/// How a single path comes out of a merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileResolution {
    /// The path maps to this blob in the merged snapshot
    Keep(ObjectId),
    /// The path is absent from the merged snapshot
    Delete,
    /// Both sides changed the path differently
    Conflict {
        head: Option<ObjectId>,
        target: Option<ObjectId>,
    },
}

impl FileResolution {
    fn from_state(state: Option<&ObjectId>) -> Self {
        match state {
            Some(oid) => FileResolution::Keep(oid.clone()),
            None => FileResolution::Delete,
        }
    }
}

/// Classify one path from its state in the base, head and target snapshots
pub fn resolve_file(
    base: Option<&ObjectId>,
    head: Option<&ObjectId>,
    target: Option<&ObjectId>,
) -> FileResolution {
    if head == target || base == target {
        FileResolution::from_state(head)
    } else if base == head {
        FileResolution::from_state(target)
    } else {
        FileResolution::Conflict {
            head: head.cloned(),
            target: target.cloned(),
        }
    }
}

/// Content of a conflicted file; a missing side leaves its section empty
pub fn conflict_content(head: Option<&[u8]>, target: Option<&[u8]>) -> Bytes {
    let mut content = BytesMut::new();

    content.put_slice(CONFLICT_HEAD_MARKER);
    content.put_slice(head.unwrap_or_default());
    content.put_slice(CONFLICT_SEPARATOR);
    content.put_slice(target.unwrap_or_default());
    content.put_slice(CONFLICT_TARGET_MARKER);

    content.freeze()
}

/// Result of merging three snapshots
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeResolution {
    /// The merged path → blob id snapshot, conflict blobs included
    pub files: FileMap,
    /// Blobs created for conflicted paths, not yet in the object store
    pub conflict_blobs: Vec<Blob>,
}

impl MergeResolution {
    pub fn has_conflicts(&self) -> bool {
        !self.conflict_blobs.is_empty()
    }
}

/// Merges snapshots path by path
///
/// Blob contents are only needed for conflicted paths and are fetched through
/// `blob_loader`.
pub struct ThreeWayMerge<'s, BlobLoaderFn>
where
    BlobLoaderFn: Fn(&ObjectId) -> anyhow::Result<Bytes>,
{
    base: &'s FileMap,
    head: &'s FileMap,
    target: &'s FileMap,
    blob_loader: BlobLoaderFn,
}

impl<'s, BlobLoaderFn> ThreeWayMerge<'s, BlobLoaderFn>
where
    BlobLoaderFn: Fn(&ObjectId) -> anyhow::Result<Bytes>,
{
    pub fn new(
        base: &'s FileMap,
        head: &'s FileMap,
        target: &'s FileMap,
        blob_loader: BlobLoaderFn,
    ) -> Self {
        ThreeWayMerge {
            base,
            head,
            target,
            blob_loader,
        }
    }

    fn all_paths(&self) -> BTreeSet<&'s String> {
        self.base
            .keys()
            .chain(self.head.keys())
            .chain(self.target.keys())
            .collect()
    }

    fn load(&self, oid: Option<&ObjectId>) -> anyhow::Result<Option<Bytes>> {
        oid.map(|oid| (self.blob_loader)(oid)).transpose()
    }

    pub fn resolve(&self) -> anyhow::Result<MergeResolution> {
        let mut resolution = MergeResolution::default();

        for path in self.all_paths() {
            let outcome = resolve_file(
                self.base.get(path),
                self.head.get(path),
                self.target.get(path),
            );
            tracing::trace!(%path, ?outcome, "resolved path");

            match outcome {
                FileResolution::Keep(oid) => {
                    resolution.files.insert(path.clone(), oid);
                }
                FileResolution::Delete => {}
                FileResolution::Conflict { head, target } => {
                    let head_content = self.load(head.as_ref())?;
                    let target_content = self.load(target.as_ref())?;
                    let blob = Blob::new(
                        path.clone(),
                        conflict_content(head_content.as_deref(), target_content.as_deref()),
                    );

                    resolution.files.insert(path.clone(), blob.object_id()?);
                    resolution.conflict_blobs.push(blob);
                }
            }
        }

        tracing::debug!(
            files = resolution.files.len(),
            conflicts = resolution.conflict_blobs.len(),
            "merged snapshots"
        );

        Ok(resolution)
    }
}
