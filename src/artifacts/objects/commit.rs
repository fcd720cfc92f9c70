//! Commit object
//!
//! Commits are full snapshots of the tracked file set, linked into a history graph.
//! They contain:
//! - The first parent id (absent only for the root commit)
//! - An optional merge parent id (only for merge commits)
//! - The creation timestamp and the branch that was current at creation
//! - The full path → blob id map (not a diff against the parent)
//! - The paths removed relative to the parent
//! - The state of every branch immediately before the commit was made
//! - The commit message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! parent <parent-id>
//! merge <merge-parent-id>
//! date <unix-seconds> <timezone>
//! branch <branch-name>
//! file <blob-id> <path>
//! removed <path>
//! snapshot <commit-id|-> <branch-name>
//!
//! <commit message>
//! ```

use crate::artifacts::objects::object::{Object, Packable, Unpackable, with_header};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset};
use std::collections::{BTreeMap, BTreeSet};
use std::io::BufRead;

/// Path → blob id snapshot of the tracked files
pub type FileMap = BTreeMap<String, ObjectId>;

/// Branch name → tip commit id; a branch has no tip before the root commit exists
pub type BranchSnapshot = BTreeMap<String, Option<ObjectId>>;

/// Message of the root commit created by `init`
pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

/// Environment variable overriding the commit timestamp
pub const COMMIT_DATE_ENV: &str = "TWIG_COMMIT_DATE";

const NO_COMMIT_MARKER: &str = "-";

/// Slim representation of a commit
///
/// Only what the merge base search needs: the id and the parents, first parent first.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SlimCommit {
    pub oid: ObjectId,
    pub parents: Vec<ObjectId>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    parent: Option<ObjectId>,
    merge_parent: Option<ObjectId>,
    timestamp: DateTime<FixedOffset>,
    branch: String,
    files: FileMap,
    removed: BTreeSet<String>,
    branches: BranchSnapshot,
    message: String,
}

impl Commit {
    /// Create a regular commit on top of `parent`
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        parent: ObjectId,
        merge_parent: Option<ObjectId>,
        timestamp: DateTime<FixedOffset>,
        branch: String,
        files: FileMap,
        removed: BTreeSet<String>,
        branches: BranchSnapshot,
        message: String,
    ) -> Self {
        Commit {
            parent: Some(parent),
            merge_parent,
            timestamp,
            branch,
            files,
            removed,
            branches,
            message,
        }
    }

    /// Create the parentless commit every history starts from
    ///
    /// The root commit is dated at the Unix epoch so that its id only depends on the
    /// branch layout it was created with.
    pub fn root(branch: String, branches: BranchSnapshot) -> Self {
        Commit {
            parent: None,
            merge_parent: None,
            timestamp: DateTime::UNIX_EPOCH.fixed_offset(),
            branch,
            files: FileMap::new(),
            removed: BTreeSet::new(),
            branches,
            message: INITIAL_COMMIT_MESSAGE.to_string(),
        }
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn merge_parent(&self) -> Option<&ObjectId> {
        self.merge_parent.as_ref()
    }

    /// All parents, first parent first
    pub fn parents(&self) -> Vec<ObjectId> {
        self.parent
            .iter()
            .chain(self.merge_parent.iter())
            .cloned()
            .collect()
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Thu Jan 1 00:00:00 1970 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp.format("%a %b %-d %H:%M:%S %Y %z").to_string()
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn files(&self) -> &FileMap {
        &self.files
    }

    pub fn file(&self, path: &str) -> Option<&ObjectId> {
        self.files.get(path)
    }

    pub fn removed(&self) -> &BTreeSet<String> {
        &self.removed
    }

    pub fn branches(&self) -> &BranchSnapshot {
        &self.branches
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    fn header_lines(&self) -> Vec<String> {
        let mut lines = vec![];

        if let Some(parent) = &self.parent {
            lines.push(format!("parent {parent}"));
        }
        if let Some(merge_parent) = &self.merge_parent {
            lines.push(format!("merge {merge_parent}"));
        }
        lines.push(format!(
            "date {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        ));
        lines.push(format!("branch {}", self.branch));
        for (path, oid) in &self.files {
            lines.push(format!("file {oid} {path}"));
        }
        for path in &self.removed {
            lines.push(format!("removed {path}"));
        }
        for (branch, tip) in &self.branches {
            let tip = tip.as_ref().map_or(NO_COMMIT_MARKER, |oid| oid.as_ref());
            lines.push(format!("snapshot {tip} {branch}"));
        }

        lines
    }
}

/// Resolve the timestamp for a new commit
///
/// Reads `TWIG_COMMIT_DATE` (RFC 2822 or `%Y-%m-%d %H:%M:%S %z`) and falls back to the
/// current local time when it is unset or unparsable.
pub fn load_timestamp_from_env() -> DateTime<FixedOffset> {
    std::env::var(COMMIT_DATE_ENV)
        .ok()
        .and_then(|date_str| {
            DateTime::parse_from_rfc2822(&date_str)
                .or_else(|_| DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                .ok()
        })
        .unwrap_or_else(|| chrono::Local::now().fixed_offset())
}

fn parse_timestamp(value: &str) -> anyhow::Result<DateTime<FixedOffset>> {
    DateTime::parse_from_str(value, "%s %z")
        .with_context(|| format!("Invalid commit object: invalid date {value:?}"))
}

fn parse_tip(value: &str) -> anyhow::Result<Option<ObjectId>> {
    if value == NO_COMMIT_MARKER {
        Ok(None)
    } else {
        Ok(Some(ObjectId::try_parse(value.to_string())?))
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut object_content = self.header_lines().join("\n");
        object_content.push_str("\n\n");
        object_content.push_str(&self.message);

        Ok(with_header(self.object_type(), object_content.as_bytes()))
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .context("Invalid commit object: content is not UTF-8")?;

        // the message is kept verbatim so that the commit hashes back to the same id
        let (header, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;

        let mut parent = None;
        let mut merge_parent = None;
        let mut timestamp = None;
        let mut branch = None;
        let mut files = FileMap::new();
        let mut removed = BTreeSet::new();
        let mut branches = BranchSnapshot::new();

        for line in header.lines() {
            let (key, value) = line
                .split_once(' ')
                .with_context(|| format!("Invalid commit object: malformed line {line:?}"))?;

            match key {
                "parent" => parent = Some(ObjectId::try_parse(value.to_string())?),
                "merge" => merge_parent = Some(ObjectId::try_parse(value.to_string())?),
                "date" => timestamp = Some(parse_timestamp(value)?),
                "branch" => branch = Some(value.to_string()),
                "file" => {
                    let (oid, path) = value
                        .split_once(' ')
                        .context("Invalid commit object: invalid file line")?;
                    files.insert(path.to_string(), ObjectId::try_parse(oid.to_string())?);
                }
                "removed" => {
                    removed.insert(value.to_string());
                }
                "snapshot" => {
                    let (tip, name) = value
                        .split_once(' ')
                        .context("Invalid commit object: invalid snapshot line")?;
                    branches.insert(name.to_string(), parse_tip(tip)?);
                }
                _ => anyhow::bail!("Invalid commit object: unknown field {key:?}"),
            }
        }

        Ok(Commit {
            parent,
            merge_parent,
            timestamp: timestamp.context("Invalid commit object: missing date line")?,
            branch: branch.context("Invalid commit object: missing branch line")?,
            files,
            removed,
            branches,
            message: message.to_string(),
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}
