//! Merge base discovery
//!
//! The merge base of two commits is found with a breadth-first intersection walk:
//!
//! 1. Walk the history of the first commit breadth-first (first parent, then merge
//!    parent) and record the position at which every commit is first visited.
//! 2. Walk the history of the second commit breadth-first until a commit visited in
//!    step 1 comes up.
//! 3. Tie-break: the commit waiting next in the second walk's queue is examined too; if
//!    the first walk reached it earlier (it is closer to the first commit), it wins.
//!
//! This is a heuristic. On linear and simple merge histories it yields the lowest common
//! ancestor; with criss-cross merges it may return a common ancestor that is not minimal.

use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{HashMap, HashSet, VecDeque};

/// Finds the merge base of two commits
///
/// Commits are loaded on demand through `commit_loader`, so the finder works the same
/// over the object store and over in-memory graphs.
pub struct MergeBaseFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> MergeBaseFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    /// Every ancestor of `commit_id` (itself included) with its breadth-first position
    fn ancestor_positions(&self, commit_id: &ObjectId) -> anyhow::Result<HashMap<ObjectId, usize>> {
        let mut positions = HashMap::new();
        let mut queue = VecDeque::from([commit_id.clone()]);

        while let Some(current) = queue.pop_front() {
            if positions.contains_key(&current) {
                continue;
            }
            positions.insert(current.clone(), positions.len());

            let commit = (self.commit_loader)(&current)?;
            queue.extend(commit.parents);
        }

        Ok(positions)
    }

    /// Find the merge base of `head` and `target`
    ///
    /// Returns `None` only for commits with disjoint histories.
    pub fn find_merge_base(
        &self,
        head: &ObjectId,
        target: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let head_positions = self.ancestor_positions(head)?;

        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([target.clone()]);

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current.clone()) {
                continue;
            }

            if let Some(position) = head_positions.get(&current) {
                let base = match queue.front() {
                    Some(next) if head_positions.get(next).is_some_and(|next| next < position) => {
                        next.clone()
                    }
                    _ => current,
                };
                tracing::debug!(%head, %target, %base, "found merge base");

                return Ok(Some(base));
            }

            let commit = (self.commit_loader)(&current)?;
            queue.extend(commit.parents);
        }

        Ok(None)
    }
}
