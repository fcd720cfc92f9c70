use crate::areas::database::Database;
use crate::artifacts::objects::commit::FileMap;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use std::collections::HashMap;

/// Type of file system action required to move the working directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    /// Create a file the current snapshot does not track
    Add,
    /// Delete a file the target snapshot does not track
    Delete,
    /// Overwrite a file tracked by both snapshots
    Modify,
}

/// Planned actions grouped by type; deletions carry no blob
pub type ActionsSet = HashMap<ActionType, Vec<(String, Option<ObjectId>)>>;

/// Plan for moving the working directory from one snapshot to another
///
/// Every file of the target snapshot is (re)written, even when the current snapshot
/// tracks the same blob, so that local edits to tracked files are replaced as well.
/// Files tracked only by the current snapshot are deleted; untracked files are left
/// alone.
#[derive(Debug)]
pub struct Migration<'r> {
    database: &'r Database,
    actions: ActionsSet,
}

impl<'r> Migration<'r> {
    pub fn new(database: &'r Database) -> Self {
        let actions = HashMap::from([
            (ActionType::Add, Vec::new()),
            (ActionType::Delete, Vec::new()),
            (ActionType::Modify, Vec::new()),
        ]);

        Self { database, actions }
    }

    pub fn plan(database: &'r Database, current: &FileMap, target: &FileMap) -> Self {
        let mut migration = Self::new(database);

        for path in current.keys().filter(|path| !target.contains_key(*path)) {
            migration.record(ActionType::Delete, path, None);
        }

        for (path, oid) in target {
            let action = if current.contains_key(path) {
                ActionType::Modify
            } else {
                ActionType::Add
            };
            migration.record(action, path, Some(oid.clone()));
        }

        tracing::debug!(
            added = migration.count(ActionType::Add),
            modified = migration.count(ActionType::Modify),
            deleted = migration.count(ActionType::Delete),
            "planned working directory migration"
        );

        migration
    }

    fn record(&mut self, action: ActionType, path: &str, oid: Option<ObjectId>) {
        self.actions
            .entry(action)
            .or_default()
            .push((path.to_string(), oid));
    }

    fn count(&self, action: ActionType) -> usize {
        self.actions.get(&action).map_or(0, Vec::len)
    }

    pub fn actions(&self) -> &ActionsSet {
        &self.actions
    }

    pub fn load_blob_data(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let blob = self
            .database
            .parse_object_as_blob(object_id)?
            .with_context(|| format!("Failed to parse blob object {}", object_id))?;

        Ok(blob.content().clone())
    }
}
