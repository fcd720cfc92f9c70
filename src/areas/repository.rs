//! Repository aggregate
//!
//! Ties the object store, the staging area, the branch registry and the working
//! directory together. Commands run inside [`Repository::transaction`], which loads the
//! persisted state, runs the operation and saves the state only when the operation
//! succeeds, so a reported failure never leaves partial registry or staging updates.
//!
//! ## Layout
//!
//! ```text
//! <root>/.twig/objects/   permanent object store
//! <root>/.twig/staging/   blobs pending inclusion in the next commit
//! <root>/.twig/registry   branches, current branch, head and staged removals
//! <root>/.twig/registry.lock   held exclusively for the duration of a command
//! ```

use crate::areas::database::Database;
use crate::areas::registry::Registry;
use crate::areas::staging::StagingArea;
use crate::areas::workspace::Workspace;
use crate::artifacts::checkout::conflict::UntrackedFiles;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::objects::commit::{Commit, FileMap};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

/// Name of the directory holding the repository state
pub const REPOSITORY_DIR: &str = ".twig";

const OBJECTS_DIR: &str = "objects";
const STAGING_DIR: &str = "staging";
const REGISTRY_FILE: &str = "registry";

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    workspace: Workspace,
    staging: StagingArea,
    registry: Registry,
}

impl Repository {
    pub fn new(path: impl AsRef<Path>, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = path
            .as_ref()
            .canonicalize()
            .with_context(|| format!("invalid working directory {:?}", path.as_ref()))?;
        let repository_path = path.join(REPOSITORY_DIR);

        Ok(Repository {
            database: Database::new(repository_path.join(OBJECTS_DIR).into_boxed_path()),
            staging: StagingArea::new(repository_path.join(STAGING_DIR).into_boxed_path()),
            registry: Registry::new(repository_path.join(REGISTRY_FILE).into_boxed_path()),
            workspace: Workspace::new(path.clone().into_boxed_path()),
            writer: RefCell::new(writer),
            path: path.into_boxed_path(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn repository_path(&self) -> PathBuf {
        self.path.join(REPOSITORY_DIR)
    }

    pub fn is_initialized(&self) -> bool {
        self.repository_path().is_dir()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn staging(&self) -> &StagingArea {
        &self.staging
    }

    pub fn staging_mut(&mut self) -> &mut StagingArea {
        &mut self.staging
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Run `operation` against the persisted repository state
    ///
    /// The state is loaded first and written back only if `operation` succeeds. The
    /// registry lock is held throughout, so concurrent commands run one after another.
    pub fn transaction<T>(
        &mut self,
        operation: impl FnOnce(&mut Self) -> anyhow::Result<T>,
    ) -> anyhow::Result<T> {
        if !self.is_initialized() {
            return Err(RepositoryError::NotInitialized.into());
        }

        let mut lock_file = self.registry.open_lock_file()?;
        let _lock = file_guard::lock(&mut lock_file, file_guard::Lock::Exclusive, 0, 1)
            .context("failed to lock the registry")?;

        self.rehydrate()?;
        let result = operation(self)?;
        self.write_updates()?;

        Ok(result)
    }

    fn rehydrate(&mut self) -> anyhow::Result<()> {
        let removals = self.registry.rehydrate()?;
        self.staging.rehydrate(removals)
    }

    /// Save the registry, then drop the blobs the staging area let go of
    pub(crate) fn write_updates(&mut self) -> anyhow::Result<()> {
        self.registry.write_updates(self.staging.removals())?;
        self.staging.flush()
    }

    pub fn load_commit(&self, oid: &ObjectId) -> anyhow::Result<Commit> {
        self.database
            .parse_object_as_commit(oid)?
            .with_context(|| format!("object {oid} is not a commit"))
    }

    pub fn head_commit(&self) -> anyhow::Result<Commit> {
        self.load_commit(self.registry.head())
    }

    /// Fail if an untracked working-directory file would be overwritten by `incoming`
    pub fn ensure_no_untracked_overwrite(
        &self,
        head_files: &FileMap,
        incoming: &FileMap,
    ) -> anyhow::Result<()> {
        UntrackedFiles::new(&self.workspace, head_files, &self.staging)
            .ensure_none_in_the_way(incoming)
    }

    /// Replace the files of `current` in the working directory with those of `target`
    pub fn migrate_workspace(&self, current: &FileMap, target: &FileMap) -> anyhow::Result<()> {
        let migration = Migration::plan(&self.database, current, target);
        self.workspace.apply_migration(&migration)
    }
}
