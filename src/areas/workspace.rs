//! Working directory access
//!
//! Files are addressed by their path relative to the working directory root, with `/`
//! separators, which is also how they are keyed in commits and the staging area. The
//! repository directory itself is never listed or touched.

use crate::areas::repository::REPOSITORY_DIR;
use crate::artifacts::checkout::migration::{ActionType, Migration};
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::objects::blob::Blob;
use anyhow::Context;
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// List every regular file below the root, sorted by path
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        let mut files = WalkDir::new(&self.path)
            .min_depth(1)
            .into_iter()
            .filter_entry(|entry| entry.file_name() != REPOSITORY_DIR)
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| self.relative_name(entry.path()))
            .collect::<Vec<_>>();
        files.sort();

        Ok(files)
    }

    fn relative_name(&self, path: &Path) -> Option<String> {
        let relative_path = path.strip_prefix(self.path.as_ref()).ok()?;
        let components = relative_path
            .components()
            .map(|component| match component {
                Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()?;

        Some(components.join("/"))
    }

    /// Turn a user-supplied path into the form files are tracked under
    ///
    /// `./` segments are dropped and absolute paths below the root are made relative.
    /// Paths leaving the root or entering the repository directory are rejected, and so
    /// are names with control characters, which the line-based registry and commit
    /// formats cannot hold.
    pub fn normalize_path(&self, file_name: &str) -> anyhow::Result<String> {
        let invalid = || RepositoryError::InvalidPath(file_name.to_string());

        if file_name.chars().any(char::is_control) {
            return Err(invalid().into());
        }

        let path = Path::new(file_name);
        let relative_path = if path.is_absolute() {
            path.strip_prefix(self.path.as_ref()).map_err(|_| invalid())?
        } else {
            path
        };

        let mut components = Vec::new();
        for component in relative_path.components() {
            match component {
                Component::CurDir => {}
                Component::Normal(name) => components.push(name.to_str().ok_or_else(invalid)?),
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(invalid().into());
                }
            }
        }

        match components.first() {
            None => Err(invalid().into()),
            Some(&first) if first == REPOSITORY_DIR => Err(invalid().into()),
            Some(_) => Ok(components.join("/")),
        }
    }

    fn full_path(&self, file_name: &str) -> PathBuf {
        self.path.join(file_name)
    }

    pub fn file_exists(&self, file_name: &str) -> bool {
        self.full_path(file_name).is_file()
    }

    pub fn read_file(&self, file_name: &str) -> anyhow::Result<Bytes> {
        let file_path = self.full_path(file_name);

        let content = std::fs::read(&file_path)
            .with_context(|| format!("Failed to read file: {:?}", file_path))?;

        Ok(Bytes::from(content))
    }

    /// Snapshot a working-directory file as a blob named after its path
    pub fn parse_blob(&self, file_name: &str) -> anyhow::Result<Blob> {
        let content = self.read_file(file_name)?;
        Ok(Blob::new(file_name.to_string(), content))
    }

    /// Write `content` to the file, creating parent directories as needed
    ///
    /// A directory standing where the file should go is removed first.
    pub fn write_file(&self, file_name: &str, content: &[u8]) -> anyhow::Result<()> {
        let file_path = self.full_path(file_name);

        if file_path.is_dir() {
            std::fs::remove_dir_all(&file_path).with_context(|| {
                format!("Failed to remove existing directory: {:?}", file_path)
            })?;
        }

        if let Some(parent) = file_path.parent() {
            self.make_directory(parent)?;
        }

        std::fs::write(&file_path, content)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))
    }

    /// Delete the file if present and prune the directories it leaves empty
    pub fn remove_file(&self, file_name: &str) -> anyhow::Result<()> {
        let file_path = self.full_path(file_name);

        if file_path.is_file() {
            std::fs::remove_file(&file_path)
                .with_context(|| format!("Failed to remove file: {:?}", file_path))?;
        }

        if let Some(parent) = file_path.parent() {
            self.prune_empty_dirs(parent)?;
        }

        Ok(())
    }

    // deletions go first so that a file replaced by a directory (or the reverse) is out of
    // the way before anything is written
    pub fn apply_migration(&self, migration: &Migration) -> anyhow::Result<()> {
        self.apply_migration_action_set(migration, ActionType::Delete)?;
        self.apply_migration_action_set(migration, ActionType::Modify)?;
        self.apply_migration_action_set(migration, ActionType::Add)?;

        Ok(())
    }

    fn apply_migration_action_set(
        &self,
        migration: &Migration,
        action: ActionType,
    ) -> anyhow::Result<()> {
        migration
            .actions()
            .get(&action)
            .ok_or_else(|| anyhow::anyhow!("Invalid action type"))?
            .iter()
            .map(|(file_name, oid)| match (&action, oid) {
                (ActionType::Delete, None) => self.remove_file(file_name),
                (ActionType::Add | ActionType::Modify, Some(oid)) => {
                    let data = migration.load_blob_data(oid)?;
                    self.write_file(file_name, &data)
                }
                _ => Err(anyhow::anyhow!("Invalid action and entry combination")),
            })
            .collect::<anyhow::Result<Vec<()>>>()?;

        Ok(())
    }

    fn make_directory(&self, dir_path: &Path) -> anyhow::Result<()> {
        // a file standing where a directory should go is removed first
        for ancestor in dir_path
            .ancestors()
            .take_while(|ancestor| ancestor.starts_with(self.path.as_ref()))
        {
            if ancestor.is_file() {
                std::fs::remove_file(ancestor)
                    .with_context(|| format!("Failed to remove file: {:?}", ancestor))?;
            }
        }

        std::fs::create_dir_all(dir_path)
            .with_context(|| format!("Failed to create directory: {:?}", dir_path))
    }

    fn prune_empty_dirs(&self, dir_path: &Path) -> anyhow::Result<()> {
        if dir_path != self.path.as_ref()
            && dir_path.starts_with(self.path.as_ref())
            && dir_path.is_dir()
            && dir_path.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(dir_path)
                .with_context(|| format!("Failed to remove empty directory: {:?}", dir_path))?;

            if let Some(parent) = dir_path.parent() {
                self.prune_empty_dirs(parent)?;
            }
        }

        Ok(())
    }
}
