// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Disposable workspace lifecycle and path containment.
//!
//! The sandbox owns a `projects` tree under a dedicated root. Every path
//! handed out for a project is checked lexically against that project's
//! root; escaping it is a boundary violation, reported without touching the
//! filesystem.

use crate::error::{HarnessError, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Root directory tree holding every provisioned project for one test run.
#[derive(Clone, Debug)]
pub struct Sandbox {
    root: PathBuf,
}

impl Sandbox {
    /// Create a sandbox rooted at `root`. No directories are created until
    /// [`Sandbox::reset`] runs.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Sandbox root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding all provisioned projects.
    pub fn projects_dir(&self) -> PathBuf {
        self.root.join("projects")
    }

    /// Root directory of one named project.
    pub fn project_dir(&self, name: &str) -> PathBuf {
        self.projects_dir().join(name)
    }

    /// Destructively remove and recreate the `projects` directory.
    ///
    /// Idempotent: any number of calls leaves the same empty state.
    pub fn reset(&self) -> Result<()> {
        let projects = self.projects_dir();
        match fs::remove_dir_all(&projects) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }
        fs::create_dir_all(&projects)?;
        Ok(())
    }

    /// Create one project's root directory.
    pub fn create_project(&self, name: &str) -> Result<PathBuf> {
        let dir = self.project_dir(name);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Resolve `sub` against the named project's root.
    ///
    /// The sub-path is normalized lexically; if it does not remain a
    /// descendant of the project root the call fails with
    /// [`HarnessError::PathEscape`].
    pub fn resolve(&self, name: &str, sub: &Path) -> Result<PathBuf> {
        let root = self.project_dir(name);
        let escape = || HarnessError::PathEscape {
            path: sub.to_path_buf(),
            root: root.clone(),
        };

        let mut normalized = PathBuf::new();
        for component in sub.components() {
            match component {
                Component::Normal(part) => normalized.push(part),
                Component::CurDir => {}
                Component::ParentDir => {
                    if !normalized.pop() {
                        return Err(escape());
                    }
                }
                Component::RootDir | Component::Prefix(_) => return Err(escape()),
            }
        }
        Ok(root.join(normalized))
    }
}

#[cfg(test)]
#[path = "sandbox_tests.rs"]
mod tests;
