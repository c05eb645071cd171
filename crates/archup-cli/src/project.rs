//! Project files.
//!
//! A project file (`archup.conf`) is a small YAML document naming the
//! workspace document to read and the Markdown file to write. Both paths are
//! relative to the directory holding the project file.
//!
//! ```yaml
//! name: Shop
//! datamodel:
//!   filename: datamodel.yaml
//!   markdown: docs/datamodel.md
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use archup::ArchupError;

const DEFAULT_NAME: &str = "Unnamed";

/// Project-file errors for CLI
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Failed to read project file {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("Invalid project file {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

impl From<ProjectError> for ArchupError {
    fn from(err: ProjectError) -> Self {
        ArchupError::Config(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct ProjectFile {
    #[serde(default = "default_name")]
    name: String,
    datamodel: DatamodelSection,
}

#[derive(Debug, Deserialize)]
struct DatamodelSection {
    filename: PathBuf,
    markdown: PathBuf,
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

/// A loaded project with its paths resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    name: String,
    datamodel: PathBuf,
    markdown: PathBuf,
}

impl Project {
    /// Load a project file.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError`] if the file cannot be read or lacks the
    /// `datamodel.filename` and `datamodel.markdown` entries.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProjectError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|err| ProjectError::Read {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        Self::from_source(&source, path)
    }

    /// Parse project file text read from `path`.
    pub fn from_source(source: &str, path: &Path) -> Result<Self, ProjectError> {
        let file: ProjectFile =
            serde_yaml::from_str(source).map_err(|err| ProjectError::Parse {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?;

        let dir = path.parent().unwrap_or_else(|| Path::new(""));
        let project = Self {
            name: file.name,
            datamodel: dir.join(file.datamodel.filename),
            markdown: dir.join(file.datamodel.markdown),
        };
        debug!(
            name = project.name.as_str(),
            datamodel = project.datamodel.display().to_string(),
            markdown = project.markdown.display().to_string();
            "Project loaded",
        );
        Ok(project)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the workspace document.
    pub fn datamodel_path(&self) -> &Path {
        &self.datamodel
    }

    /// Path of the Markdown file to generate.
    pub fn markdown_path(&self) -> &Path {
        &self.markdown
    }
}
