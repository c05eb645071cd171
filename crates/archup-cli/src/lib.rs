//! Archup CLI library
//!
//! This module contains the core CLI logic for the archup documentation tool.

pub mod error_adapter;

mod args;
mod config;
mod project;

pub use args::{Args, Command};
pub use project::{Project, ProjectError};

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use log::{info, warn};
use tempfile::NamedTempFile;

use archup::{ArchupError, DocumentBuilder};

/// Run the archup CLI application
///
/// # Errors
///
/// Returns `ArchupError` for:
/// - File I/O errors
/// - Configuration and project file errors
/// - Parsing errors
/// - Include errors
pub fn run(args: &Args) -> Result<(), ArchupError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let builder = DocumentBuilder::new(app_config);

    match &args.command {
        Command::Build { project } => {
            let project = Project::load(project)?;
            info!(
                project = project.name(),
                input_path = project.datamodel_path().display().to_string(),
                output_path = project.markdown_path().display().to_string();
                "Building project"
            );
            let markdown = generate(&builder, project.datamodel_path())?;
            write_atomically(project.markdown_path(), &markdown)?;
            info!(output_file = project.markdown_path().display().to_string(); "Markdown written successfully");
        }
        Command::Render { input, output } => {
            info!(input_path = input; "Rendering document");
            let markdown = generate(&builder, Path::new(input))?;
            match output {
                Some(output) => {
                    write_atomically(Path::new(output), &markdown)?;
                    info!(output_file = output; "Markdown written successfully");
                }
                None => io::stdout().lock().write_all(markdown.as_bytes())?,
            }
        }
        Command::Validate { input } => {
            info!(input_path = input; "Validating document");
            let source = fs::read_to_string(input)?;
            let warnings = builder.validate(&source)?;
            for warning in &warnings {
                warn!("{warning}");
            }
            println!("OK");
        }
    }

    Ok(())
}

/// Read, parse and render one workspace document entirely in memory.
fn generate(builder: &DocumentBuilder, input: &Path) -> Result<String, ArchupError> {
    let source = fs::read_to_string(input)?;
    let workspace = builder.parse(&source)?;
    builder.render_markdown(&workspace)
}

/// Replace `path` with `contents` without ever leaving a partial file behind.
fn write_atomically(path: &Path, contents: &str) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|err| err.error)?;
    Ok(())
}
