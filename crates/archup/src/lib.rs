//! Archup - Markdown documentation with PlantUML diagrams from an
//! entity/relationship model.
//!
//! A workspace document declares entities, the relations between them and a
//! list of diagrams. Archup turns it into one Markdown document: overview
//! diagrams for tagged or listed groups of entities, and per-entity detail
//! sections with examples, descriptions and property tables.

pub mod compose;
pub mod config;
pub mod include;
pub mod render;
pub mod select;

mod error;

pub use archup_core::{identifier, semantic, workspace};
pub use archup_parser::error::Diagnostic;

pub use error::ArchupError;

use log::{debug, info, trace};

use archup_core::workspace::Workspace;

use compose::DocumentComposer;
use config::AppConfig;
use include::{DefaultFetcher, Fetch, IncludeResolver};
use render::DiagramRenderer;

/// Builder for loading workspace documents and generating Markdown.
///
/// The builder owns one [`IncludeResolver`], so every document it renders
/// shares the include cache: the styling include is fetched once per builder.
///
/// # Examples
///
/// ```rust,no_run
/// use archup::{DocumentBuilder, config::AppConfig};
///
/// let source = r#"
/// datamodel:
///   description: Shop
///   entities:
///     order:
///       name: Order
/// diagrams:
///   - name: Overview
///     type: overview
/// "#;
///
/// let builder = DocumentBuilder::new(AppConfig::default());
///
/// // Load the document into a workspace
/// let workspace = builder.parse(source)
///     .expect("Failed to parse");
///
/// // Generate the Markdown document
/// let markdown = builder.render_markdown(&workspace)
///     .expect("Failed to render");
///
/// // Or use default config
/// let builder = DocumentBuilder::default();
/// ```
pub struct DocumentBuilder<F: Fetch = DefaultFetcher> {
    config: AppConfig,
    includes: IncludeResolver<F>,
}

impl DocumentBuilder {
    /// Create a new document builder with the given configuration.
    ///
    /// Includes are read from disk or, with the `remote` feature, over HTTP
    /// using the configured timeout.
    pub fn new(config: AppConfig) -> Self {
        let fetcher = DefaultFetcher::new(config.fetch().timeout());
        Self::with_fetcher(config, fetcher)
    }
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl<F: Fetch> DocumentBuilder<F> {
    /// Create a document builder that reads includes through `fetcher`.
    pub fn with_fetcher(config: AppConfig, fetcher: F) -> Self {
        Self {
            config,
            includes: IncludeResolver::new(fetcher),
        }
    }

    /// Parse a workspace document.
    ///
    /// # Errors
    ///
    /// Returns [`ArchupError::Parse`] if the document is malformed or fails
    /// validation. Warnings are logged and do not fail the parse.
    pub fn parse(&self, source: &str) -> Result<Workspace, ArchupError> {
        info!("Parsing workspace document");

        let workspace = archup_parser::parse(source)
            .map_err(|err| ArchupError::new_parse_error(err, source))?;

        debug!("Workspace parsed successfully");
        trace!(workspace:?; "Parsed workspace");

        Ok(workspace)
    }

    /// Validate a workspace document without generating anything.
    ///
    /// Returns the warnings found in an otherwise valid document.
    ///
    /// # Errors
    ///
    /// Returns [`ArchupError::Parse`] if the document is malformed or fails
    /// validation.
    pub fn validate(&self, source: &str) -> Result<Vec<Diagnostic>, ArchupError> {
        info!("Validating workspace document");

        let (_, warnings) = archup_parser::parse_with_warnings(source)
            .map_err(|err| ArchupError::new_parse_error(err, source))?;

        Ok(warnings)
    }

    /// Generate the Markdown document for `workspace`.
    ///
    /// # Errors
    ///
    /// Returns [`ArchupError::Include`] if the styling include, or anything it
    /// includes, cannot be read.
    pub fn render_markdown(&self, workspace: &Workspace) -> Result<String, ArchupError> {
        info!(diagrams_len = workspace.diagrams().len(); "Rendering document");

        let render = self.config.render();
        let renderer = DiagramRenderer::new(&self.includes)
            .with_styling_include(render.styling_include())
            .with_default_direction(render.default_direction().clone());
        let markdown = DocumentComposer::new(renderer)
            .with_title(self.config.document().title())
            .compose(workspace)?;

        info!(
            cached_includes = self.includes.cached_count();
            "Document rendered successfully",
        );
        Ok(markdown)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Borrow the include resolver and its cache.
    pub fn includes(&self) -> &IncludeResolver<F> {
        &self.includes
    }
}
