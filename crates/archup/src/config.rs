//! Configuration types for document generation.
//!
//! All types implement [`serde::Deserialize`] so the CLI can load them from a
//! TOML file. Every field has a default, so an empty file is a valid
//! configuration.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`RenderConfig`] - Styling include and default arrow direction.
//! - [`FetchConfig`] - Limits for reading remote includes.
//! - [`DocumentConfig`] - Document-level text such as the title.
//!
//! # Example
//!
//! ```
//! # use archup::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.document().title(), "Concepts");
//! assert_eq!(config.render().default_direction().as_str(), "D");
//! ```

use std::time::Duration;

use serde::Deserialize;

use archup_core::semantic::Direction;

use crate::{compose::DEFAULT_TITLE, include::Locator, render::DEFAULT_STYLING_INCLUDE};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Diagram rendering section.
    #[serde(default)]
    render: RenderConfig,

    /// Include fetching section.
    #[serde(default)]
    fetch: FetchConfig,

    /// Document section.
    #[serde(default)]
    document: DocumentConfig,
}

impl AppConfig {
    pub fn new(render: RenderConfig, fetch: FetchConfig, document: DocumentConfig) -> Self {
        Self {
            render,
            fetch,
            document,
        }
    }

    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    pub fn fetch(&self) -> &FetchConfig {
        &self.fetch
    }

    pub fn document(&self) -> &DocumentConfig {
        &self.document
    }
}

/// How diagrams are rendered.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// File path or URL of the PlantUML styling inlined into every diagram.
    #[serde(default = "default_styling_include")]
    styling_include: String,

    /// Arrow direction for relations without a layout entry.
    #[serde(default)]
    default_direction: Direction,
}

impl RenderConfig {
    pub fn new(styling_include: impl Into<String>, default_direction: Direction) -> Self {
        Self {
            styling_include: styling_include.into(),
            default_direction,
        }
    }

    /// Returns the styling include as a [`Locator`].
    pub fn styling_include(&self) -> Locator {
        Locator::parse(&self.styling_include)
    }

    pub fn default_direction(&self) -> &Direction {
        &self.default_direction
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_STYLING_INCLUDE, Direction::default())
    }
}

fn default_styling_include() -> String {
    DEFAULT_STYLING_INCLUDE.to_string()
}

/// Limits for include fetching.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FetchConfig {
    /// Seconds before a remote request is abandoned.
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
}

impl FetchConfig {
    pub fn new(timeout_secs: u64) -> Self {
        Self { timeout_secs }
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT_SECS)
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Document-level settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentConfig {
    /// Second-level heading at the top of the document.
    #[serde(default = "default_title")]
    title: String,
}

impl DocumentConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE)
    }
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}
