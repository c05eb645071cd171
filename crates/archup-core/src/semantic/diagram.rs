//! Diagram declarations: what to draw, which sections to emit and how to
//! orient relation arrows.

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

use crate::{identifier::Id, semantic::Direction};

/// The two kinds of diagram a workspace can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramKind {
    /// One diagram for a seed set of entities and their direct neighbors.
    #[default]
    Overview,
    /// One section per selected entity.
    Details,
}

/// Error returned when a diagram kind name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown diagram kind `{0}`, expected `overview` or `details`")]
pub struct UnknownDiagramKind(pub String);

impl FromStr for DiagramKind {
    type Err = UnknownDiagramKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overview" => Ok(Self::Overview),
            "details" => Ok(Self::Details),
            other => Err(UnknownDiagramKind(other.to_string())),
        }
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overview => write!(f, "overview"),
            Self::Details => write!(f, "details"),
        }
    }
}

/// Section toggles for details diagrams. Every section is off unless enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Content {
    heading_prefix: bool,
    aka: bool,
    examples: bool,
    diagrams: bool,
    description: bool,
    properties: bool,
}

impl Content {
    /// Names accepted by [`Content::set`], as they appear in documents.
    pub const TOGGLES: [&'static str; 6] = [
        "headingPrefix",
        "aka",
        "examples",
        "diagrams",
        "description",
        "properties",
    ];

    /// Content with every section enabled.
    pub fn all() -> Self {
        Self {
            heading_prefix: true,
            aka: true,
            examples: true,
            diagrams: true,
            description: true,
            properties: true,
        }
    }

    /// Set a toggle by its document name.
    ///
    /// Returns `false`, leaving the content unchanged, if `name` is not one of
    /// [`Content::TOGGLES`].
    pub fn set(&mut self, name: &str, enabled: bool) -> bool {
        let slot = match name {
            "headingPrefix" => &mut self.heading_prefix,
            "aka" => &mut self.aka,
            "examples" => &mut self.examples,
            "diagrams" => &mut self.diagrams,
            "description" => &mut self.description,
            "properties" => &mut self.properties,
            _ => return false,
        };
        *slot = enabled;
        true
    }

    pub fn heading_prefix(&self) -> bool {
        self.heading_prefix
    }

    pub fn aka(&self) -> bool {
        self.aka
    }

    pub fn examples(&self) -> bool {
        self.examples
    }

    pub fn diagrams(&self) -> bool {
        self.diagrams
    }

    pub fn description(&self) -> bool {
        self.description
    }

    pub fn properties(&self) -> bool {
        self.properties
    }
}

/// Direction hints for one diagram, keyed by `<from>-<to>` entity pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutMap {
    entries: IndexMap<String, Direction>,
}

impl LayoutMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hint for the pair key `key`.
    pub fn with_entry(mut self, key: impl Into<String>, direction: impl Into<Direction>) -> Self {
        self.entries.insert(key.into(), direction.into());
        self
    }

    /// Build the pair key used for a relation from `from` to `to`.
    pub fn pair_key(from: Id, to: Id) -> String {
        format!("{from}-{to}")
    }

    /// Look up the hint stored under `from-to`.
    pub fn get(&self, from: Id, to: Id) -> Option<&Direction> {
        self.entries.get(&Self::pair_key(from, to))
    }

    /// Resolve the arrow direction for a relation from `from` to `to`.
    ///
    /// A `from-to` entry wins. Otherwise a `to-from` entry is used reversed.
    /// Otherwise `default` applies.
    ///
    /// # Examples
    ///
    /// ```
    /// use archup_core::{identifier::Id, semantic::{Direction, LayoutMap}};
    ///
    /// let layout = LayoutMap::new().with_entry("B-A", "L");
    /// let direction = layout.resolve(Id::new("A"), Id::new("B"), &Direction::default());
    /// assert_eq!(direction.as_str(), "R");
    /// ```
    pub fn resolve(&self, from: Id, to: Id, default: &Direction) -> Direction {
        if let Some(direction) = self.get(from, to) {
            return direction.clone();
        }
        self.get(to, from)
            .map(Direction::reversed)
            .unwrap_or_else(|| default.clone())
    }

    /// Iterate over `(key, direction)` entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Direction)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-diagram layout, split into scopes.
///
/// Overview diagrams read the [`Layout::OVERVIEW_SCOPE`] scope, details
/// diagrams read the scope named after the entity being detailed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    scopes: IndexMap<String, LayoutMap>,
}

impl Layout {
    /// Scope consulted by overview diagrams.
    pub const OVERVIEW_SCOPE: &'static str = "overview";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scope(mut self, scope: impl Into<String>, map: LayoutMap) -> Self {
        self.scopes.insert(scope.into(), map);
        self
    }

    /// Borrow the map for `scope`, if declared.
    pub fn scope(&self, scope: &str) -> Option<&LayoutMap> {
        self.scopes.get(scope)
    }

    /// Iterate over `(scope, map)` pairs in declaration order.
    pub fn scopes(&self) -> impl Iterator<Item = (&str, &LayoutMap)> {
        self.scopes.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// A declared diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramSpec {
    name: String,
    kind: DiagramKind,
    description: Option<String>,
    whitelist: Option<Vec<String>>,
    blacklist: Option<Vec<String>>,
    content: Content,
    layout: Layout,
}

impl DiagramSpec {
    pub fn new(name: impl Into<String>, kind: DiagramKind) -> Self {
        Self {
            name: name.into(),
            kind,
            description: None,
            whitelist: None,
            blacklist: None,
            content: Content::default(),
            layout: Layout::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Restrict the diagram to entity ids and `#tag` expressions.
    pub fn with_whitelist<S: Into<String>>(mut self, expressions: impl IntoIterator<Item = S>) -> Self {
        self.whitelist = Some(expressions.into_iter().map(Into::into).collect());
        self
    }

    /// Exclude entity ids and `#tag` expressions from the diagram.
    pub fn with_blacklist<S: Into<String>>(mut self, expressions: impl IntoIterator<Item = S>) -> Self {
        self.blacklist = Some(expressions.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_content(mut self, content: Content) -> Self {
        self.content = content;
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> DiagramKind {
        self.kind
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|text| !text.is_empty())
    }

    pub fn whitelist(&self) -> Option<&[String]> {
        self.whitelist.as_deref()
    }

    pub fn blacklist(&self) -> Option<&[String]> {
        self.blacklist.as_deref()
    }

    pub fn content(&self) -> Content {
        self.content
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagram_kind_from_str() {
        assert_eq!("overview".parse::<DiagramKind>(), Ok(DiagramKind::Overview));
        assert_eq!("details".parse::<DiagramKind>(), Ok(DiagramKind::Details));
        assert_eq!(
            "summary".parse::<DiagramKind>(),
            Err(UnknownDiagramKind("summary".to_string()))
        );
    }

    #[test]
    fn test_content_defaults_to_disabled() {
        let content = Content::default();
        assert!(!content.heading_prefix());
        assert!(!content.aka());
        assert!(!content.examples());
        assert!(!content.diagrams());
        assert!(!content.description());
        assert!(!content.properties());
    }

    #[test]
    fn test_content_set() {
        let mut content = Content::default();

        assert!(content.set("diagrams", true));
        assert!(content.set("headingPrefix", true));
        assert!(!content.set("footnotes", true));

        assert!(content.diagrams());
        assert!(content.heading_prefix());
        assert!(!content.examples());
        assert_eq!(Content::TOGGLES.len(), 6);
    }

    #[test]
    fn test_layout_resolve_default() {
        let layout = LayoutMap::new();
        let direction = layout.resolve(Id::new("A"), Id::new("B"), &Direction::default());
        assert_eq!(direction.as_str(), "D");
    }

    #[test]
    fn test_layout_resolve_reversed_pair() {
        let layout = LayoutMap::new().with_entry("B-A", "U");
        let direction = layout.resolve(Id::new("A"), Id::new("B"), &Direction::default());
        assert_eq!(direction.as_str(), "D");

        let layout = LayoutMap::new().with_entry("B-A", "L");
        let direction = layout.resolve(Id::new("A"), Id::new("B"), &Direction::default());
        assert_eq!(direction.as_str(), "R");
    }

    #[test]
    fn test_layout_forward_pair_overrides_reversed() {
        let layout = LayoutMap::new()
            .with_entry("B-A", "L")
            .with_entry("A-B", "U");
        let direction = layout.resolve(Id::new("A"), Id::new("B"), &Direction::default());
        assert_eq!(direction.as_str(), "U");
    }

    #[test]
    fn test_layout_scopes() {
        let layout = Layout::new()
            .with_scope(Layout::OVERVIEW_SCOPE, LayoutMap::new().with_entry("A-B", "L"))
            .with_scope("A", LayoutMap::new());

        assert!(layout.scope("overview").is_some());
        assert!(layout.scope("A").is_some_and(LayoutMap::is_empty));
        assert!(layout.scope("B").is_none());
    }

    #[test]
    fn test_spec_description_treats_empty_as_absent() {
        let spec = DiagramSpec::new("Overview", DiagramKind::Overview).with_description("");
        assert_eq!(spec.description(), None);
    }
}
