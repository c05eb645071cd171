//! Serde shape of a workspace document.
//!
//! These types mirror the YAML layout one to one. Unknown fields are
//! rejected, required fields have no default, everything else defaults to
//! empty.

use indexmap::IndexMap;
use serde::Deserialize;

use archup_core::semantic::{DiagramKind, Direction};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Document {
    pub datamodel: DataModel,
    pub diagrams: Vec<Diagram>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct DataModel {
    pub description: String,
    pub entities: IndexMap<String, Entity>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub(crate) struct Entity {
    pub name: String,
    #[serde(default)]
    pub aka: Vec<String>,
    pub short_description: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub properties: IndexMap<String, Option<Property>>,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub relations: Vec<Relation>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Property {
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    #[serde(default)]
    pub values: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Relation {
    pub to: String,
    pub description: Option<String>,
    /// Only the names are used; the values are free-form.
    #[serde(default)]
    pub properties: IndexMap<String, serde_yaml::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Diagram {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DiagramKind,
    pub description: Option<String>,
    pub whitelist: Option<Vec<String>>,
    pub blacklist: Option<Vec<String>>,
    #[serde(default)]
    pub content: IndexMap<String, bool>,
    #[serde(default)]
    pub layout: IndexMap<String, IndexMap<String, Direction>>,
}
