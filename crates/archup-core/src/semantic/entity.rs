//! Entities, their properties and the relations they own.

use std::fmt;

use indexmap::IndexMap;

use crate::identifier::Id;

/// Descriptor of a single entity property.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Property {
    description: Option<String>,
    type_name: Option<String>,
    values: Vec<String>,
}

impl Property {
    /// Create an empty property descriptor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the property description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the property type name.
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Set the enumerated values the property may take.
    pub fn with_values(mut self, values: Vec<String>) -> Self {
        self.values = values;
        self
    }

    /// Get the description, or `""` when none was given.
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    /// Get the type name, or `""` when none was given.
    pub fn type_name(&self) -> &str {
        self.type_name.as_deref().unwrap_or_default()
    }

    /// Get the enumerated values.
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// A directed relation owned by its source entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    to: Id,
    description: Option<String>,
    properties: Vec<String>,
}

impl Relation {
    /// Create a relation pointing at `to`.
    pub fn new(to: Id) -> Self {
        Self {
            to,
            description: None,
            properties: Vec::new(),
        }
    }

    /// Set the relation description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the relation property names.
    pub fn with_properties(mut self, properties: Vec<String>) -> Self {
        self.properties = properties;
        self
    }

    /// Get the target entity id.
    pub fn to(&self) -> Id {
        self.to
    }

    /// Get the description, or `""` when none was given.
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    /// Get the property names in declaration order.
    pub fn properties(&self) -> &[String] {
        &self.properties
    }
}

/// A modeled concept, rendered as one box in a diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    id: Id,
    name: String,
    aka: Vec<String>,
    short_description: Option<String>,
    description: Option<String>,
    examples: Vec<String>,
    properties: IndexMap<String, Property>,
    relations: Vec<Relation>,
    tags: Vec<String>,
}

impl Entity {
    /// Create an entity with only its id and display name set.
    pub fn new(id: Id, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            aka: Vec::new(),
            short_description: None,
            description: None,
            examples: Vec::new(),
            properties: IndexMap::new(),
            relations: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Set the alternate names.
    pub fn with_aka(mut self, aka: Vec<String>) -> Self {
        self.aka = aka;
        self
    }

    /// Set the one-line description shown inside diagrams.
    pub fn with_short_description(mut self, text: impl Into<String>) -> Self {
        self.short_description = Some(text.into());
        self
    }

    /// Set the long description shown in details sections.
    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Set the example values.
    pub fn with_examples(mut self, examples: Vec<String>) -> Self {
        self.examples = examples;
        self
    }

    /// Add a property. A later property with the same name replaces the earlier one.
    pub fn with_property(mut self, name: impl Into<String>, property: Property) -> Self {
        self.properties.insert(name.into(), property);
        self
    }

    /// Append a relation.
    pub fn with_relation(mut self, relation: Relation) -> Self {
        self.relations.push(relation);
        self
    }

    /// Set the tags.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aka(&self) -> &[String] {
        &self.aka
    }

    /// Get the short description, or `""` when none was given.
    pub fn short_description(&self) -> &str {
        self.short_description.as_deref().unwrap_or_default()
    }

    /// Get the long description, falling back to the short one.
    pub fn long_description(&self) -> &str {
        match self.description.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => self.short_description(),
        }
    }

    pub fn examples(&self) -> &[String] {
        &self.examples
    }

    /// Borrow the properties in declaration order.
    pub fn properties(&self) -> &IndexMap<String, Property> {
        &self.properties
    }

    /// Borrow the outgoing relations in declaration order.
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns `true` if the entity carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}
