//! The validated workspace a document is generated from.

use indexmap::IndexMap;
use log::trace;

use crate::{
    identifier::Id,
    semantic::{DiagramSpec, Entity},
};

/// Entities and diagram declarations of one data model.
///
/// Entities keep their document order, which is also the order they are
/// rendered in. Diagrams keep their declaration order, which is the order of
/// the generated document. A workspace is never mutated once generation
/// starts.
///
/// # Examples
///
/// ```
/// use archup_core::{
///     identifier::Id,
///     semantic::{DiagramKind, DiagramSpec, Entity, Relation},
///     workspace::Workspace,
/// };
///
/// let workspace = Workspace::new()
///     .with_entity(Entity::new(Id::new("A"), "A").with_relation(Relation::new(Id::new("B"))))
///     .with_entity(Entity::new(Id::new("B"), "B"))
///     .with_diagram(DiagramSpec::new("Overview", DiagramKind::Overview));
///
/// assert_eq!(workspace.entities().count(), 2);
/// assert!(workspace.contains(Id::new("B")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workspace {
    description: Option<String>,
    entities: IndexMap<Id, Entity>,
    diagrams: Vec<DiagramSpec>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the data model description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add an entity.
    ///
    /// An entity whose id is already present replaces the earlier one in place.
    pub fn with_entity(mut self, entity: Entity) -> Self {
        trace!(entity_id = entity.id().to_string(); "Adding entity to workspace");
        self.entities.insert(entity.id(), entity);
        self
    }

    /// Append a diagram declaration.
    pub fn with_diagram(mut self, diagram: DiagramSpec) -> Self {
        self.diagrams.push(diagram);
        self
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Look up an entity by id.
    pub fn entity(&self, id: Id) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Returns `true` if an entity with `id` exists.
    pub fn contains(&self, id: Id) -> bool {
        self.entities.contains_key(&id)
    }

    /// Iterate over entities in document order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Iterate over entity ids in document order.
    pub fn entity_ids(&self) -> impl Iterator<Item = Id> + '_ {
        self.entities.keys().copied()
    }

    /// Borrow the diagram declarations in document order.
    pub fn diagrams(&self) -> &[DiagramSpec] {
        &self.diagrams
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::DiagramKind;

    #[test]
    fn test_entities_keep_document_order() {
        let workspace = Workspace::new()
            .with_entity(Entity::new(Id::new("zeta"), "Zeta"))
            .with_entity(Entity::new(Id::new("alpha"), "Alpha"))
            .with_entity(Entity::new(Id::new("mid"), "Mid"));

        let ids: Vec<String> = workspace.entity_ids().map(|id| id.to_string()).collect();
        assert_eq!(ids, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_duplicate_entity_replaces_in_place() {
        let workspace = Workspace::new()
            .with_entity(Entity::new(Id::new("a"), "First"))
            .with_entity(Entity::new(Id::new("b"), "B"))
            .with_entity(Entity::new(Id::new("a"), "Second"));

        let names: Vec<&str> = workspace.entities().map(Entity::name).collect();
        assert_eq!(names, ["Second", "B"]);
    }

    #[test]
    fn test_diagrams_keep_declaration_order() {
        let workspace = Workspace::new()
            .with_diagram(DiagramSpec::new("second", DiagramKind::Details))
            .with_diagram(DiagramSpec::new("first", DiagramKind::Overview));

        let names: Vec<&str> = workspace.diagrams().iter().map(DiagramSpec::name).collect();
        assert_eq!(names, ["second", "first"]);
    }

    #[test]
    fn test_lookup() {
        let workspace = Workspace::new()
            .with_description("Sales model")
            .with_entity(Entity::new(Id::new("order"), "Order"));

        assert_eq!(workspace.description(), Some("Sales model"));
        assert_eq!(workspace.entity(Id::new("order")).map(Entity::name), Some("Order"));
        assert!(workspace.entity(Id::new("missing")).is_none());
        assert!(!workspace.contains(Id::new("missing")));
    }
}
