//! Elaboration of an accepted document into the workspace model.
//!
//! Optional document fields become explicit defaults here: absent lists and
//! maps are empty, an empty whitelist or blacklist means "no filter", and
//! content toggles not mentioned stay disabled.

use log::{debug, trace};

use archup_core::{
    identifier::Id,
    semantic::{self, Content, DiagramSpec, Layout, LayoutMap},
    workspace::Workspace,
};

use crate::document::{self, Document};

pub(crate) struct Builder;

impl Builder {
    pub(crate) fn build(document: Document) -> Workspace {
        let Document {
            datamodel,
            diagrams,
        } = document;

        let mut workspace = Workspace::new().with_description(datamodel.description);

        for (id, entity) in datamodel.entities {
            workspace = workspace.with_entity(Self::build_entity(&id, entity));
        }
        for diagram in diagrams {
            workspace = workspace.with_diagram(Self::build_diagram(diagram));
        }

        debug!(
            diagrams_len = workspace.diagrams().len();
            "Workspace elaborated",
        );
        workspace
    }

    fn build_entity(id: &str, raw: document::Entity) -> semantic::Entity {
        trace!(entity_id = id; "Elaborating entity");

        let mut entity = semantic::Entity::new(Id::new(id), raw.name)
            .with_aka(raw.aka)
            .with_examples(raw.examples)
            .with_tags(raw.tags);

        if let Some(text) = raw.short_description {
            entity = entity.with_short_description(text);
        }
        if let Some(text) = raw.description {
            entity = entity.with_description(text);
        }

        for (name, property) in raw.properties {
            entity = entity.with_property(name, Self::build_property(property.unwrap_or_default()));
        }
        for relation in raw.relations {
            entity = entity.with_relation(Self::build_relation(relation));
        }

        entity
    }

    fn build_property(raw: document::Property) -> semantic::Property {
        let mut property = semantic::Property::new().with_values(raw.values);
        if let Some(description) = raw.description {
            property = property.with_description(description);
        }
        if let Some(type_name) = raw.type_name {
            property = property.with_type_name(type_name);
        }
        property
    }

    fn build_relation(raw: document::Relation) -> semantic::Relation {
        let mut relation = semantic::Relation::new(Id::new(&raw.to))
            .with_properties(raw.properties.into_keys().collect());
        if let Some(description) = raw.description {
            relation = relation.with_description(description);
        }
        relation
    }

    fn build_diagram(raw: document::Diagram) -> DiagramSpec {
        trace!(name = raw.name.as_str(), kind:? = raw.kind; "Elaborating diagram");

        let mut content = Content::default();
        for (name, enabled) in &raw.content {
            // Unknown names were already reported by validation.
            content.set(name, *enabled);
        }

        let layout = raw
            .layout
            .into_iter()
            .fold(Layout::new(), |layout, (scope, entries)| {
                let map = entries
                    .into_iter()
                    .fold(LayoutMap::new(), |map, (key, direction)| {
                        map.with_entry(key, direction)
                    });
                layout.with_scope(scope, map)
            });

        let mut diagram = DiagramSpec::new(raw.name, raw.kind)
            .with_content(content)
            .with_layout(layout);

        if let Some(description) = raw.description {
            diagram = diagram.with_description(description);
        }
        if let Some(whitelist) = raw.whitelist.filter(|list| !list.is_empty()) {
            diagram = diagram.with_whitelist(whitelist);
        }
        if let Some(blacklist) = raw.blacklist.filter(|list| !list.is_empty()) {
            diagram = diagram.with_blacklist(blacklist);
        }

        diagram
    }
}
