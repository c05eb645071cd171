//! Example: Generating documentation from the workspace model
//!
//! This example builds a workspace programmatically, without a YAML
//! document, and renders it with a local styling include so it runs offline.

use std::fs;

use archup::{
    DocumentBuilder,
    config::{AppConfig, DocumentConfig, FetchConfig, RenderConfig},
    identifier::Id,
    semantic::{Content, DiagramKind, DiagramSpec, Direction, Entity, Property, Relation},
    workspace::Workspace,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let styling = dir.path().join("style.puml");
    fs::write(&styling, "@startuml\nhide empty members\n@enduml\n")?;

    let order_id = Id::new("order");
    let customer_id = Id::new("customer");

    let workspace = Workspace::new()
        .with_description("Orders and the customers who place them")
        .with_entity(
            Entity::new(order_id, "Order")
                .with_short_description("A request to buy products")
                .with_tags(vec!["sales".to_string()])
                .with_property(
                    "status",
                    Property::new()
                        .with_type_name("enum")
                        .with_values(vec!["open".to_string(), "closed".to_string()]),
                )
                .with_relation(Relation::new(customer_id).with_description("placed by")),
        )
        .with_entity(Entity::new(customer_id, "Customer"))
        .with_diagram(DiagramSpec::new("Sales", DiagramKind::Overview).with_whitelist(["#sales"]))
        .with_diagram(
            DiagramSpec::new("Concept", DiagramKind::Details).with_content(Content::all()),
        );

    let config = AppConfig::new(
        RenderConfig::new(styling.to_string_lossy(), Direction::new("R")),
        FetchConfig::default(),
        DocumentConfig::new("Sales concepts"),
    );
    let builder = DocumentBuilder::new(config);
    let markdown = builder.render_markdown(&workspace)?;

    println!("{markdown}");
    Ok(())
}
