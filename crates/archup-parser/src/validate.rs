//! Content checks run after the document shape has been accepted.
//!
//! Dangling references are tolerated by the generator, so most findings here
//! are warnings. Only an empty entity id or name stops loading.

use std::collections::HashSet;

use log::debug;

use archup_core::semantic::{Content, Direction, Layout};

use crate::{
    document::{Diagram, Document},
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
};

pub(crate) fn validate_document(document: &Document, collector: &mut DiagnosticCollector) {
    debug!(
        entities_len = document.datamodel.entities.len(),
        diagrams_len = document.diagrams.len();
        "Validating document",
    );

    let entity_ids: HashSet<&str> = document
        .datamodel
        .entities
        .keys()
        .map(String::as_str)
        .collect();
    let tags: HashSet<&str> = document
        .datamodel
        .entities
        .values()
        .flat_map(|entity| entity.tags.iter().map(String::as_str))
        .collect();

    validate_entities(document, &entity_ids, collector);

    for (index, diagram) in document.diagrams.iter().enumerate() {
        let path = format!("diagrams[{index}]");
        validate_selection(diagram, &path, &tags, collector);
        validate_content(diagram, &path, collector);
        validate_layout(diagram, &path, &entity_ids, collector);
    }
}

fn validate_entities(
    document: &Document,
    entity_ids: &HashSet<&str>,
    collector: &mut DiagnosticCollector,
) {
    for (id, entity) in &document.datamodel.entities {
        let path = format!("datamodel.entities.{id}");

        if id.trim().is_empty() {
            collector.emit(
                Diagnostic::error("entity id is empty")
                    .with_code(ErrorCode::E206)
                    .with_path(&path),
            );
        }
        if entity.name.trim().is_empty() {
            collector.emit(
                Diagnostic::error(format!("entity `{id}` has an empty name"))
                    .with_code(ErrorCode::E206)
                    .with_path(format!("{path}.name")),
            );
        }

        for (index, relation) in entity.relations.iter().enumerate() {
            if !entity_ids.contains(relation.to.as_str()) {
                collector.emit(
                    Diagnostic::warning(format!(
                        "relation target `{}` is not a known entity",
                        relation.to
                    ))
                    .with_code(ErrorCode::E200)
                    .with_path(format!("{path}.relations[{index}].to"))
                    .with_help("the relation is left out of every diagram"),
                );
            }
        }
    }
}

fn validate_selection(
    diagram: &Diagram,
    path: &str,
    tags: &HashSet<&str>,
    collector: &mut DiagnosticCollector,
) {
    let lists = [
        ("whitelist", diagram.whitelist.as_deref()),
        ("blacklist", diagram.blacklist.as_deref()),
    ];
    for (list_name, expressions) in lists {
        let Some(expressions) = expressions else {
            continue;
        };
        for (index, expression) in expressions.iter().enumerate() {
            let Some(tag) = expression.strip_prefix('#') else {
                continue;
            };
            if !tags.contains(tag) {
                collector.emit(
                    Diagnostic::warning(format!("no entity is tagged `{tag}`"))
                        .with_code(ErrorCode::E203)
                        .with_path(format!("{path}.{list_name}[{index}]")),
                );
            }
        }
    }
}

fn validate_content(diagram: &Diagram, path: &str, collector: &mut DiagnosticCollector) {
    for name in diagram.content.keys() {
        if !Content::TOGGLES.contains(&name.as_str()) {
            collector.emit(
                Diagnostic::warning(format!("unknown content toggle `{name}`"))
                    .with_code(ErrorCode::E202)
                    .with_path(format!("{path}.content.{name}"))
                    .with_help(format!("expected one of {}", Content::TOGGLES.join(", "))),
            );
        }
    }
}

fn validate_layout(
    diagram: &Diagram,
    path: &str,
    entity_ids: &HashSet<&str>,
    collector: &mut DiagnosticCollector,
) {
    for (scope, entries) in &diagram.layout {
        let scope_path = format!("{path}.layout.{scope}");
        if scope != Layout::OVERVIEW_SCOPE && !entity_ids.contains(scope.as_str()) {
            collector.emit(
                Diagnostic::warning(format!(
                    "layout scope `{scope}` is neither `{}` nor a known entity",
                    Layout::OVERVIEW_SCOPE
                ))
                .with_code(ErrorCode::E205)
                .with_path(&scope_path),
            );
        }

        for (key, direction) in entries {
            if !key.contains('-') {
                collector.emit(
                    Diagnostic::warning(format!("layout key `{key}` is not a `<from>-<to>` pair"))
                        .with_code(ErrorCode::E204)
                        .with_path(format!("{scope_path}.{key}")),
                );
            }
            check_direction(direction, &format!("{scope_path}.{key}"), collector);
        }
    }
}

fn check_direction(direction: &Direction, path: &str, collector: &mut DiagnosticCollector) {
    if !direction.is_recognized() {
        collector.emit(
            Diagnostic::warning(format!("direction `{direction}` is not one of L, R, U, D"))
                .with_code(ErrorCode::E201)
                .with_path(path)
                .with_help("the token is passed to the renderer as written"),
        );
    }
}
