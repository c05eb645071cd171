//! Markdown document assembly.
//!
//! The composer walks the workspace's diagram declarations in order. An
//! overview declaration becomes one section; a details declaration becomes
//! one section per selected entity.

use indexmap::IndexSet;
use log::{debug, info};

use archup_core::{
    identifier::Id,
    semantic::{DiagramKind, DiagramSpec, Entity, Layout, Property},
    workspace::Workspace,
};

use crate::{
    include::{Fetch, IncludeError},
    render::DiagramRenderer,
    select::{self, Selection, Visibility},
};

/// Title used when no other is configured.
pub const DEFAULT_TITLE: &str = "Concepts";

const GENERATED_MARKER: &str = "<!-- THIS FILE IS GENERATED -->";

fn push_line(out: &mut String, line: impl AsRef<str>) {
    out.push_str(line.as_ref());
    out.push('\n');
}

/// Builds the complete Markdown document for a workspace.
pub struct DocumentComposer<'a, F: Fetch> {
    renderer: DiagramRenderer<'a, F>,
    title: String,
}

impl<'a, F: Fetch> DocumentComposer<'a, F> {
    pub fn new(renderer: DiagramRenderer<'a, F>) -> Self {
        Self {
            renderer,
            title: DEFAULT_TITLE.to_string(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Compose the document.
    ///
    /// # Errors
    ///
    /// Returns an [`IncludeError`] if a diagram needs the styling include and
    /// it cannot be resolved.
    pub fn compose(&self, workspace: &Workspace) -> Result<String, IncludeError> {
        let mut out = String::new();
        push_line(&mut out, GENERATED_MARKER);
        push_line(&mut out, format!("## {}", self.title));
        push_line(&mut out, "");

        for spec in workspace.diagrams() {
            debug!(name = spec.name(), kind:? = spec.kind(); "Composing diagram");
            match spec.kind() {
                DiagramKind::Overview => self.overview(&mut out, workspace, spec)?,
                DiagramKind::Details => {
                    let selected = select::visible_entities(
                        workspace,
                        spec.whitelist(),
                        spec.blacklist(),
                    );
                    for entity in selected.iter().filter_map(|&id| workspace.entity(id)) {
                        self.details(&mut out, workspace, spec, entity)?;
                    }
                }
            }
        }

        info!(
            diagrams_len = workspace.diagrams().len(),
            bytes = out.len();
            "Document composed",
        );
        Ok(out)
    }

    /// The whitelist seeds the internal entities; their direct neighbors are
    /// drawn too, as external ones.
    fn overview(
        &self,
        out: &mut String,
        workspace: &Workspace,
        spec: &DiagramSpec,
    ) -> Result<(), IncludeError> {
        let blacklist = spec
            .blacklist()
            .map(|list| Selection::parse(workspace, list));

        let (visibility, internal) = match spec.whitelist() {
            Some(whitelist) => {
                let internal = select::expand_tags(workspace, whitelist);
                let mut shown = internal.clone();
                for &id in &internal {
                    shown.extend(select::find_related(workspace, id));
                }
                let visibility = Visibility::all()
                    .with_whitelist(Selection::from_ids(shown))
                    .with_blacklist(blacklist);
                (visibility, Some(internal))
            }
            None => (Visibility::all().with_blacklist(blacklist), None),
        };

        let diagram = self.renderer.render(
            workspace,
            &visibility,
            internal.as_ref(),
            None,
            spec.layout().scope(Layout::OVERVIEW_SCOPE),
        )?;

        push_line(out, format!("### {}", spec.name()));
        push_line(out, "");
        push_diagram(out, &diagram);
        push_line(out, "");
        if let Some(description) = spec.description() {
            push_line(out, description);
            push_line(out, "");
        }
        Ok(())
    }

    fn details(
        &self,
        out: &mut String,
        workspace: &Workspace,
        spec: &DiagramSpec,
        entity: &Entity,
    ) -> Result<(), IncludeError> {
        let content = spec.content();

        let prefix = if content.heading_prefix() {
            format!("{}: ", spec.name())
        } else {
            String::new()
        };
        if content.aka() && !entity.aka().is_empty() {
            let akas = entity
                .aka()
                .iter()
                .map(|aka| format!("\"_{aka}_\""))
                .collect::<Vec<_>>()
                .join(", ");
            push_line(
                out,
                format!("### {prefix}{} <small>(aka {akas})</small>", entity.name()),
            );
        } else {
            push_line(out, format!("### {prefix}{}", entity.name()));
        }
        push_line(out, "");

        if content.examples() && !entity.examples().is_empty() {
            push_line(out, "Examples:");
            push_line(out, "");
            for example in entity.examples() {
                push_line(out, format!("* \"_{example}_\""));
            }
            push_line(out, "");
        }

        if content.diagrams() {
            let id = entity.id();
            let internal: IndexSet<Id> = IndexSet::from([id]);
            let mut shown = internal.clone();
            shown.extend(select::find_related(workspace, id));

            let visibility = Visibility::all().with_whitelist(Selection::from_ids(shown));
            let layout = id.with_str(|scope| spec.layout().scope(scope));
            let diagram = self
                .renderer
                .render(workspace, &visibility, Some(&internal), None, layout)?;
            push_diagram(out, &diagram);
            push_line(out, "");
        }

        let description = entity.long_description();
        if content.description() && !description.is_empty() {
            push_line(out, description);
            push_line(out, "");
        }

        if content.properties() && !entity.properties().is_empty() {
            push_line(out, "Properties:");
            push_line(out, "");
            push_line(out, "| Name | Type | Description |");
            push_line(out, "|---|---|---|");
            for (name, property) in entity.properties() {
                push_line(
                    out,
                    format!("| {name} | {} | {} |", type_column(property), property.description()),
                );
            }
            push_line(out, "");
        }

        Ok(())
    }
}

fn push_diagram(out: &mut String, diagram: &str) {
    push_line(out, "```plantuml");
    out.push_str(diagram);
    push_line(out, "```");
}

/// The property type, followed by its enumerated values in parentheses.
fn type_column(property: &Property) -> String {
    if property.values().is_empty() {
        property.type_name().to_string()
    } else {
        format!("{}({})", property.type_name(), property.values().join(", "))
    }
}
