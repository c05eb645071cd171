//! PlantUML diagram text for a selection of workspace entities.

use indexmap::IndexSet;
use log::debug;

use archup_core::{
    identifier::Id,
    semantic::{Direction, Entity, LayoutMap},
    workspace::Workspace,
};

use crate::{
    include::{Fetch, IncludeError, IncludeResolver, Locator},
    select::Visibility,
};

/// Styling include used when no other locator is configured.
pub const DEFAULT_STYLING_INCLUDE: &str =
    "https://raw.githubusercontent.com/anorm/plantuml-ext/main/datamodelling.puml";

const START_MARKER: &str = "@startuml";
const END_MARKER: &str = "@enduml";

/// Emits one self-contained diagram per call.
///
/// Every diagram starts with the resolved styling include, so the renderer
/// borrows the [`IncludeResolver`] whose cache is shared across a whole run.
pub struct DiagramRenderer<'a, F: Fetch> {
    includes: &'a IncludeResolver<F>,
    styling_include: Locator,
    default_direction: Direction,
}

impl<'a, F: Fetch> DiagramRenderer<'a, F> {
    pub fn new(includes: &'a IncludeResolver<F>) -> Self {
        Self {
            includes,
            styling_include: Locator::parse(DEFAULT_STYLING_INCLUDE),
            default_direction: Direction::default(),
        }
    }

    pub fn with_styling_include(mut self, locator: Locator) -> Self {
        self.styling_include = locator;
        self
    }

    pub fn with_default_direction(mut self, direction: Direction) -> Self {
        self.default_direction = direction;
        self
    }

    /// Render the entities passing `visibility` and the relations between them.
    ///
    /// An entity is drawn as internal when `internal` is `None` or contains it,
    /// unless `external` contains it. Relations are kept only when both ends
    /// are drawn; the rest are dropped silently.
    ///
    /// # Errors
    ///
    /// Returns an [`IncludeError`] if the styling include cannot be resolved.
    pub fn render(
        &self,
        workspace: &Workspace,
        visibility: &Visibility,
        internal: Option<&IndexSet<Id>>,
        external: Option<&IndexSet<Id>>,
        layout: Option<&LayoutMap>,
    ) -> Result<String, IncludeError> {
        let styling = self.includes.resolve(&self.styling_include)?;

        let mut out = String::new();
        out.push_str(START_MARKER);
        out.push('\n');
        out.push_str(&styling);

        let mut visible = IndexSet::new();
        for entity in workspace.entities() {
            if !visibility.is_visible(entity) {
                continue;
            }
            let id = entity.id();
            let is_internal = internal.is_none_or(|ids| ids.contains(&id))
                && !external.is_some_and(|ids| ids.contains(&id));
            write_entity(&mut out, entity, is_internal);
            visible.insert(id);
        }

        let mut relations_len = 0;
        for entity in workspace.entities() {
            let from = entity.id();
            for relation in entity.relations() {
                let to = relation.to();
                if !visible.contains(&from) || !visible.contains(&to) {
                    continue;
                }
                let direction = match layout {
                    Some(layout) => layout.resolve(from, to, &self.default_direction),
                    None => self.default_direction.clone(),
                };
                out.push_str(&format!(
                    "Rel_{direction}({from}, \"{}\", {to}, \"{}\")\n",
                    relation.description(),
                    relation.properties().join("|"),
                ));
                relations_len += 1;
            }
        }

        out.push_str(END_MARKER);
        out.push('\n');

        debug!(
            entities_len = visible.len(),
            relations_len;
            "Diagram rendered",
        );
        Ok(out)
    }
}

fn write_entity(out: &mut String, entity: &Entity, is_internal: bool) {
    let kind = if is_internal { "Entity" } else { "Entity_Ext" };
    let aka = if entity.aka().is_empty() {
        String::new()
    } else {
        // `\n` stays literal; PlantUML turns it into a line break.
        format!("\\n<size:10>(aka {})", entity.aka().join(" / "))
    };
    let examples = entity
        .examples()
        .iter()
        .map(|example| format!("'{example}'"))
        .collect::<Vec<_>>()
        .join(", ");

    out.push_str(&format!(
        "{kind}({}, \"{}{aka}\", \"{}\", $example=\"{examples}\") {{\n",
        entity.id(),
        entity.name(),
        entity.short_description(),
    ));
    for name in entity.properties().keys() {
        out.push_str(&format!("  Property(\"{name}\")\n"));
    }
    out.push_str("}\n\n");
}
