//! Entity selection: tag expansion, neighborhoods and visibility filtering.
//!
//! Selection is permissive. Literal ids that name no entity are kept as-is
//! and simply never match, in the same way a relation to an unknown entity is
//! dropped rather than rejected.

use indexmap::IndexSet;

use archup_core::{identifier::Id, semantic::Entity, workspace::Workspace};

const TAG_PREFIX: char = '#';

/// Expand selection expressions into entity ids.
///
/// A literal id is kept as written. `#tag` expands to every entity carrying
/// `tag`, in workspace order. The result keeps first-appearance order.
pub fn expand_tags<S: AsRef<str>>(workspace: &Workspace, expressions: &[S]) -> IndexSet<Id> {
    let mut ids = IndexSet::new();
    for expression in expressions {
        let expression = expression.as_ref();
        match expression.strip_prefix(TAG_PREFIX) {
            Some(tag) => ids.extend(
                workspace
                    .entities()
                    .filter(|entity| entity.has_tag(tag))
                    .map(Entity::id),
            ),
            None => {
                ids.insert(Id::new(expression));
            }
        }
    }
    ids
}

/// Every entity one relation away from `id`, in either direction.
///
/// An entity with a relation to itself is its own neighbor.
pub fn find_related(workspace: &Workspace, id: Id) -> IndexSet<Id> {
    let mut related = IndexSet::new();
    for entity in workspace.entities() {
        for relation in entity.relations() {
            if entity.id() == id {
                related.insert(relation.to());
            }
            if relation.to() == id {
                related.insert(entity.id());
            }
        }
    }
    related
}

/// One whitelist or blacklist: the raw expressions and their expansion.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    expressions: Vec<String>,
    ids: IndexSet<Id>,
}

impl Selection {
    /// Build a selection from `#tag` and literal id expressions.
    pub fn parse<S: AsRef<str>>(workspace: &Workspace, expressions: &[S]) -> Self {
        Self {
            expressions: expressions.iter().map(|e| e.as_ref().to_string()).collect(),
            ids: expand_tags(workspace, expressions),
        }
    }

    /// Build a selection from already resolved ids.
    pub fn from_ids(ids: impl IntoIterator<Item = Id>) -> Self {
        let ids: IndexSet<Id> = ids.into_iter().collect();
        Self {
            expressions: ids.iter().map(Id::to_string).collect(),
            ids,
        }
    }

    /// Returns `true` if the entity's id is selected, or one of its own tags
    /// appears as a `#tag` expression.
    pub fn matches(&self, entity: &Entity) -> bool {
        self.ids.contains(&entity.id())
            || entity.tags().iter().any(|tag| {
                self.expressions.iter().any(|expression| {
                    expression.strip_prefix(TAG_PREFIX) == Some(tag.as_str())
                })
            })
    }

    /// The expanded ids.
    pub fn ids(&self) -> &IndexSet<Id> {
        &self.ids
    }
}

/// Whitelist and blacklist of one diagram.
///
/// Without a whitelist every entity starts visible. The blacklist then
/// removes entities from whatever the whitelist admitted.
#[derive(Debug, Clone, Default)]
pub struct Visibility {
    whitelist: Option<Selection>,
    blacklist: Option<Selection>,
}

impl Visibility {
    /// Visibility that admits every entity.
    pub fn all() -> Self {
        Self::default()
    }

    /// Build visibility from raw expression lists.
    pub fn new<S: AsRef<str>>(
        workspace: &Workspace,
        whitelist: Option<&[S]>,
        blacklist: Option<&[S]>,
    ) -> Self {
        Self {
            whitelist: whitelist.map(|list| Selection::parse(workspace, list)),
            blacklist: blacklist.map(|list| Selection::parse(workspace, list)),
        }
    }

    pub fn with_whitelist(mut self, whitelist: Selection) -> Self {
        self.whitelist = Some(whitelist);
        self
    }

    pub fn with_blacklist(mut self, blacklist: Option<Selection>) -> Self {
        self.blacklist = blacklist;
        self
    }

    pub fn is_visible(&self, entity: &Entity) -> bool {
        let whitelisted = self
            .whitelist
            .as_ref()
            .is_none_or(|whitelist| whitelist.matches(entity));
        let blacklisted = self
            .blacklist
            .as_ref()
            .is_some_and(|blacklist| blacklist.matches(entity));
        whitelisted && !blacklisted
    }
}

/// Ids of the entities that pass `whitelist` and `blacklist`, in workspace order.
pub fn visible_entities<S: AsRef<str>>(
    workspace: &Workspace,
    whitelist: Option<&[S]>,
    blacklist: Option<&[S]>,
) -> IndexSet<Id> {
    let visibility = Visibility::new(workspace, whitelist, blacklist);
    workspace
        .entities()
        .filter(|entity| visibility.is_visible(entity))
        .map(Entity::id)
        .collect()
}
