//! Project data model
//!
//! A project maps workspace names to ordered card lists. Listing order is
//! insertion order. Card lists are reference counted so that copying a
//! project for a transition only copies the map, and untouched workspaces
//! stay shared between the old and new value.

use std::rc::Rc;

use indexmap::IndexMap;

use super::card::Card;

/// Name of the workspace every fresh project starts with
pub const DEFAULT_WORKSPACE: &str = "workspace";

/// Shared, ordered card list of one workspace
pub type CardList = Rc<Vec<Card>>;

/// Mapping from workspace name to its cards
///
/// Invariants, upheld by every constructor and transition:
/// - at least one workspace
/// - every workspace has at least one card
/// - names are non-empty and unique
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    workspaces: IndexMap<String, CardList>,
}

impl Default for Project {
    fn default() -> Self {
        Self::new()
    }
}

impl Project {
    /// Single default workspace holding one placeholder card
    pub fn new() -> Self {
        let mut workspaces = IndexMap::new();
        workspaces.insert(DEFAULT_WORKSPACE.to_string(), seed_list());
        Self { workspaces }
    }

    /// Build a project from `(name, cards)` pairs, repairing invariants
    ///
    /// Later duplicates overwrite earlier ones in place, empty names are
    /// dropped, empty lists get a placeholder, and an empty result falls
    /// back to the default project.
    pub fn from_workspaces<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<Card>)>,
        S: Into<String>,
    {
        let mut workspaces = IndexMap::new();
        for (name, cards) in entries {
            let name = name.into();
            if name.is_empty() {
                continue;
            }
            workspaces.insert(name, Rc::new(non_empty(cards)));
        }
        if workspaces.is_empty() {
            return Self::new();
        }
        Self { workspaces }
    }

    /// Cards of a workspace, if it exists
    pub fn get(&self, name: &str) -> Option<&[Card]> {
        self.workspaces.get(name).map(|cards| cards.as_slice())
    }

    /// Shared handle to a workspace's list (for identity checks)
    #[cfg(test)]
    pub(crate) fn list(&self, name: &str) -> Option<&CardList> {
        self.workspaces.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.workspaces.contains_key(name)
    }

    /// Number of workspaces
    pub fn len(&self) -> usize {
        self.workspaces.len()
    }

    /// Always false for a project built through this module
    pub fn is_empty(&self) -> bool {
        self.workspaces.is_empty()
    }

    /// Workspace names in listing order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.workspaces.keys().map(String::as_str)
    }

    /// Name at a listing position
    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.workspaces.get_index(index).map(|(name, _)| name.as_str())
    }

    /// `(name, cards)` pairs in listing order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Card])> {
        self.workspaces
            .iter()
            .map(|(name, cards)| (name.as_str(), cards.as_slice()))
    }

    /// Total number of cards across all workspaces
    pub fn card_count(&self) -> usize {
        self.workspaces.values().map(|cards| cards.len()).sum()
    }

    /// Insert or overwrite a workspace. Overwriting keeps its listing slot.
    pub(crate) fn set(&mut self, name: &str, cards: Vec<Card>) {
        let cards = Rc::new(non_empty(cards));
        match self.workspaces.get_mut(name) {
            Some(slot) => *slot = cards,
            None => {
                self.workspaces.insert(name.to_string(), cards);
            }
        }
    }

    /// Remove a workspace, keeping the order of the rest. Re-seeds the
    /// default workspace if nothing is left.
    pub(crate) fn remove(&mut self, name: &str) -> bool {
        let removed = self.workspaces.shift_remove(name).is_some();
        if self.workspaces.is_empty() {
            self.workspaces
                .insert(DEFAULT_WORKSPACE.to_string(), seed_list());
        }
        removed
    }
}

fn seed_list() -> CardList {
    Rc::new(vec![Card::placeholder()])
}

fn non_empty(cards: Vec<Card>) -> Vec<Card> {
    if cards.is_empty() {
        vec![Card::placeholder()]
    } else {
        cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(title: &str) -> Card {
        Card::new(title, "", "", "")
    }

    #[test]
    fn test_default_project() {
        let project = Project::new();
        assert_eq!(project.len(), 1);
        assert_eq!(project.get(DEFAULT_WORKSPACE), Some(&[Card::placeholder()][..]));
        assert!(!project.is_empty());
    }

    #[test]
    fn test_from_workspaces_repairs_invariants() {
        let project = Project::from_workspaces(vec![
            ("a", vec![card("1")]),
            ("", vec![card("dropped")]),
            ("b", vec![]),
            ("a", vec![card("2")]),
        ]);
        assert_eq!(project.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(project.get("a"), Some(&[card("2")][..]));
        assert_eq!(project.get("b"), Some(&[Card::placeholder()][..]));
    }

    #[test]
    fn test_from_nothing_is_default() {
        let project = Project::from_workspaces(Vec::<(String, Vec<Card>)>::new());
        assert_eq!(project, Project::new());
    }

    #[test]
    fn test_set_keeps_slot() {
        let mut project = Project::from_workspaces(vec![("a", vec![card("1")]), ("b", vec![card("2")])]);
        project.set("a", vec![card("3")]);
        assert_eq!(project.name_at(0), Some("a"));
        assert_eq!(project.get("a"), Some(&[card("3")][..]));
    }

    #[test]
    fn test_remove_last_reseeds() {
        let mut project = Project::from_workspaces(vec![("only", vec![card("1")])]);
        assert!(project.remove("only"));
        assert_eq!(project, Project::new());
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut project = Project::from_workspaces(vec![
            ("a", vec![card("1")]),
            ("b", vec![card("2")]),
            ("c", vec![card("3")]),
        ]);
        project.remove("a");
        assert_eq!(project.names().collect::<Vec<_>>(), vec!["b", "c"]);
        assert_eq!(project.card_count(), 2);
    }
}
