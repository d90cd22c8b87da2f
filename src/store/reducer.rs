//! Project transitions
//!
//! `reduce` is total: every action either yields a new project or hands
//! back the input `Rc` untouched. Callers detect change with `Rc::ptr_eq`.

use std::rc::Rc;

use super::action::Action;
use super::card::Card;
use super::project::{DEFAULT_WORKSPACE, Project};

/// Apply one action to the project
pub fn reduce(project: &Rc<Project>, action: &Action) -> Rc<Project> {
    match action {
        Action::Update {
            workspace,
            index,
            card,
        } => {
            let (Some(name), Some(index)) = (named(workspace), *index) else {
                return Rc::clone(project);
            };
            edit_list(project, name, |cards| {
                let slot = cards.get_mut(index)?;
                *slot = card.clone().unwrap_or_default();
                Some(())
            })
        }

        Action::AddCard { workspace, card } => {
            let Some(name) = named(workspace) else {
                return Rc::clone(project);
            };
            edit_list(project, name, |cards| {
                cards.push(card.clone().unwrap_or_default());
                Some(())
            })
        }

        Action::DeleteCard { workspace, index } => {
            let (Some(name), Some(index)) = (named(workspace), *index) else {
                return Rc::clone(project);
            };
            edit_list(project, name, |cards| remove_card(cards, index))
        }

        Action::CommitEdit { workspace, index } => {
            let (Some(name), Some(index)) = (named(workspace), *index) else {
                return Rc::clone(project);
            };
            let blank = project
                .get(name)
                .and_then(|cards| cards.get(index))
                .is_some_and(Card::has_blank_title);
            if !blank {
                return Rc::clone(project);
            }
            edit_list(project, name, |cards| remove_card(cards, index))
        }

        Action::Load { workspace, cards } => {
            let Some(name) = named(workspace) else {
                return Rc::clone(project);
            };
            let mut next = Project::clone(project);
            next.set(name, cards.clone().unwrap_or_default());
            Rc::new(next)
        }

        Action::AddWorkspace { workspace, cards } => {
            let name = named(workspace).unwrap_or(DEFAULT_WORKSPACE);
            let mut next = Project::clone(project);
            next.set(name, cards.clone().unwrap_or_default());
            Rc::new(next)
        }

        Action::Clear { workspace } => match named(workspace) {
            Some(name) if project.contains(name) => {
                let mut next = Project::clone(project);
                next.set(name, Vec::new());
                Rc::new(next)
            }
            _ => Rc::clone(project),
        },

        Action::DeleteWorkspace { workspace } => {
            let Some(name) = named(workspace) else {
                return Rc::clone(project);
            };
            if !project.contains(name) {
                return Rc::clone(project);
            }
            let mut next = Project::clone(project);
            next.remove(name);
            Rc::new(next)
        }

        Action::Boot { project: snapshot } => Rc::new(match snapshot {
            Some(snapshot) => Project::from_workspaces(
                snapshot
                    .iter()
                    .map(|(name, cards)| (name.to_string(), cards.to_vec())),
            ),
            None => Project::new(),
        }),

        Action::Unknown => Rc::clone(project),
    }
}

/// Workspace name, treating the empty string as absent
fn named(workspace: &Option<String>) -> Option<&str> {
    workspace.as_deref().filter(|name| !name.is_empty())
}

/// Copy the named list, let `edit` change it, and install it in a copy of
/// the project. Returns the original project when the workspace is missing
/// or empty, or when `edit` reports no change.
fn edit_list<F>(project: &Rc<Project>, name: &str, edit: F) -> Rc<Project>
where
    F: FnOnce(&mut Vec<Card>) -> Option<()>,
{
    let Some(cards) = project.get(name) else {
        return Rc::clone(project);
    };
    if cards.is_empty() {
        return Rc::clone(project);
    }
    let mut cards = cards.to_vec();
    if edit(&mut cards).is_none() {
        return Rc::clone(project);
    }
    let mut next = Project::clone(project);
    next.set(name, cards);
    Rc::new(next)
}

/// Out-of-range indices are ignored
fn remove_card(cards: &mut Vec<Card>, index: usize) -> Option<()> {
    if index >= cards.len() {
        return None;
    }
    cards.remove(index);
    Some(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn card(title: &str) -> Card {
        Card::new(title, "tech", "comments", "caption")
    }

    fn project(entries: Vec<(&str, Vec<Card>)>) -> Rc<Project> {
        Rc::new(Project::from_workspaces(entries))
    }

    #[test]
    fn test_add_card_defaults_to_placeholder() {
        let before = project(vec![("workspace", vec![card("A")])]);
        let after = reduce(&before, &Action::add_card("workspace", None));
        assert_eq!(
            after.get("workspace"),
            Some(&[card("A"), Card::placeholder()][..])
        );
        // Input untouched
        assert_eq!(before.get("workspace"), Some(&[card("A")][..]));
    }

    #[test]
    fn test_add_card_explicit() {
        let before = project(vec![("workspace", vec![card("A")])]);
        let after = reduce(&before, &Action::add_card("workspace", Some(card("B"))));
        assert_eq!(after.get("workspace"), Some(&[card("A"), card("B")][..]));
    }

    #[test]
    fn test_delete_card_first() {
        let before = project(vec![("workspace", vec![card("A"), card("B")])]);
        let after = reduce(&before, &Action::delete_card("workspace", 0));
        assert_eq!(after.get("workspace"), Some(&[card("B")][..]));
    }

    #[test]
    fn test_delete_card_out_of_range_is_noop() {
        let before = project(vec![("workspace", vec![card("A"), card("B")])]);
        let after = reduce(&before, &Action::delete_card("workspace", 2));
        assert!(Rc::ptr_eq(&before, &after));
    }

    #[test]
    fn test_delete_only_card_reseeds() {
        let before = project(vec![("workspace", vec![card("A")])]);
        let after = reduce(&before, &Action::delete_card("workspace", 0));
        assert_eq!(after.get("workspace"), Some(&[Card::placeholder()][..]));
    }

    #[test]
    fn test_update_replaces_in_place() {
        let before = project(vec![("w", vec![card("A"), card("B"), card("C")])]);
        let after = reduce(&before, &Action::update("w", 1, card("X")));
        assert_eq!(after.get("w"), Some(&[card("A"), card("X"), card("C")][..]));
    }

    #[test]
    fn test_update_without_card_uses_placeholder() {
        let before = project(vec![("w", vec![card("A")])]);
        let action = Action::Update {
            workspace: Some("w".into()),
            index: Some(0),
            card: None,
        };
        let after = reduce(&before, &action);
        assert_eq!(after.get("w"), Some(&[Card::placeholder()][..]));
    }

    #[test]
    fn test_update_out_of_range_is_noop() {
        let before = project(vec![("w", vec![card("A")])]);
        let after = reduce(&before, &Action::update("w", 1, card("X")));
        assert!(Rc::ptr_eq(&before, &after));
    }

    #[test]
    fn test_untouched_workspaces_stay_shared() {
        let before = project(vec![("a", vec![card("1")]), ("b", vec![card("2")])]);
        let after = reduce(&before, &Action::add_card("a", None));
        assert!(!Rc::ptr_eq(&before, &after));
        assert!(Rc::ptr_eq(
            before.list("b").unwrap(),
            after.list("b").unwrap()
        ));
        assert!(!Rc::ptr_eq(
            before.list("a").unwrap(),
            after.list("a").unwrap()
        ));
    }

    #[test]
    fn test_load_upserts() {
        let before = project(vec![("a", vec![card("1")])]);
        let after = reduce(&before, &Action::load("b", Some(vec![card("x"), card("y")])));
        assert_eq!(after.get("a"), Some(&[card("1")][..]));
        assert_eq!(after.get("b"), Some(&[card("x"), card("y")][..]));

        let after = reduce(&after, &Action::load("a", None));
        assert_eq!(after.get("a"), Some(&[Card::placeholder()][..]));
    }

    #[test]
    fn test_load_empty_list_gets_placeholder() {
        let before = project(vec![("a", vec![card("1")])]);
        let after = reduce(&before, &Action::load("a", Some(Vec::new())));
        assert_eq!(after.get("a"), Some(&[Card::placeholder()][..]));
    }

    #[test]
    fn test_add_workspace_defaults() {
        let before = project(vec![("a", vec![card("1")])]);
        let after = reduce(&before, &Action::add_workspace(None, None));
        assert_eq!(after.names().collect::<Vec<_>>(), vec!["a", "workspace"]);
        assert_eq!(after.get("workspace"), Some(&[Card::placeholder()][..]));
    }

    #[test]
    fn test_add_workspace_overwrites() {
        let before = project(vec![("a", vec![card("1")]), ("b", vec![card("2")])]);
        let after = reduce(&before, &Action::add_workspace(Some("a"), Some(vec![card("3")])));
        assert_eq!(after.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(after.get("a"), Some(&[card("3")][..]));
    }

    #[test]
    fn test_clear() {
        let before = project(vec![("a", vec![card("1"), card("2"), card("3")])]);
        let after = reduce(&before, &Action::clear("a"));
        assert_eq!(after.get("a"), Some(&[Card::placeholder()][..]));

        let missing = reduce(&before, &Action::clear("zzz"));
        assert!(Rc::ptr_eq(&before, &missing));
    }

    #[test]
    fn test_delete_workspace() {
        let before = project(vec![("a", vec![card("1")]), ("b", vec![card("2")])]);
        let after = reduce(&before, &Action::delete_workspace("a"));
        assert_eq!(*after, Project::from_workspaces(vec![("b", vec![card("2")])]));
    }

    #[test]
    fn test_delete_last_workspace_reseeds_default() {
        let before = project(vec![("mine", vec![card("1"), card("2")])]);
        let after = reduce(&before, &Action::delete_workspace("mine"));
        assert_eq!(*after, Project::new());
    }

    #[test]
    fn test_boot() {
        let before = project(vec![("a", vec![card("1")])]);
        let after = reduce(&before, &Action::boot(None));
        assert_eq!(*after, Project::new());

        let snapshot = Project::from_workspaces(vec![("x", vec![card("9")])]);
        let after = reduce(&before, &Action::boot(Some(snapshot.clone())));
        assert_eq!(*after, snapshot);
    }

    #[test]
    fn test_commit_edit() {
        let before = project(vec![("w", vec![card("A"), card("  "), card("C")])]);

        let kept = reduce(&before, &Action::commit_edit("w", 0));
        assert!(Rc::ptr_eq(&before, &kept));

        let after = reduce(&before, &Action::commit_edit("w", 1));
        assert_eq!(after.get("w"), Some(&[card("A"), card("C")][..]));

        let out_of_range = reduce(&before, &Action::commit_edit("w", 7));
        assert!(Rc::ptr_eq(&before, &out_of_range));
    }

    #[test]
    fn test_missing_fields_are_noops() {
        let before = project(vec![("w", vec![card("A")])]);
        let actions = [
            Action::Update {
                workspace: None,
                index: Some(0),
                card: None,
            },
            Action::Update {
                workspace: Some("w".into()),
                index: None,
                card: Some(card("X")),
            },
            Action::AddCard {
                workspace: Some(String::new()),
                card: None,
            },
            Action::DeleteCard {
                workspace: Some("w".into()),
                index: None,
            },
            Action::Load {
                workspace: None,
                cards: None,
            },
            Action::Clear { workspace: None },
            Action::DeleteWorkspace { workspace: None },
            Action::Unknown,
        ];
        for action in &actions {
            let after = reduce(&before, action);
            assert!(Rc::ptr_eq(&before, &after), "{} changed state", action.kind());
        }
    }

    fn arb_card() -> impl Strategy<Value = Card> {
        ("[a-z ]{0,6}", "[a-z,]{0,6}", "[a-z\n]{0,8}", "[a-z]{0,8}")
            .prop_map(|(title, tech, comments, caption)| Card::new(title, tech, comments, caption))
    }

    fn arb_project() -> impl Strategy<Value = Project> {
        prop::collection::vec(
            ("[a-c]{1,2}", prop::collection::vec(arb_card(), 1..4)),
            1..5,
        )
        .prop_map(Project::from_workspaces)
    }

    proptest! {
        #[test]
        fn prop_missing_workspace_is_noop(
            project in arb_project(),
            index in 0usize..5,
            card in arb_card(),
        ) {
            let project = Rc::new(project);
            // Generated names are at most two chars from a-c
            let name = "absent";
            for action in [
                Action::delete_card(name, index),
                Action::update(name, index, card.clone()),
                Action::add_card(name, Some(card.clone())),
                Action::commit_edit(name, index),
                Action::clear(name),
                Action::delete_workspace(name),
            ] {
                let after = reduce(&project, &action);
                prop_assert!(Rc::ptr_eq(&project, &after));
            }
        }

        #[test]
        fn prop_clear_leaves_one_card(project in arb_project(), pick in 0usize..8) {
            let project = Rc::new(project);
            let name = project.name_at(pick % project.len()).unwrap().to_string();
            let expected = vec![Card::placeholder()];
            let after = reduce(&project, &Action::clear(&name));
            prop_assert_eq!(after.get(&name), Some(expected.as_slice()));
            prop_assert_eq!(after.len(), project.len());
        }

        #[test]
        fn prop_delete_all_workspaces_reseeds(project in arb_project()) {
            let project = Rc::new(project);
            let names: Vec<String> = project.names().map(str::to_string).collect();
            let mut current = Rc::clone(&project);
            for name in &names {
                current = reduce(&current, &Action::delete_workspace(name));
            }
            let fresh = Project::new();
            prop_assert_eq!(&*current, &fresh);
        }

        #[test]
        fn prop_invariants_hold(project in arb_project(), index in 0usize..4, pick in 0usize..8) {
            let project = Rc::new(project);
            let name = project.name_at(pick % project.len()).unwrap().to_string();
            for action in [
                Action::delete_card(&name, index),
                Action::load(&name, Some(Vec::new())),
                Action::delete_workspace(&name),
                Action::commit_edit(&name, index),
            ] {
                let after = reduce(&project, &action);
                prop_assert!(after.len() >= 1);
                prop_assert!(after.iter().all(|(_, cards)| !cards.is_empty()));
            }
        }
    }
}
