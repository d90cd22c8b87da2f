//! Organizer session
//!
//! The command surface a view drives. Owns the current project, the active
//! workspace and the card being edited, and turns each command into store
//! actions.

use std::cmp::Ordering;
use std::rc::Rc;

use crate::persistence::{self, ExportFile, PersistError};
use crate::platform::KeyValueStore;
use crate::settings::Settings;
use crate::store::{Action, Card, CardField, DEFAULT_WORKSPACE, Project, reduce};

/// Prefix for generated workspace names
const WORKSPACE_PREFIX: &str = "workspace";

#[derive(Debug, Clone)]
pub struct Session {
    project: Rc<Project>,
    active: String,
    /// Card currently in edit mode
    focused: Option<usize>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Fresh session over the default project
    pub fn new() -> Self {
        Self::boot(None)
    }

    /// Session over a snapshot (or the default project)
    pub fn boot(snapshot: Option<Project>) -> Self {
        let project = reduce(&Rc::new(Project::new()), &Action::boot(snapshot));
        let active = fallback_workspace(&project);
        Self {
            project,
            active,
            focused: None,
        }
    }

    /// Boot from persisted storage, falling back to the default project
    pub fn load(store: &dyn KeyValueStore, settings: &Settings) -> Self {
        Self::boot(persistence::load_project(store, &settings.storage_key))
    }

    pub fn project(&self) -> &Rc<Project> {
        &self.project
    }

    pub fn active_workspace(&self) -> &str {
        &self.active
    }

    /// Cards of the active workspace
    pub fn active_cards(&self) -> &[Card] {
        self.project.get(&self.active).unwrap_or(&[])
    }

    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// Apply an action; returns whether the project changed
    pub fn dispatch(&mut self, action: &Action) -> bool {
        let next = reduce(&self.project, action);
        if Rc::ptr_eq(&next, &self.project) {
            log::debug!("{} left the project unchanged", action.kind());
            return false;
        }
        self.project = next;
        self.follow_focus(action);
        self.repair_cursor();
        true
    }

    /// Apply an action in the view's JSON form. Unparsable actions are
    /// logged and ignored.
    pub fn dispatch_json(&mut self, json: &str) -> bool {
        match Action::from_json(json) {
            Ok(action) => self.dispatch(&action),
            Err(e) => {
                log::warn!("Ignoring malformed action: {}", e);
                false
            }
        }
    }

    /// Make an existing workspace active
    pub fn switch_workspace(&mut self, name: &str) -> bool {
        if !self.project.contains(name) {
            log::debug!("No workspace `{}` to switch to", name);
            return false;
        }
        self.focus_card(None);
        self.active = name.to_string();
        true
    }

    /// Create a workspace with a fresh generated name and switch to it
    pub fn add_workspace(&mut self) -> String {
        let mut num = self.project.len();
        let mut name = format!("{}{}", WORKSPACE_PREFIX, num);
        while self.project.contains(&name) {
            num += 1;
            name = format!("{}{}", WORKSPACE_PREFIX, num);
        }
        self.dispatch(&Action::add_workspace(Some(&name), None));
        self.focus_card(None);
        self.active = name.clone();
        log::info!("Created workspace `{}`", name);
        name
    }

    /// Remove a workspace. If it was active, the next active one is the
    /// first listed workspace, or the second if the deleted one was first.
    pub fn delete_workspace(&mut self, name: &str) -> bool {
        if !self.project.contains(name) {
            return false;
        }
        let next_active = if self.active != name {
            None
        } else if self.project.len() == 1 {
            Some(DEFAULT_WORKSPACE.to_string())
        } else if self.project.name_at(0) == Some(name) {
            self.project.name_at(1).map(str::to_string)
        } else {
            self.project.name_at(0).map(str::to_string)
        };

        if next_active.is_some() {
            self.focused = None;
        }
        let changed = self.dispatch(&Action::delete_workspace(name));
        if let Some(active) = next_active {
            self.active = active;
        }
        self.repair_cursor();
        log::info!("Deleted workspace `{}`", name);
        changed
    }

    /// Append a placeholder card to the active workspace and edit it
    pub fn create_card(&mut self) -> Option<usize> {
        let index = self.active_cards().len();
        let workspace = self.active.clone();
        if !self.dispatch(&Action::add_card(&workspace, Some(Card::placeholder()))) {
            return None;
        }
        self.focus_card(Some(index));
        self.focused
    }

    /// Replace one field of the card being edited
    pub fn edit_card(&mut self, field: CardField, value: &str) -> bool {
        let Some(index) = self.focused else {
            return false;
        };
        let Some(card) = self.active_cards().get(index) else {
            return false;
        };
        let card = card.with_field(field, value);
        let workspace = self.active.clone();
        self.dispatch(&Action::update(&workspace, index, card))
    }

    /// Move edit focus. Leaving a card commits its edit, which deletes it
    /// if its title is blank.
    pub fn focus_card(&mut self, index: Option<usize>) {
        let previous = self.focused;
        if previous == index {
            return;
        }
        self.focused = None;

        let mut index = index;
        if let Some(old) = previous {
            let workspace = self.active.clone();
            let deleted = self.dispatch(&Action::commit_edit(&workspace, old));
            if deleted {
                log::info!("Removed untitled card {} from `{}`", old, workspace);
                index = index.map(|i| if i > old { i - 1 } else { i });
            }
        }

        self.focused = index.filter(|i| *i < self.active_cards().len());
    }

    /// Reset the active workspace to a single placeholder card
    pub fn clear_workspace(&mut self) -> bool {
        self.focused = None;
        let workspace = self.active.clone();
        self.dispatch(&Action::clear(&workspace))
    }

    /// Export the active workspace's cards
    pub fn export_active(&self, settings: &Settings) -> Result<ExportFile, PersistError> {
        let file = persistence::export_workspace(&self.project, &self.active, settings)?;
        log::info!(
            "Exported {} card(s) from `{}`",
            self.active_cards().len(),
            self.active
        );
        Ok(file)
    }

    /// Replace the active workspace's cards with an imported card array.
    /// An empty array is rejected. On error nothing changes.
    pub fn import_into_active(&mut self, text: &str) -> Result<(), PersistError> {
        let cards = match persistence::import_cards(text) {
            Ok(cards) if cards.is_empty() => {
                log::warn!("Import rejected: {}", PersistError::EmptyImport);
                return Err(PersistError::EmptyImport);
            }
            Ok(cards) => cards,
            Err(e) => {
                log::warn!("Import rejected: {}", e);
                return Err(e);
            }
        };
        let count = cards.len();
        self.focused = None;
        let workspace = self.active.clone();
        self.dispatch(&Action::load(&workspace, Some(cards)));
        log::info!("Imported {} card(s) into `{}`", count, workspace);
        Ok(())
    }

    /// Save the project to storage (best effort)
    pub fn save(&self, store: &dyn KeyValueStore, settings: &Settings) -> Result<(), PersistError> {
        persistence::save_project(store, &settings.storage_key, &self.project)
    }

    /// Lifecycle hook for the host shell when the session ends. There is no
    /// retry: the host may be tearing down.
    pub fn on_shutdown(&self, store: &dyn KeyValueStore, settings: &Settings) {
        if !settings.save_on_exit {
            log::debug!("Save on exit disabled");
            return;
        }
        if let Err(e) = self.save(store, settings) {
            log::warn!("Project not saved on exit: {}", e);
        }
    }

    /// Keep the focus on the same card after an applied action moved or
    /// replaced cards of the active workspace
    fn follow_focus(&mut self, action: &Action) {
        let Some(focused) = self.focused else {
            return;
        };
        let active = Some(self.active.as_str());
        self.focused = match action {
            Action::DeleteCard { workspace, index: Some(index) }
            | Action::CommitEdit { workspace, index: Some(index) }
                if workspace.as_deref() == active =>
            {
                match (*index).cmp(&focused) {
                    Ordering::Less => Some(focused - 1),
                    Ordering::Equal => None,
                    Ordering::Greater => Some(focused),
                }
            }
            Action::Load { workspace, .. }
            | Action::AddWorkspace { workspace, .. }
            | Action::Clear { workspace }
                if workspace.as_deref() == active =>
            {
                None
            }
            Action::Boot { .. } => None,
            _ => Some(focused),
        };
    }

    /// Keep the active workspace and focus pointing at something that exists
    fn repair_cursor(&mut self) {
        if !self.project.contains(&self.active) {
            self.active = fallback_workspace(&self.project);
            self.focused = None;
        }
        if let Some(index) = self.focused {
            if index >= self.active_cards().len() {
                self.focused = None;
            }
        }
    }
}

/// `"workspace"` if present, else the first listed workspace
fn fallback_workspace(project: &Project) -> String {
    if project.contains(DEFAULT_WORKSPACE) {
        return DEFAULT_WORKSPACE.to_string();
    }
    project
        .name_at(0)
        .unwrap_or(DEFAULT_WORKSPACE)
        .to_string()
}
