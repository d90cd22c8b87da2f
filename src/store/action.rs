//! Store actions
//!
//! Fields are optional so that any action a view can send, including
//! ill-formed ones, has a representation. The reducer treats missing
//! required fields as a no-op.

use serde::Deserialize;

use super::card::Card;
use super::project::Project;

/// A single state transition request
///
/// The JSON form mirrors the view's dispatcher:
/// `{"type": "ADD_CARD", "workspaceIndex": "workspace", "card": {...}}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Replace the card at `index`
    Update {
        #[serde(default, rename = "workspaceIndex")]
        workspace: Option<String>,
        #[serde(default, rename = "id")]
        index: Option<usize>,
        #[serde(default)]
        card: Option<Card>,
    },
    /// Append a card (placeholder if none given)
    AddCard {
        #[serde(default, rename = "workspaceIndex")]
        workspace: Option<String>,
        #[serde(default)]
        card: Option<Card>,
    },
    /// Remove the card at `index`
    DeleteCard {
        #[serde(default, rename = "workspaceIndex")]
        workspace: Option<String>,
        #[serde(default, rename = "id")]
        index: Option<usize>,
    },
    /// Replace (or create) a workspace's whole card list
    Load {
        #[serde(default, rename = "workspaceIndex")]
        workspace: Option<String>,
        #[serde(default, rename = "workspace")]
        cards: Option<Vec<Card>>,
    },
    /// Insert or overwrite a workspace
    AddWorkspace {
        #[serde(default, rename = "workspaceIndex")]
        workspace: Option<String>,
        #[serde(default, rename = "workspace")]
        cards: Option<Vec<Card>>,
    },
    /// Reset a workspace to a single placeholder card
    Clear {
        #[serde(default, rename = "workspaceIndex")]
        workspace: Option<String>,
    },
    /// Remove a workspace
    DeleteWorkspace {
        #[serde(default, rename = "workspaceIndex")]
        workspace: Option<String>,
    },
    /// Replace the whole project
    Boot {
        #[serde(default)]
        project: Option<Project>,
    },
    /// End of an edit session: delete the card if its title is blank
    CommitEdit {
        #[serde(default, rename = "workspaceIndex")]
        workspace: Option<String>,
        #[serde(default, rename = "id")]
        index: Option<usize>,
    },
    /// Any unrecognized action type
    #[serde(other)]
    Unknown,
}

impl Action {
    pub fn update(workspace: &str, index: usize, card: Card) -> Self {
        Action::Update {
            workspace: Some(workspace.to_string()),
            index: Some(index),
            card: Some(card),
        }
    }

    pub fn add_card(workspace: &str, card: Option<Card>) -> Self {
        Action::AddCard {
            workspace: Some(workspace.to_string()),
            card,
        }
    }

    pub fn delete_card(workspace: &str, index: usize) -> Self {
        Action::DeleteCard {
            workspace: Some(workspace.to_string()),
            index: Some(index),
        }
    }

    pub fn load(workspace: &str, cards: Option<Vec<Card>>) -> Self {
        Action::Load {
            workspace: Some(workspace.to_string()),
            cards,
        }
    }

    pub fn add_workspace(workspace: Option<&str>, cards: Option<Vec<Card>>) -> Self {
        Action::AddWorkspace {
            workspace: workspace.map(str::to_string),
            cards,
        }
    }

    pub fn clear(workspace: &str) -> Self {
        Action::Clear {
            workspace: Some(workspace.to_string()),
        }
    }

    pub fn delete_workspace(workspace: &str) -> Self {
        Action::DeleteWorkspace {
            workspace: Some(workspace.to_string()),
        }
    }

    pub fn boot(project: Option<Project>) -> Self {
        Action::Boot { project }
    }

    pub fn commit_edit(workspace: &str, index: usize) -> Self {
        Action::CommitEdit {
            workspace: Some(workspace.to_string()),
            index: Some(index),
        }
    }

    /// Parse the view's JSON form
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Dispatcher name, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Update { .. } => "UPDATE",
            Action::AddCard { .. } => "ADD_CARD",
            Action::DeleteCard { .. } => "DELETE_CARD",
            Action::Load { .. } => "LOAD",
            Action::AddWorkspace { .. } => "ADD_WORKSPACE",
            Action::Clear { .. } => "CLEAR",
            Action::DeleteWorkspace { .. } => "DELETE_WORKSPACE",
            Action::Boot { .. } => "BOOT",
            Action::CommitEdit { .. } => "COMMIT_EDIT",
            Action::Unknown => "UNKNOWN",
        }
    }
}
