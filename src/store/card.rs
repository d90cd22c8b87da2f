//! Card record and field editing
//!
//! A card has no identity of its own: it is addressed by its position in a
//! workspace's list.

use serde::{Deserialize, Serialize};

/// Title of the placeholder card
pub const PLACEHOLDER_TITLE: &str = "A Stupid Drone";
/// Tech tags of the placeholder card
pub const PLACEHOLDER_TECH: &str = "Javascript, React, Tailwind";
/// Comments of the placeholder card
pub const PLACEHOLDER_COMMENTS: &str = "- Hi\n- This is a comment\n- And another one";
/// Caption of the placeholder card
pub const PLACEHOLDER_CAPTION: &str =
    "A ESP32 drone that is really stupid and can't do anything, but it's still pretty cool";

/// A single note card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    /// Freeform tag list kept as one string
    pub tech: String,
    /// Multi-line notes
    pub comments: String,
    /// Single line, newlines are stripped on edit
    pub caption: String,
}

impl Default for Card {
    fn default() -> Self {
        Self::placeholder()
    }
}

impl Card {
    pub fn new(
        title: impl Into<String>,
        tech: impl Into<String>,
        comments: impl Into<String>,
        caption: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            tech: tech.into(),
            comments: comments.into(),
            caption: caption.into(),
        }
    }

    /// The fixed card used to seed new and cleared workspaces
    pub fn placeholder() -> Self {
        Self::new(
            PLACEHOLDER_TITLE,
            PLACEHOLDER_TECH,
            PLACEHOLDER_COMMENTS,
            PLACEHOLDER_CAPTION,
        )
    }

    /// A title that is empty after trimming marks the card for deletion
    /// once its edit session ends.
    pub fn has_blank_title(&self) -> bool {
        self.title.trim().is_empty()
    }

    /// Return a copy with one field replaced
    pub fn with_field(&self, field: CardField, value: &str) -> Self {
        let mut card = self.clone();
        match field {
            CardField::Title => card.title = value.to_string(),
            CardField::Tech => card.tech = value.to_string(),
            CardField::Comments => card.comments = value.to_string(),
            CardField::Caption => card.caption = strip_newlines(value),
        }
        card
    }
}

/// Editable card fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardField {
    Title,
    Tech,
    Comments,
    Caption,
}

impl CardField {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardField::Title => "title",
            CardField::Tech => "tech",
            CardField::Comments => "comments",
            CardField::Caption => "caption",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "title" => Some(CardField::Title),
            "tech" => Some(CardField::Tech),
            "comments" | "comment" => Some(CardField::Comments),
            "caption" => Some(CardField::Caption),
            _ => None,
        }
    }
}

fn strip_newlines(value: &str) -> String {
    value.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}
