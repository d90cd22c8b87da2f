//! Project persistence
//!
//! Two document shapes:
//! - the whole project as a tagged map envelope (stored under one key)
//! - a single workspace as a plain card array (export/import files)
//!
//! Failures are reported as [`PersistError`] and never touch the caller's
//! in-memory project.

pub mod envelope;
pub mod error;

use serde_json::Value;

pub use envelope::{MAP_TAG, TAG_FIELD};
pub use error::PersistError;

use crate::platform::KeyValueStore;
use crate::settings::Settings;
use crate::store::{Card, Project};
use envelope::Envelope;

/// Default key the project blob lives under
pub const STORAGE_KEY: &str = "data";
/// Default filename suggested for workspace exports
pub const EXPORT_FILENAME: &str = "minimal-organizer-save.txt";
/// Default MIME type of workspace exports
pub const EXPORT_MIME: &str = "text/plain";

/// A parsed document of either shape
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    /// Tagged map envelope
    Project(Project),
    /// Plain card array, meant for the active workspace
    Cards(Vec<Card>),
}

/// A file ready to hand to the browser for download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub mime: String,
    pub contents: String,
}

/// Encode a project as a tagged map envelope
pub fn encode_project(project: &Project) -> Result<String, PersistError> {
    Ok(serde_json::to_string(project)?)
}

/// Parse text of either shape
pub fn decode_document(text: &str) -> Result<Document, PersistError> {
    let value: Value = serde_json::from_str(text)?;
    let tagged = matches!(&value, Value::Object(map) if map.contains_key(TAG_FIELD));
    if tagged {
        let envelope: Envelope = serde_json::from_value(value)?;
        return Ok(Document::Project(envelope.into_project()?));
    }
    match value {
        Value::Array(_) => Ok(Document::Cards(serde_json::from_value(value)?)),
        _ => Err(PersistError::UnsupportedShape),
    }
}

/// Parse a tagged map envelope; card arrays are rejected
pub fn decode_project(text: &str) -> Result<Project, PersistError> {
    match decode_document(text)? {
        Document::Project(project) => Ok(project),
        Document::Cards(_) => Err(PersistError::UnsupportedShape),
    }
}

/// Parse an import file; only the plain card array is accepted
pub fn import_cards(text: &str) -> Result<Vec<Card>, PersistError> {
    match decode_document(text)? {
        Document::Cards(cards) => Ok(cards),
        Document::Project(_) => Err(PersistError::UnsupportedShape),
    }
}

/// Encode one workspace's cards as an export file
pub fn export_workspace(
    project: &Project,
    name: &str,
    settings: &Settings,
) -> Result<ExportFile, PersistError> {
    let cards = project
        .get(name)
        .ok_or_else(|| PersistError::MissingWorkspace(name.to_string()))?;
    Ok(ExportFile {
        filename: settings.export_filename.clone(),
        mime: settings.export_mime.clone(),
        contents: serde_json::to_string(cards)?,
    })
}

/// Read the persisted project (best effort)
///
/// A missing key yields `None` quietly; unreadable data is logged and also
/// yields `None`, so the caller keeps its default project.
pub fn load_project(store: &dyn KeyValueStore, key: &str) -> Option<Project> {
    let text = match store.get_item(key) {
        Ok(Some(text)) => text,
        Ok(None) => {
            log::info!("No saved project under `{}`, starting fresh", key);
            return None;
        }
        Err(e) => {
            log::error!("Could not read saved project: {}", e);
            return None;
        }
    };

    match decode_project(&text) {
        Ok(project) => {
            log::info!(
                "Loaded project: {} workspace(s), {} card(s)",
                project.len(),
                project.card_count()
            );
            Some(project)
        }
        Err(e) => {
            log::error!("Error parsing saved project: {}", e);
            None
        }
    }
}

/// Write the project under `key`
pub fn save_project(
    store: &dyn KeyValueStore,
    key: &str,
    project: &Project,
) -> Result<(), PersistError> {
    let json = encode_project(project)?;
    store.set_item(key, &json)?;
    log::info!(
        "Saved project: {} workspace(s), {} card(s)",
        project.len(),
        project.card_count()
    );
    Ok(())
}
