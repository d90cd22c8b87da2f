//! Minimal Organizer - a visual card organizer with named workspaces
//!
//! Core modules:
//! - `store`: Pure project model and action reducer
//! - `session`: Command surface the view drives (active workspace, edit focus)
//! - `persistence`: Tagged map envelope, export/import, save/load
//! - `platform`: Browser/native platform abstraction
//! - `settings`: Persisted preferences

pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod store;

pub use persistence::{Document, ExportFile, PersistError};
pub use session::Session;
pub use settings::{LogLevel, Settings};
pub use store::{Action, Card, CardField, Project, reduce};

#[cfg(target_arch = "wasm32")]
pub use platform::web::WebOrganizer;
