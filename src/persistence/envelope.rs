//! Tagged map envelope
//!
//! JSON has no keyed map that keeps insertion order, so a project is written as
//! `{"dataType": "Map", "value": [[name, [card, ...]], ...]}`.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::PersistError;
use crate::store::{Card, Project};

/// Tag value marking an encoded map
pub const MAP_TAG: &str = "Map";

/// Field carrying the tag
pub const TAG_FIELD: &str = "dataType";

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    #[serde(rename = "dataType")]
    data_type: &'static str,
    value: Vec<(&'a str, &'a [Card])>,
}

/// Decoded but unchecked envelope
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    #[serde(rename = "dataType")]
    data_type: String,
    value: Vec<(String, Vec<Card>)>,
}

impl Envelope {
    /// Check the tag and the workspace names, then build the project
    pub(crate) fn into_project(self) -> Result<Project, PersistError> {
        if self.data_type != MAP_TAG {
            return Err(PersistError::UnknownTag(self.data_type));
        }
        let mut seen = HashSet::new();
        for (name, _) in &self.value {
            if name.is_empty() {
                return Err(PersistError::EmptyWorkspaceName);
            }
            if !seen.insert(name.as_str()) {
                return Err(PersistError::DuplicateWorkspace(name.clone()));
            }
        }
        Ok(Project::from_workspaces(self.value))
    }
}

impl Serialize for Project {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        EnvelopeRef {
            data_type: MAP_TAG,
            value: self.iter().collect(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Project {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Envelope::deserialize(deserializer)?
            .into_project()
            .map_err(serde::de::Error::custom)
    }
}
