use std::collections::BTreeMap;
use std::io::Read;

use serde::Deserialize;

use crate::error::EventError;

/// A monitoring event as delivered by Sensu on the handler's stdin.
///
/// Only the parts the handler reads are modelled; unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub entity: Option<Entity>,
    #[serde(default)]
    pub check: Option<Check>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Entity {
    #[serde(default)]
    pub metadata: ObjectMeta,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub annotations: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Check {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub status: u32,
    #[serde(default)]
    pub output: String,
    #[serde(default)]
    pub command: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub interval: u32,
    #[serde(default)]
    pub occurrences: i64,
    #[serde(default)]
    pub issued: i64,
    #[serde(default)]
    pub executed: i64,
    #[serde(default)]
    pub duration: f64,
}

impl Event {
    /// Decode and validate an event from a reader (stdin in production).
    ///
    /// # Errors
    ///
    /// Fails when the reader errors, the payload is not valid JSON, or the
    /// event carries no check.
    pub fn from_reader(mut reader: impl Read) -> std::result::Result<Self, EventError> {
        let mut raw = Vec::new();
        reader
            .read_to_end(&mut raw)
            .map_err(|source| EventError::Read { source })?;
        Self::from_slice(&raw)
    }

    /// # Errors
    ///
    /// See [`Event::from_reader`].
    pub fn from_slice(raw: &[u8]) -> std::result::Result<Self, EventError> {
        let event: Self =
            serde_json::from_slice(raw).map_err(|source| EventError::Decode { source })?;
        event.validate()?;
        Ok(event)
    }

    fn validate(&self) -> std::result::Result<(), EventError> {
        if self.check.is_none() {
            return Err(EventError::MissingCheck);
        }
        Ok(())
    }

    /// The event's check. Present on every event built through
    /// [`Event::from_slice`].
    ///
    /// # Errors
    ///
    /// Returns [`EventError::MissingCheck`] for hand-built events without one.
    pub fn check(&self) -> std::result::Result<&Check, EventError> {
        self.check.as_ref().ok_or(EventError::MissingCheck)
    }
}

fn null_as_empty<'de, D>(de: D) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<BTreeMap<String, String>>::deserialize(de)?.unwrap_or_default())
}
