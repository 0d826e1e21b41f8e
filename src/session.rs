use crate::error::SessionError;
use indexmap::IndexMap;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info};

pub const USER_ID_KEY: &str = "user_id";

/// Read-only lookup of values stored by an earlier sign-in.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    values: IndexMap<String, String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// String map loaded once from a YAML (or JSON) file.
#[derive(Debug, Clone, Default)]
pub struct FileSessionStore {
    values: IndexMap<String, String>,
}

impl FileSessionStore {
    /// A missing file is an empty session, not an error.
    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no session file, starting without a user id");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SessionError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let values = Self::parse(raw.as_str()).map_err(|source| SessionError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), keys = values.len(), "session loaded");
        Ok(Self { values })
    }

    fn parse(raw: &str) -> Result<IndexMap<String, String>, serde_yaml::Error> {
        if raw.trim().is_empty() {
            return Ok(IndexMap::new());
        }
        let parsed: IndexMap<String, serde_yaml::Value> = serde_yaml::from_str(raw)?;
        Ok(parsed
            .into_iter()
            .filter_map(|(key, value)| scalar_text(&value).map(|text| (key, text)))
            .collect())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

fn scalar_text(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(text) => Some(text.clone()),
        serde_yaml::Value::Number(number) => Some(number.to_string()),
        serde_yaml::Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}
