//! Grouping modes: named strategies for forming groups

use serde::{Deserialize, Serialize};

use crate::core::error::{GroupingError, Result};

/// A named grouping strategy
///
/// An empty `path` means membership comes from an external partition
/// (manually assigned groups) instead of an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupingMode {
    pub key: String,
    #[serde(default)]
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl GroupingMode {
    pub fn path(key: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            path: path.into(),
            label: None,
        }
    }

    pub fn external(key: impl Into<String>) -> Self {
        Self::path(key, "")
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn is_external(&self) -> bool {
        self.path.is_empty()
    }
}

/// Ordered list of grouping modes with unique keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ModeRegistry {
    modes: Vec<GroupingMode>,
}

impl ModeRegistry {
    /// Build a registry, rejecting duplicate keys
    pub fn new(modes: Vec<GroupingMode>) -> Result<Self> {
        for (i, mode) in modes.iter().enumerate() {
            if modes[..i].iter().any(|earlier| earlier.key == mode.key) {
                return Err(GroupingError::DuplicateModeKey(mode.key.clone()));
            }
        }
        Ok(Self { modes })
    }

    /// Modes offered when none are configured
    pub fn builtin() -> Self {
        Self {
            modes: vec![
                GroupingMode::path("initiative", "initiative").with_label("Initiative"),
                GroupingMode::path("actor-type", "actor.type").with_label("Actor Type"),
                GroupingMode::path("disposition", "token.disposition").with_label("Disposition"),
                GroupingMode::path("name", "name").with_label("Name"),
                GroupingMode::external("manual").with_label("Manual"),
            ],
        }
    }

    pub fn get(&self, key: &str) -> Option<&GroupingMode> {
        self.modes.iter().find(|mode| mode.key == key)
    }

    /// Look up a mode, failing with `InvalidMode` when it is not registered
    pub fn require(&self, key: &str) -> Result<&GroupingMode> {
        self.get(key)
            .ok_or_else(|| GroupingError::InvalidMode(key.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &GroupingMode> {
        self.modes.iter()
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }
}

impl Default for ModeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
