//! Tracker configuration
//!
//! Everything the host would normally keep in its settings store: the active
//! grouping mode, the available modes, ordering/skipping switches and the
//! formula used for group initiative. Loaded from TOML and passed explicitly
//! into each call; nothing here is global.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{GroupingError, Result};
use crate::grouping::modes::{GroupingMode, ModeRegistry};
use crate::initiative::formula::InitiativeFormula;

/// Ordering and skipping switches read fresh on every grouping pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupOptions {
    /// Order members and groups by the grouping path
    ///
    /// When off, members keep canonical turn order.
    pub sort_enabled: bool,

    /// Leave hidden combatants out of path-based groups
    pub skip_hidden: bool,

    /// Leave player-owned combatants out of path-based groups
    pub skip_player_characters: bool,

    /// Advance turns by group boundary instead of by combatant
    pub skip_by_group: bool,
}

impl Default for GroupOptions {
    fn default() -> Self {
        Self {
            sort_enabled: true,
            skip_hidden: false,
            skip_player_characters: false,
            skip_by_group: true,
        }
    }
}

/// Full tracker configuration as stored on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Key of the grouping mode in effect
    pub active_mode: String,

    /// Attribute path holding manually assigned group tags
    pub group_tag_path: String,

    /// Dice formula rolled once per group, e.g. `1d20 + @attributes.init.mod`
    pub initiative_formula: String,

    pub options: GroupOptions,

    /// Available modes; the built-in set when empty
    pub modes: Vec<GroupingMode>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            active_mode: "initiative".to_string(),
            group_tag_path: "flags.ctg.group".to_string(),
            initiative_formula: "1d20".to_string(),
            options: GroupOptions::default(),
            modes: Vec::new(),
        }
    }
}

impl TrackerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TrackerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// The configured modes, or the built-in set when none are listed
    pub fn registry(&self) -> Result<ModeRegistry> {
        if self.modes.is_empty() {
            Ok(ModeRegistry::builtin())
        } else {
            ModeRegistry::new(self.modes.clone())
        }
    }

    pub fn formula(&self) -> Result<InitiativeFormula> {
        InitiativeFormula::parse(&self.initiative_formula)
    }

    /// Check configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let registry = self.registry()?;
        registry.require(&self.active_mode)?;

        if self.group_tag_path.is_empty() {
            return Err(GroupingError::InvalidConfig(
                "group_tag_path must not be empty".into(),
            ));
        }

        self.formula()?;
        Ok(())
    }
}
