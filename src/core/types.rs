//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable identifier of a combatant, owned by the host
///
/// Compared lexically (byte order) wherever the comparator needs a tie-break.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CombatantId(pub String);

impl CombatantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CombatantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CombatantId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Position in the canonical turn order
pub type TurnIndex = usize;

/// One participant in the encounter, as seen by the grouping engine
///
/// The host owns combatants; the engine only reads a snapshot of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Combatant {
    pub id: CombatantId,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub has_player_owner: bool,
    #[serde(default)]
    pub initiative: Option<f64>,
    /// Arbitrary nested attribute tree (actor data, token data, flags)
    #[serde(default)]
    pub attributes: Value,
    pub turn_index: TurnIndex,
}

fn default_visible() -> bool {
    true
}

impl Combatant {
    /// A visible, non-hidden, non-player combatant with no attributes
    pub fn new(id: impl Into<String>, turn_index: TurnIndex) -> Self {
        Self {
            id: CombatantId::new(id),
            visible: true,
            hidden: false,
            has_player_owner: false,
            initiative: None,
            attributes: Value::Null,
            turn_index,
        }
    }

    pub fn with_initiative(mut self, initiative: f64) -> Self {
        self.initiative = Some(initiative);
        self
    }

    pub fn with_attributes(mut self, attributes: Value) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn invisible(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn player_owned(mut self) -> Self {
        self.has_player_owner = true;
        self
    }
}

/// Load a combatant snapshot from JSON text (an array of combatants)
pub fn parse_snapshot(json: &str) -> crate::core::error::Result<Vec<Combatant>> {
    Ok(serde_json::from_str(json)?)
}
