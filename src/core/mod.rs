pub mod config;
pub mod error;
pub mod types;

pub use config::{GroupOptions, TrackerConfig};
pub use error::{GroupingError, GroupingWarning, Result};
pub use types::{Combatant, CombatantId, TurnIndex};
