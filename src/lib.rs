//! Combat Groups - grouped turn order for tabletop combat trackers
//!
//! Clusters combatants by a configurable attribute path, orders them
//! deterministically, skips turns by group boundary and rolls one initiative
//! value per group. Every call is a pure function of the snapshot it is given.

pub mod core;
pub mod grouping;
pub mod initiative;
pub mod turns;

pub use crate::core::{
    Combatant, CombatantId, GroupOptions, GroupingError, GroupingWarning, TrackerConfig,
};
pub use grouping::{build_groups, build_report, Group, GroupKey, ModeRegistry};
pub use turns::{intercept_turn_change, next_group_turn, Direction, TurnChange};
