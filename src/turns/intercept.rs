//! Rewrite a host turn change so it advances by group

use serde::{Deserialize, Serialize};

use crate::core::config::GroupOptions;
use crate::core::types::TurnIndex;
use crate::grouping::builder::Group;
use crate::turns::navigator::{next_group_turn, Direction};

/// A round/turn transition requested by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnChange {
    pub from_round: u32,
    pub from_turn: TurnIndex,
    pub to_round: u32,
    pub to_turn: TurnIndex,
}

impl TurnChange {
    /// Direction of travel; a round change outweighs the turn change
    pub fn direction(&self) -> Option<Direction> {
        use std::cmp::Ordering::*;

        match (
            self.to_round.cmp(&self.from_round),
            self.to_turn.cmp(&self.from_turn),
        ) {
            (Greater, _) | (Equal, Greater) => Some(Direction::Forward),
            (Less, _) | (Equal, Less) => Some(Direction::Backward),
            (Equal, Equal) => None,
        }
    }
}

/// Corrected turn for `change`, or `None` to leave the host's change alone
pub fn intercept_turn_change(
    groups: &[Group<'_>],
    change: &TurnChange,
    options: &GroupOptions,
) -> Option<TurnIndex> {
    if !options.skip_by_group || groups.len() <= 1 {
        return None;
    }

    let direction = change.direction()?;
    let target = next_group_turn(groups, change.from_turn, direction)?;

    tracing::debug!(
        "Turn change {}:{} -> {}:{} redirected to turn {}",
        change.from_round,
        change.from_turn,
        change.to_round,
        change.to_turn,
        target
    );

    Some(target)
}
