//! Group-boundary turn navigation
//!
//! A group boundary is the turn index of a group's first member. Moving a
//! turn forward or backward lands on the neighbouring boundary, wrapping at
//! either end of the round.

use serde::{Deserialize, Serialize};

use crate::core::types::TurnIndex;
use crate::grouping::builder::Group;

/// Which way a turn change moves through the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Backward,
}

/// Sorted group boundaries for a set of groups
pub fn first_turns(groups: &[Group<'_>]) -> Vec<TurnIndex> {
    let mut turns: Vec<TurnIndex> = groups.iter().map(Group::first_turn).collect();
    turns.sort_unstable();
    turns
}

/// Step from `current` to the neighbouring boundary in `boundaries`
///
/// `boundaries` must be sorted ascending. When `current` is not itself a
/// boundary (a turn in the middle of a group), forward lands on the first
/// boundary and backward on the last. Returns `None` for an empty list.
pub fn step_boundary(
    boundaries: &[TurnIndex],
    current: TurnIndex,
    direction: Direction,
) -> Option<TurnIndex> {
    let len = boundaries.len();
    if len == 0 {
        return None;
    }

    let target = match (boundaries.iter().position(|&t| t == current), direction) {
        (Some(i), Direction::Forward) => (i + 1) % len,
        (Some(i), Direction::Backward) => (i + len - 1) % len,
        (None, Direction::Forward) => 0,
        (None, Direction::Backward) => len - 1,
    };

    Some(boundaries[target])
}

/// Turn index to move to when skipping by group
///
/// Returns `None` when there are fewer than two groups, since skipping
/// between groups is meaningless there.
pub fn next_group_turn(
    groups: &[Group<'_>],
    current: TurnIndex,
    direction: Direction,
) -> Option<TurnIndex> {
    if groups.len() < 2 {
        return None;
    }
    step_boundary(&first_turns(groups), current, direction)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDARIES: [TurnIndex; 3] = [0, 5, 9];

    #[test]
    fn test_forward_to_next_boundary() {
        assert_eq!(step_boundary(&BOUNDARIES, 0, Direction::Forward), Some(5));
        assert_eq!(step_boundary(&BOUNDARIES, 5, Direction::Forward), Some(9));
    }

    #[test]
    fn test_backward_to_previous_boundary() {
        assert_eq!(step_boundary(&BOUNDARIES, 9, Direction::Backward), Some(5));
    }

    #[test]
    fn test_wraps_at_both_ends() {
        assert_eq!(step_boundary(&BOUNDARIES, 9, Direction::Forward), Some(0));
        assert_eq!(step_boundary(&BOUNDARIES, 0, Direction::Backward), Some(9));
    }

    #[test]
    fn test_mid_group_anchors_to_ends() {
        assert_eq!(step_boundary(&BOUNDARIES, 3, Direction::Forward), Some(0));
        assert_eq!(step_boundary(&BOUNDARIES, 3, Direction::Backward), Some(9));
    }

    #[test]
    fn test_empty_boundaries() {
        assert_eq!(step_boundary(&[], 0, Direction::Forward), None);
    }

    #[test]
    fn test_too_few_groups() {
        assert_eq!(next_group_turn(&[], 0, Direction::Forward), None);
    }
}
