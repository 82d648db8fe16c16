//! Turn progression by group

pub mod intercept;
pub mod navigator;

pub use intercept::{intercept_turn_change, TurnChange};
pub use navigator::{first_turns, next_group_turn, step_boundary, Direction};
