//! Group initiative rolls

pub mod formula;
pub mod roll;

pub use formula::{InitiativeFormula, Term};
pub use roll::{
    is_eligible, roll_group_initiative, FormulaRoller, GroupRoll, InitiativeRoller,
    InitiativeUpdate, RollOptions,
};
