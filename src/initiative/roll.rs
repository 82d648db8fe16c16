//! One initiative roll per group
//!
//! The group's first member rolls; every member receives the result. The
//! output is a list of updates for the host to persist in bulk.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::{Combatant, CombatantId};
use crate::grouping::builder::{Group, GroupKey};
use crate::initiative::formula::InitiativeFormula;

/// Produces an initiative value for a group's representative
pub trait InitiativeRoller {
    fn roll(&mut self, representative: &Combatant) -> f64;
}

/// Rolls a dice formula with the given RNG
#[derive(Debug, Clone)]
pub struct FormulaRoller<R: Rng> {
    formula: InitiativeFormula,
    rng: R,
}

impl<R: Rng> FormulaRoller<R> {
    pub fn new(formula: InitiativeFormula, rng: R) -> Self {
        Self { formula, rng }
    }
}

impl<R: Rng> InitiativeRoller for FormulaRoller<R> {
    fn roll(&mut self, representative: &Combatant) -> f64 {
        self.formula.evaluate(representative, &mut self.rng)
    }
}

/// Which groups receive a roll
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollOptions {
    /// Roll even when every member already has initiative
    pub reroll: bool,
    /// Leave groups containing a player-owned combatant alone
    pub skip_player_groups: bool,
}

/// A new initiative value for one combatant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InitiativeUpdate {
    pub id: CombatantId,
    pub initiative: f64,
}

/// The single roll made for a group and the updates it implies
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRoll {
    pub key: GroupKey,
    pub value: f64,
    pub updates: Vec<InitiativeUpdate>,
}

/// Whether a group should roll under `options`
pub fn is_eligible(group: &Group<'_>, options: &RollOptions) -> bool {
    if options.skip_player_groups && group.members().iter().any(|c| c.has_player_owner) {
        return false;
    }
    options.reroll || group.members().iter().any(|c| c.initiative.is_none())
}

/// Roll once for each eligible group, in group order
pub fn roll_group_initiative(
    groups: &[Group<'_>],
    options: &RollOptions,
    roller: &mut impl InitiativeRoller,
) -> Vec<GroupRoll> {
    groups
        .iter()
        .filter(|group| is_eligible(group, options))
        .map(|group| {
            let value = roller.roll(group.first());
            tracing::debug!(
                "Group led by {} rolled {} for {} member(s)",
                group.first().id,
                value,
                group.len()
            );

            GroupRoll {
                key: group.key.clone(),
                value,
                updates: group
                    .members()
                    .iter()
                    .map(|c| InitiativeUpdate {
                        id: c.id.clone(),
                        initiative: value,
                    })
                    .collect(),
            }
        })
        .collect()
}
