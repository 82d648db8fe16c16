//! Partition combatants into ordered groups
//!
//! Groups are rebuilt from scratch on every call. Nothing about a previous
//! pass is remembered; manual membership survives only through the external
//! partition the caller supplies.

use ahash::AHashMap;
use serde::Serialize;

use crate::core::config::GroupOptions;
use crate::core::error::{GroupingWarning, Result};
use crate::core::types::{Combatant, CombatantId, TurnIndex};
use crate::grouping::compare::{compare, compare_groups};
use crate::grouping::modes::ModeRegistry;
use crate::grouping::path::resolve;

/// Where a group's shared identity comes from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum GroupKey {
    /// Members have no value at the grouping path
    Missing,
    /// Canonical JSON text of the shared value
    Value(String),
    /// Position of the external partition the group came from
    External(usize),
}

/// A non-empty, ordered run of combatants treated as one unit
#[derive(Debug, Clone, PartialEq)]
pub struct Group<'a> {
    pub key: GroupKey,
    members: Vec<&'a Combatant>,
}

impl<'a> Group<'a> {
    fn new(key: GroupKey, first: &'a Combatant) -> Self {
        Self {
            key,
            members: vec![first],
        }
    }

    pub fn members(&self) -> &[&'a Combatant] {
        &self.members
    }

    /// Representative member; groups are never empty
    pub fn first(&self) -> &'a Combatant {
        self.members[0]
    }

    /// Turn index of the group's first member (the group boundary)
    pub fn first_turn(&self) -> TurnIndex {
        self.first().turn_index
    }

    pub fn ids(&self) -> Vec<CombatantId> {
        self.members.iter().map(|c| c.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, id: &CombatantId) -> bool {
        self.members.iter().any(|c| &c.id == id)
    }

    pub fn summary(&self) -> GroupSummary {
        GroupSummary {
            key: self.key.clone(),
            first_turn: self.first_turn(),
            members: self.ids(),
        }
    }
}

/// Serializable view of a group for the rendering side
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub key: GroupKey,
    pub first_turn: TurnIndex,
    pub members: Vec<CombatantId>,
}

/// Groups from one pass plus the non-fatal anomalies encountered
#[derive(Debug, Clone, Default)]
pub struct GroupingReport<'a> {
    pub groups: Vec<Group<'a>>,
    pub warnings: Vec<GroupingWarning>,
}

/// Whether a combatant is left out of path-based grouping
pub fn is_skipped(combatant: &Combatant, options: &GroupOptions) -> bool {
    !combatant.visible
        || (options.skip_hidden && combatant.hidden)
        || (options.skip_player_characters && combatant.has_player_owner)
}

/// Build the ordered groups for `mode`
///
/// `external` holds the caller-supplied partition used by external modes;
/// path modes ignore it.
pub fn build_groups<'a>(
    combatants: &'a [Combatant],
    mode: &str,
    modes: &ModeRegistry,
    options: &GroupOptions,
    external: &[Vec<CombatantId>],
) -> Result<Vec<Group<'a>>> {
    build_report(combatants, mode, modes, options, external).map(|report| report.groups)
}

/// Same as [`build_groups`], also returning the warnings raised
pub fn build_report<'a>(
    combatants: &'a [Combatant],
    mode: &str,
    modes: &ModeRegistry,
    options: &GroupOptions,
    external: &[Vec<CombatantId>],
) -> Result<GroupingReport<'a>> {
    let active = modes.require(mode)?;

    let report = if active.is_external() {
        group_external(combatants, external)
    } else {
        group_by_path(combatants, &active.path, options)
    };

    for warning in &report.warnings {
        match warning {
            GroupingWarning::MissingPathValue { .. } => tracing::debug!("{}", warning),
            _ => tracing::warn!("{}", warning),
        }
    }
    tracing::debug!(
        "Mode '{}' produced {} group(s) from {} combatant(s)",
        mode,
        report.groups.len(),
        combatants.len()
    );

    Ok(report)
}

/// Canonical text of a grouping value
///
/// Numbers are keyed by their value, so `15` and `15.0` share a bucket.
fn bucket_key(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Number(n) => match n.as_f64() {
            Some(f) if f == 0.0 => "0".to_string(),
            Some(f) => f.to_string(),
            None => value.to_string(),
        },
        other => other.to_string(),
    }
}

fn group_by_path<'a>(
    combatants: &'a [Combatant],
    path: &str,
    options: &GroupOptions,
) -> GroupingReport<'a> {
    let mut slots: AHashMap<GroupKey, usize> = AHashMap::new();
    let mut groups: Vec<Group<'a>> = Vec::new();
    let mut missing = 0;

    for combatant in combatants.iter().filter(|c| !is_skipped(c, options)) {
        let key = match resolve(combatant, path) {
            Some(value) => GroupKey::Value(bucket_key(&value)),
            None => {
                missing += 1;
                GroupKey::Missing
            }
        };

        match slots.get(&key) {
            Some(&slot) => groups[slot].members.push(combatant),
            None => {
                slots.insert(key.clone(), groups.len());
                groups.push(Group::new(key, combatant));
            }
        }
    }

    for group in &mut groups {
        group.members.sort_by(|a, b| compare(a, b, path, options));
    }
    groups.sort_by(|a, b| compare_groups(a, b, path, options));

    let mut warnings = Vec::new();
    if missing > 0 {
        warnings.push(GroupingWarning::MissingPathValue {
            path: path.to_string(),
            count: missing,
        });
    }

    GroupingReport { groups, warnings }
}

fn group_external<'a>(
    combatants: &'a [Combatant],
    partitions: &[Vec<CombatantId>],
) -> GroupingReport<'a> {
    let by_id: AHashMap<&CombatantId, &'a Combatant> =
        combatants.iter().map(|c| (&c.id, c)).collect();
    let mut assigned: AHashMap<&CombatantId, usize> = AHashMap::new();
    let mut groups = Vec::new();
    let mut warnings = Vec::new();

    for (partition, ids) in partitions.iter().enumerate() {
        let mut group: Option<Group<'a>> = None;

        for id in ids {
            let Some(&combatant) = by_id.get(id) else {
                warnings.push(GroupingWarning::UnknownMember {
                    id: id.clone(),
                    partition,
                });
                continue;
            };

            if let Some(&kept_in) = assigned.get(&combatant.id) {
                warnings.push(GroupingWarning::DuplicateMembership {
                    id: id.clone(),
                    kept_in,
                    dropped_from: partition,
                });
                continue;
            }
            assigned.insert(&combatant.id, partition);

            match group.as_mut() {
                Some(group) => group.members.push(combatant),
                None => group = Some(Group::new(GroupKey::External(partition), combatant)),
            }
        }

        groups.extend(group);
    }

    GroupingReport { groups, warnings }
}

/// Derive an external partition from group tags stored on the combatants
///
/// One partition per distinct tag value, in order of first appearance.
/// Combatants without a tag (or with a `null` tag) are left out.
pub fn partitions_from_tags(combatants: &[Combatant], tag_path: &str) -> Vec<Vec<CombatantId>> {
    let mut slots: AHashMap<String, usize> = AHashMap::new();
    let mut partitions: Vec<Vec<CombatantId>> = Vec::new();

    for combatant in combatants {
        let tag = match resolve(combatant, tag_path) {
            None | Some(serde_json::Value::Null) => continue,
            Some(tag) => tag.to_string(),
        };

        let slot = *slots.entry(tag).or_insert_with(|| {
            partitions.push(Vec::new());
            partitions.len() - 1
        });
        partitions[slot].push(combatant.id.clone());
    }

    partitions
}
