use thiserror::Error;

use crate::core::types::CombatantId;

#[derive(Error, Debug)]
pub enum GroupingError {
    #[error("Invalid grouping mode: {0}")]
    InvalidMode(String),

    #[error("Duplicate grouping mode key: {0}")]
    DuplicateModeKey(String),

    #[error("Invalid initiative formula: {0}")]
    Formula(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GroupingError>;

/// Non-fatal anomalies found during a grouping pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupingWarning {
    /// A combatant listed in more than one external partition.
    /// It stays in `kept_in` and is dropped from `dropped_from`.
    DuplicateMembership {
        id: CombatantId,
        kept_in: usize,
        dropped_from: usize,
    },
    /// An external partition names a combatant that is not in the snapshot
    UnknownMember { id: CombatantId, partition: usize },
    /// Combatants lacking the grouping path; they share one bucket
    MissingPathValue { path: String, count: usize },
}

impl std::fmt::Display for GroupingWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupingWarning::DuplicateMembership {
                id,
                kept_in,
                dropped_from,
            } => write!(
                f,
                "combatant {} is already in group {}; dropped from group {}",
                id, kept_in, dropped_from
            ),
            GroupingWarning::UnknownMember { id, partition } => {
                write!(f, "group {} names unknown combatant {}", partition, id)
            }
            GroupingWarning::MissingPathValue { path, count } => {
                write!(f, "{} combatant(s) have no value at '{}'", count, path)
            }
        }
    }
}
