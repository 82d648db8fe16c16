//! Grouping engine: path resolution, ordering and partitioning

pub mod builder;
pub mod compare;
pub mod modes;
pub mod path;

pub use builder::{
    build_groups, build_report, is_skipped, partitions_from_tags, Group, GroupKey, GroupSummary,
    GroupingReport,
};
pub use compare::{compare, compare_groups, is_foreign_key};
pub use modes::{GroupingMode, ModeRegistry};
pub use path::{resolve, resolve_value};
