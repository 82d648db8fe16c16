//! Deterministic total order over combatants and groups
//!
//! Values of the same kind compare by their own rule. Values of different
//! kinds compare by kind rank, so the order stays transitive across mixed
//! attribute types. Every branch ends in an identifier tie-break, so two
//! distinct combatants never compare equal.

use std::cmp::Ordering;

use serde_json::Value;

use crate::core::config::GroupOptions;
use crate::core::types::Combatant;
use crate::grouping::builder::Group;
use crate::grouping::path::{parse_numeric, resolve};

/// Length of host-generated document identifiers
const FOREIGN_KEY_LEN: usize = 16;

/// How a resolved value participates in ordering
#[derive(Debug)]
enum SortKey<'a> {
    Flag(bool),
    Number(f64),
    Label(&'a str),
    ForeignKey,
    Composite(&'a Value),
    /// Missing or `null`; always last
    Unsortable,
}

impl SortKey<'_> {
    fn rank(&self) -> u8 {
        match self {
            SortKey::Flag(_) => 0,
            SortKey::Number(_) => 1,
            SortKey::Label(_) => 2,
            SortKey::ForeignKey => 3,
            SortKey::Composite(_) => 4,
            SortKey::Unsortable => 5,
        }
    }
}

fn classify(value: Option<&Value>) -> SortKey<'_> {
    match value {
        Some(Value::Bool(flag)) => SortKey::Flag(*flag),
        Some(Value::Number(n)) => n.as_f64().map_or(SortKey::Unsortable, SortKey::Number),
        Some(Value::String(s)) => match parse_numeric(s) {
            Some(n) => SortKey::Number(n),
            None if is_foreign_key(s) => SortKey::ForeignKey,
            None => SortKey::Label(s),
        },
        Some(composite @ (Value::Array(_) | Value::Object(_))) => SortKey::Composite(composite),
        _ => SortKey::Unsortable,
    }
}

/// Whether a string looks like a host document identifier rather than a label
pub fn is_foreign_key(s: &str) -> bool {
    s.len() == FOREIGN_KEY_LEN && s.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Identifier used to order composite values: arrays reduce to their first element
fn composite_identifier(value: &Value) -> String {
    let element = match value {
        Value::Array(items) => items.first(),
        other => Some(other),
    };

    match element {
        None => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Object(map)) => match map.get("id").or_else(|| map.get("_id")) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => Value::Object(map.clone()).to_string(),
        },
        Some(other) => other.to_string(),
    }
}

/// Final tie-break: identifier ascending, then canonical position
fn by_id(a: &Combatant, b: &Combatant) -> Ordering {
    a.id.cmp(&b.id)
        .then_with(|| a.turn_index.cmp(&b.turn_index))
}

/// Rolled initiative descending; unrolled combatants sort last
fn by_initiative(a: &Combatant, b: &Combatant) -> Ordering {
    match (a.initiative, b.initiative) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Base letter for accented Latin characters, so `é` collates with `e`
fn fold_accent(c: char) -> char {
    match c {
        'à'..='å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'ď' | 'đ' => 'd',
        'è'..='ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => 'g',
        'ĥ' | 'ħ' => 'h',
        'ì'..='ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => 'i',
        'ĵ' => 'j',
        'ķ' => 'k',
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => 'l',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'ò'..='ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => 'o',
        'ŕ' | 'ŗ' | 'ř' => 'r',
        'ś' | 'ŝ' | 'ş' | 'š' => 's',
        'ţ' | 'ť' | 'ŧ' => 't',
        'ù'..='ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'ŵ' => 'w',
        'ý' | 'ÿ' | 'ŷ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => other,
    }
}

fn collation_key(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).map(fold_accent).collect()
}

/// Reverse collation order: base letters, then case-insensitive, then exact
fn reverse_lexical(a: &str, b: &str) -> Ordering {
    collation_key(b)
        .cmp(&collation_key(a))
        .then_with(|| b.to_lowercase().cmp(&a.to_lowercase()))
        .then_with(|| b.cmp(a))
}

/// Compare two combatants under a grouping path
///
/// `Less` means `a` precedes `b`. The result is `Equal` only when both
/// arguments are the same record.
pub fn compare(a: &Combatant, b: &Combatant, path: &str, options: &GroupOptions) -> Ordering {
    if !options.sort_enabled {
        return a
            .turn_index
            .cmp(&b.turn_index)
            .then_with(|| by_id(a, b));
    }

    let ia = resolve(a, path);
    let ib = resolve(b, path);

    let primary = match (classify(ia.as_ref()), classify(ib.as_ref())) {
        // true sorts after false
        (SortKey::Flag(x), SortKey::Flag(y)) => x.cmp(&y),
        // Higher values act first
        (SortKey::Number(x), SortKey::Number(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (SortKey::Label(x), SortKey::Label(y)) => reverse_lexical(x, y),
        (SortKey::ForeignKey, SortKey::ForeignKey) => by_initiative(a, b),
        (SortKey::Composite(x), SortKey::Composite(y)) => {
            composite_identifier(x).cmp(&composite_identifier(y))
        }
        (x, y) => x.rank().cmp(&y.rank()),
    };

    primary.then_with(|| by_id(a, b))
}

/// Order two groups by their first (already sorted) members
pub fn compare_groups(a: &Group<'_>, b: &Group<'_>, path: &str, options: &GroupOptions) -> Ordering {
    compare(a.first(), b.first(), path, options)
}
