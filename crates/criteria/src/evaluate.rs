//! Checking a participant against a clause list.
//!
//! A [`Profile`] maps attribute values (`"age"`, `"country"`) to the
//! participant's value for that attribute. A clause list matches when every
//! complete clause holds; incomplete clauses are still being edited and are
//! skipped, so a list of one empty clause matches everyone.
//!
//! | Operator | Holds when |
//! |----------|------------|
//! | `=` / `!=` | profile value equals / differs from the clause value |
//! | `>` / `<` | numeric comparison; non-numbers never hold |
//! | `in` / `not_in` | profile value is / is not one of the clause values |
//!
//! Equality compares numerically for `number` inputs (`"18"` equals `"18.0"`)
//! and textually otherwise. A clause on an attribute the profile lacks does
//! not hold, whatever its operator.

use crate::catalog::{Catalog, InputKind};
use crate::clause::LogicClause;
use crate::completion::is_complete;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::warn;

pub type Profile = BTreeMap<String, String>;

/// Whether `profile` satisfies every complete clause.
pub fn matches(clauses: &[LogicClause], catalog: &Catalog, profile: &Profile) -> bool {
    clauses
        .iter()
        .filter(|clause| is_complete(clause, catalog))
        .all(|clause| clause_holds(clause, catalog, profile))
}

/// Indices of the complete clauses `profile` fails.
pub fn failing_clauses(clauses: &[LogicClause], catalog: &Catalog, profile: &Profile) -> Vec<usize> {
    clauses
        .iter()
        .enumerate()
        .filter(|(_, clause)| is_complete(clause, catalog))
        .filter(|(_, clause)| !clause_holds(clause, catalog, profile))
        .map(|(index, _)| index)
        .collect()
}

fn clause_holds(clause: &LogicClause, catalog: &Catalog, profile: &Profile) -> bool {
    let (Some(attribute), Some(operator)) = (clause.attribute(), clause.operator()) else {
        return false;
    };
    let Some(actual) = profile.get(attribute) else {
        return false;
    };
    let numeric = catalog
        .operator_config(Some(attribute), Some(operator))
        .is_some_and(|op| op.input_kind() == InputKind::Number);
    let expected = clause.value.first().map(String::as_str).unwrap_or_default();

    match operator {
        "=" => equal(actual, expected, numeric),
        "!=" => !equal(actual, expected, numeric),
        ">" => compare_numbers(actual, expected) == Some(Ordering::Greater),
        "<" => compare_numbers(actual, expected) == Some(Ordering::Less),
        "in" => clause.value.iter().any(|value| value == actual),
        "not_in" => !clause.value.iter().any(|value| value == actual),
        other => {
            warn!(attribute, operator = other, "Unknown operator; clause does not hold");
            false
        }
    }
}

fn equal(actual: &str, expected: &str, numeric: bool) -> bool {
    if numeric {
        compare_numbers(actual, expected) == Some(Ordering::Equal)
    } else {
        actual == expected
    }
}

fn compare_numbers(actual: &str, expected: &str) -> Option<Ordering> {
    let actual: f64 = actual.trim().parse().ok()?;
    let expected: f64 = expected.trim().parse().ok()?;
    actual.partial_cmp(&expected)
}
