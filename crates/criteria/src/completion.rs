//! Clause completion and list affordances.
//!
//! A clause is *complete* once it has an attribute, an operator and a value
//! of the right cardinality for the operator's input kind (`text` when the
//! operator has no input or is not in the catalog):
//!
//! | Input kind | Complete when |
//! |------------|---------------|
//! | `multiselect` | at least one value |
//! | anything else | exactly one value, non-blank after trimming |
//!
//! Completion drives the list affordances: a new clause may only be appended
//! after the last clause, and only once that clause is complete. The list
//! never shrinks below one clause.

use crate::catalog::{Catalog, InputSpec};
use crate::clause::{LogicClause, TypedClause};

pub fn is_complete(clause: &LogicClause, catalog: &Catalog) -> bool {
    if clause.attribute().is_none() || clause.operator().is_none() {
        return false;
    }
    match clause.typed(catalog) {
        TypedClause::MultiSelect { values, .. } => !values.is_empty(),
        // An operator the catalog does not know is edited as free text.
        _ => single_value_present(&clause.value),
    }
}

fn single_value_present(value: &[String]) -> bool {
    matches!(value, [only] if !only.trim().is_empty())
}

/// Whether an "AND" may be added after the clause at `index`.
pub fn can_append_after(index: usize, clauses: &[LogicClause], catalog: &Catalog) -> bool {
    clauses.len().checked_sub(1) == Some(index) && is_complete(&clauses[index], catalog)
}

pub fn can_remove(clauses: &[LogicClause]) -> bool {
    clauses.len() > 1
}

/// The active operator's input configuration, text when it declares none.
pub fn operator_input<'a>(clause: &LogicClause, catalog: &'a Catalog) -> Option<&'a InputSpec> {
    catalog
        .operator_config(clause.attribute(), clause.operator())
        .map(|op| op.input_spec())
}
