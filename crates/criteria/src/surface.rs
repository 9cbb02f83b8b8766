//! # Editing Surface
//!
//! The contract between the store and whatever draws the editor. The surface
//! never renders anything itself; it hands out one [`ClauseRow`] per clause
//! with everything a row needs (choices, disabled states, affordances) and
//! accepts user intent as [`EditAction`]s.
//!
//! ## Row states
//!
//! ```text
//! attribute unset   → operator and value inputs disabled
//! operator unset    → value input disabled
//! clause complete   → "AND" enabled, on the last row only
//! more than one row → "remove" enabled on every row
//! ```
//!
//! [`apply`] enforces the same gates the rows advertise. It refuses:
//!
//! - an operator on a clause without an attribute, or one the attribute lacks
//! - a value on a clause without an operator
//! - an `Append` that a row would show disabled
//! - a `Remove` of the only clause

use crate::catalog::{AttributeOption, InputKind, InputSpec, OperatorOption};
use crate::clause::{ClauseId, ClausePatch, LogicClause};
use crate::completion::{can_append_after, can_remove, is_complete, operator_input};
use crate::store::ClauseStore;
use tracing::debug;

/// Everything a presentation layer needs to draw one clause.
#[derive(Debug, Clone, PartialEq)]
pub struct ClauseRow<'a> {
    pub index: usize,
    pub id: Option<ClauseId>,
    pub clause: &'a LogicClause,
    pub attribute_options: &'a [AttributeOption],
    pub operator_options: &'a [OperatorOption],
    /// The value input to show; `None` until the operator resolves.
    pub input: Option<&'a InputSpec>,
    pub operator_disabled: bool,
    pub value_disabled: bool,
    pub complete: bool,
    pub can_append: bool,
    pub can_remove: bool,
}

impl ClauseRow<'_> {
    pub fn input_kind(&self) -> Option<InputKind> {
        self.input.map(InputSpec::kind)
    }
}

pub fn rows(store: &ClauseStore) -> Vec<ClauseRow<'_>> {
    let catalog = store.catalog();
    let clauses = store.read();
    let removable = can_remove(clauses);

    clauses
        .iter()
        .enumerate()
        .map(|(index, clause)| ClauseRow {
            index,
            id: clause.id,
            clause,
            attribute_options: catalog.attributes(),
            operator_options: catalog.operators_for_attribute(clause.attribute()),
            input: operator_input(clause, catalog),
            operator_disabled: clause.attribute().is_none(),
            value_disabled: clause.operator().is_none(),
            complete: is_complete(clause, catalog),
            can_append: can_append_after(index, clauses, catalog),
            can_remove: removable,
        })
        .collect()
}

/// A user intent coming from the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAction {
    SetAttribute { index: usize, attribute: Option<String> },
    SetOperator { index: usize, operator: Option<String> },
    SetValue { index: usize, value: Vec<String> },
    /// "AND" pressed on the row at `after`.
    Append { after: usize },
    Remove { index: usize },
}

/// Apply `action` to `store`. Returns whether the store mutated.
pub fn apply(store: &mut ClauseStore, action: EditAction) -> bool {
    let len = store.len();
    let in_range = |index: usize| index < len;

    match action {
        EditAction::SetAttribute { index, attribute } if in_range(index) => {
            let patch = match attribute {
                Some(attribute) => ClausePatch::new().attribute(attribute),
                None => ClausePatch::new().clear_attribute(),
            };
            store.update_clause(index, patch);
            true
        }
        EditAction::SetOperator { index, operator: None } if in_range(index) => {
            store.update_clause(index, ClausePatch::new().clear_operator());
            true
        }
        EditAction::SetOperator { index, operator: Some(operator) }
            if offers_operator(store, index, &operator) =>
        {
            store.update_clause(index, ClausePatch::new().operator(operator));
            true
        }
        EditAction::SetValue { index, value } if has_operator(store, index) => {
            store.update_clause(index, ClausePatch::new().value(value));
            true
        }
        EditAction::Append { after } if can_append_after(after, store.read(), store.catalog()) => {
            store.add_clause();
            true
        }
        EditAction::Remove { index } if in_range(index) && can_remove(store.read()) => {
            store.remove_clause(index);
            true
        }
        refused => {
            debug!(?refused, len, "Edit action refused");
            false
        }
    }
}

fn offers_operator(store: &ClauseStore, index: usize, operator: &str) -> bool {
    let attribute = store.read().get(index).and_then(LogicClause::attribute);
    store
        .catalog()
        .operator_config(attribute, Some(operator))
        .is_some()
}

fn has_operator(store: &ClauseStore, index: usize) -> bool {
    store
        .read()
        .get(index)
        .is_some_and(|clause| clause.operator().is_some())
}
