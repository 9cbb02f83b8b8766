//! Property-based tests for the clause editing rules.
//!
//! These hold for any sequence of edits against the built-in catalog:
//! - A clause never keeps an operator its attribute does not offer
//! - A clause without an attribute holds neither operator nor value
//! - Only the last clause, once complete, may be appended after
//! - An uncontrolled store never shrinks below one clause through the surface
//! - Sentence formatting yields one leading capital and one terminal mark

use criteria::catalog::builtin::participation_catalog;
use criteria::completion::{can_append_after, is_complete};
use criteria::format::{format_clauses, format_list, FormatOptions};
use criteria::surface::{apply, rows, EditAction};
use criteria::{ClauseStore, LogicClause};
use proptest::prelude::*;

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn attribute_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        prop::sample::select(vec!["age", "country", "language", "gender", "email_domain", "shoe_size"])
            .prop_map(|attribute| Some(attribute.to_string())),
    ]
}

fn operator_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        prop::sample::select(vec!["=", "!=", ">", "<", "in", "not_in"])
            .prop_map(|operator| Some(operator.to_string())),
    ]
}

fn values_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::sample::select(vec!["us", "ca", "de", "en", "female", "17", "example.org", " ", ""])
            .prop_map(str::to_string),
        0..4,
    )
}

fn clause_strategy() -> impl Strategy<Value = LogicClause> {
    (attribute_strategy(), operator_strategy(), values_strategy()).prop_map(
        |(attribute, operator, value)| LogicClause {
            id: None,
            attribute,
            operator,
            value,
        },
    )
}

fn action_strategy() -> impl Strategy<Value = EditAction> {
    prop_oneof![
        (0usize..4, attribute_strategy())
            .prop_map(|(index, attribute)| EditAction::SetAttribute { index, attribute }),
        (0usize..4, operator_strategy())
            .prop_map(|(index, operator)| EditAction::SetOperator { index, operator }),
        (0usize..4, values_strategy()).prop_map(|(index, value)| EditAction::SetValue { index, value }),
        (0usize..4).prop_map(|after| EditAction::Append { after }),
        (0usize..4).prop_map(|index| EditAction::Remove { index }),
    ]
}

// =============================================================================
// EDITING PROPERTY TESTS
// =============================================================================

mod editing_properties {
    use super::*;

    proptest! {
        /// Setting an attribute leaves either no operator or one the attribute offers
        #[test]
        fn attribute_change_keeps_operator_valid(
            start in clause_strategy(),
            attribute in attribute_strategy(),
        ) {
            let catalog = participation_catalog();
            let mut store = ClauseStore::new(
                catalog.clone(),
                criteria::ClauseSource::Uncontrolled(vec![start]),
            );
            apply(&mut store, EditAction::SetAttribute { index: 0, attribute });

            let clause = &store.read()[0];
            if let Some(operator) = clause.operator() {
                prop_assert!(catalog.operator_config(clause.attribute(), Some(operator)).is_some());
            } else {
                prop_assert!(clause.value.is_empty());
            }
        }

        /// The surface never lets an uncontrolled store lose its last clause
        #[test]
        fn store_keeps_at_least_one_clause(actions in prop::collection::vec(action_strategy(), 0..30)) {
            let mut store = ClauseStore::uncontrolled(participation_catalog());
            for action in actions {
                apply(&mut store, action);
                prop_assert!(!store.is_empty());
            }
        }

        /// Append is offered only on the last row, and only when it is complete
        #[test]
        fn only_last_complete_clause_can_append(actions in prop::collection::vec(action_strategy(), 0..30)) {
            let mut store = ClauseStore::uncontrolled(participation_catalog());
            for action in actions {
                apply(&mut store, action);
            }

            let last = store.len() - 1;
            for row in rows(&store) {
                let expected = row.index == last && is_complete(row.clause, store.catalog());
                prop_assert_eq!(row.can_append, expected);
                prop_assert_eq!(
                    row.can_append,
                    can_append_after(row.index, store.read(), store.catalog())
                );
            }
        }

        /// After any edit, an attribute-less clause is empty and any operator is one its attribute offers
        #[test]
        fn clauses_stay_well_formed(actions in prop::collection::vec(action_strategy(), 0..30)) {
            let mut store = ClauseStore::uncontrolled(participation_catalog());
            for action in actions {
                apply(&mut store, action);

                for clause in store.read() {
                    if clause.attribute().is_none() {
                        prop_assert!(clause.operator().is_none());
                        prop_assert!(clause.value.is_empty());
                    }
                    if clause.operator().is_some() {
                        prop_assert!(store
                            .catalog()
                            .operator_config(clause.attribute(), clause.operator())
                            .is_some());
                    }
                }
            }
        }

        /// Every clause in the store has an id, and ids are distinct
        #[test]
        fn every_clause_has_a_distinct_id(actions in prop::collection::vec(action_strategy(), 0..30)) {
            let mut store = ClauseStore::uncontrolled(participation_catalog());
            for action in actions {
                apply(&mut store, action);
            }

            let mut ids: Vec<_> = store.read().iter().map(|clause| clause.id).collect();
            prop_assert!(ids.iter().all(Option::is_some));
            ids.sort();
            ids.dedup();
            prop_assert_eq!(ids.len(), store.len());
        }
    }
}

// =============================================================================
// FORMATTING PROPERTY TESTS
// =============================================================================

mod formatting_properties {
    use super::*;

    proptest! {
        /// Sentence mode starts with a capital and ends with exactly one period
        #[test]
        fn sentence_mode_is_punctuated_once(clauses in prop::collection::vec(clause_strategy(), 1..5)) {
            let catalog = participation_catalog();
            if let Some(text) = format_clauses(Some(clauses.as_slice()), &catalog, &FormatOptions::sentence()) {
                let first = text.chars().next().unwrap();
                prop_assert!(!first.is_lowercase());
                prop_assert!(text.ends_with('.'));
                prop_assert!(!text.ends_with(".."));
            }
        }

        /// Clamped lists end in `or K more` and show at most `max` items before it
        #[test]
        fn clamped_lists_summarize_the_rest(
            items in prop::collection::vec("[a-k]{1,8}", 2..10),
            max in 1usize..5,
        ) {
            let text = format_list(items.as_slice(), Some(max));
            if items.len() > max {
                let suffix = format!(" or {} more", items.len() - max);
                prop_assert!(text.ends_with(&suffix));
            } else {
                prop_assert!(!text.contains(" more"));
            }
        }
    }
}
