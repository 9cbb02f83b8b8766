use criteria::catalog::builtin::participation_catalog;
use criteria::evaluate::{matches, Profile};
use criteria::format::{format_clauses, format_clauses_error, FormatOptions};
use criteria::schema::validate_clauses;
use criteria::surface::{apply, rows, EditAction};
use criteria::{ClauseStore, LogicClause};
use std::cell::RefCell;
use std::rc::Rc;

type Changes = Rc<RefCell<Vec<Vec<LogicClause>>>>;

fn controlled_store(value: Vec<LogicClause>) -> (ClauseStore, Changes) {
    let changes: Changes = Rc::default();
    let sink = changes.clone();
    let store = ClauseStore::controlled(participation_catalog(), value)
        .with_on_change(move |clauses: &[LogicClause]| sink.borrow_mut().push(clauses.to_vec()));
    (store, changes)
}

/// Plays the host: takes the last emitted list and feeds it back.
fn echo(store: &mut ClauseStore, changes: &Changes) {
    let next = changes.borrow().last().cloned().unwrap();
    store.set_value(next);
}

#[test]
fn test_build_criteria_from_scratch() {
    let mut store = ClauseStore::uncontrolled(participation_catalog());

    apply(&mut store, EditAction::SetAttribute { index: 0, attribute: Some("age".into()) });
    apply(&mut store, EditAction::SetOperator { index: 0, operator: Some(">".into()) });
    apply(&mut store, EditAction::SetValue { index: 0, value: vec!["17".into()] });
    assert!(apply(&mut store, EditAction::Append { after: 0 }));
    apply(&mut store, EditAction::SetAttribute { index: 1, attribute: Some("country".into()) });
    apply(&mut store, EditAction::SetOperator { index: 1, operator: Some("in".into()) });
    apply(
        &mut store,
        EditAction::SetValue { index: 1, value: vec!["us".into(), "ca".into()] },
    );

    let clauses = store.persisted();
    let catalog = store.catalog();
    assert_eq!(validate_clauses(&clauses, catalog), None);
    assert_eq!(
        format_clauses(Some(clauses.as_slice()), catalog, &FormatOptions::sentence()).as_deref(),
        Some("Age is greater than 17 and country is in United States or Canada.")
    );

    let adult_canadian: Profile = [("age", "40"), ("country", "ca")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    assert!(matches(&clauses, catalog, &adult_canadian));
}

#[test]
fn test_controlled_round_trip_keeps_ids() {
    let (mut store, changes) = controlled_store(vec![
        LogicClause::new("age", ">", ["17"]),
        LogicClause::new("gender", "=", ["female"]),
    ]);
    let ids: Vec<_> = store.read().iter().map(|c| c.id).collect();

    apply(&mut store, EditAction::SetValue { index: 1, value: vec!["male".into()] });
    // Controlled: nothing changes until the host answers.
    assert_eq!(store.read()[1].value, vec!["female"]);

    echo(&mut store, &changes);
    assert_eq!(store.read()[1].value, vec!["male"]);
    let after: Vec<_> = store.read().iter().map(|c| c.id).collect();
    assert_eq!(ids, after);

    // A host that strips ids still gets the same ones back by position.
    store.set_value(store.persisted());
    let stripped: Vec<_> = store.read().iter().map(|c| c.id).collect();
    assert_eq!(ids, stripped);
}

#[test]
fn test_changing_attribute_resets_dependent_fields() {
    let (mut store, changes) = controlled_store(vec![LogicClause::new("country", "in", ["us", "ca"])]);

    apply(&mut store, EditAction::SetAttribute { index: 0, attribute: Some("language".into()) });
    let emitted = changes.borrow().last().cloned().unwrap();
    // `in` exists for language too, so operator and values survive.
    assert_eq!(emitted[0].operator(), Some("in"));

    apply(&mut store, EditAction::SetAttribute { index: 0, attribute: Some("age".into()) });
    let emitted = changes.borrow().last().cloned().unwrap();
    assert_eq!(emitted[0].attribute(), Some("age"));
    assert_eq!(emitted[0].operator(), None);
    assert!(emitted[0].value.is_empty());
}

#[test]
fn test_rows_after_host_round_trip() {
    let (mut store, changes) = controlled_store(vec![LogicClause::empty()]);
    apply(&mut store, EditAction::SetAttribute { index: 0, attribute: Some("gender".into()) });
    echo(&mut store, &changes);

    let rows = rows(&store);
    assert_eq!(rows.len(), 1);
    assert!(!rows[0].operator_disabled);
    assert!(rows[0].value_disabled);
    assert_eq!(rows[0].operator_options.len(), 2);
}

#[test]
fn test_invalid_list_report() {
    let catalog = participation_catalog();
    let clauses: Vec<LogicClause> = serde_json::from_str(
        r#"[
            {"attribute": "age", "operator": ">", "value": ["old"]},
            {"attribute": "country", "operator": "in", "value": ["us"]},
            {"attribute": "gender", "value": null}
        ]"#,
    )
    .unwrap();

    let errors = validate_clauses(&clauses, &catalog);
    assert_eq!(
        format_clauses_error(errors.as_ref()).as_deref(),
        Some("Clause 1: Value: Value must be a number\nClause 3: Operator: An operator is required")
    );
}
