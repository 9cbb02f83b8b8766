//! Host-form validation.
//!
//! Checks a clause list against a catalog the way a host form validates it
//! before submitting, and reports the problems in the [`ClauseErrors`] shape
//! that [`format_clauses_error`](crate::format::format_clauses_error) renders.
//!
//! A list holding a single, entirely empty clause is valid: that is the
//! state a fresh editor starts in, and it means "no criteria".

use crate::catalog::{Catalog, ChoiceOption, InputSpec};
use crate::clause::LogicClause;
use crate::format::{ClauseError, ClauseErrors, FieldError, ValueError};

pub const ATTRIBUTE_REQUIRED: &str = "An attribute is required";
pub const UNKNOWN_ATTRIBUTE: &str = "Unknown attribute";
pub const OPERATOR_REQUIRED: &str = "An operator is required";
pub const OPERATOR_UNAVAILABLE: &str = "Operator is not available for this attribute";
pub const VALUE_REQUIRED: &str = "A value is required";
pub const SINGLE_VALUE: &str = "Only one value is allowed";
pub const NOT_A_NUMBER: &str = "Value must be a number";
pub const NOT_AN_OPTION: &str = "Value is not one of the allowed options";

/// Validate every clause; `None` when the list is acceptable.
pub fn validate_clauses(clauses: &[LogicClause], catalog: &Catalog) -> Option<ClauseErrors> {
    if let [only] = clauses {
        if only.is_empty() {
            return None;
        }
    }

    let entries: Vec<Option<ClauseError>> = clauses
        .iter()
        .map(|clause| validate_clause(clause, catalog))
        .collect();

    entries
        .iter()
        .any(Option::is_some)
        .then_some(ClauseErrors::PerClause(entries))
}

/// Validate one clause; `None` when it is valid.
pub fn validate_clause(clause: &LogicClause, catalog: &Catalog) -> Option<ClauseError> {
    let mut error = ClauseError::default();

    let Some(attribute) = clause.attribute() else {
        error.attribute = Some(FieldError::new(ATTRIBUTE_REQUIRED));
        if clause.operator().is_none() {
            error.operator = Some(FieldError::new(OPERATOR_REQUIRED));
        }
        if clause.value.is_empty() {
            error.value = Some(ValueError::Single(FieldError::new(VALUE_REQUIRED)));
        }
        return Some(error);
    };
    if catalog.attribute(attribute).is_none() {
        error.attribute = Some(FieldError::new(UNKNOWN_ATTRIBUTE));
        return Some(error);
    }

    let Some(operator) = clause.operator() else {
        error.operator = Some(FieldError::new(OPERATOR_REQUIRED));
        return Some(error);
    };
    let Some(config) = catalog.operator_config(Some(attribute), Some(operator)) else {
        error.operator = Some(FieldError::new(OPERATOR_UNAVAILABLE));
        return Some(error);
    };

    error.value = validate_value(&clause.value, config.input_spec());
    (!error.is_empty()).then_some(error)
}

fn validate_value(values: &[String], input: &InputSpec) -> Option<ValueError> {
    let single = |message: &str| Some(ValueError::Single(FieldError::new(message)));

    match input {
        InputSpec::MultiSelect { options } => {
            if values.is_empty() {
                return single(VALUE_REQUIRED);
            }
            let entries: Vec<Option<FieldError>> = values
                .iter()
                .map(|value| (!is_option(options, value)).then(|| FieldError::new(NOT_AN_OPTION)))
                .collect();
            entries.iter().any(Option::is_some).then_some(ValueError::List(entries))
        }
        InputSpec::Text | InputSpec::Number | InputSpec::Select { .. } => {
            let value = match values {
                [] => return single(VALUE_REQUIRED),
                [value] => value.trim(),
                _ => return single(SINGLE_VALUE),
            };
            if value.is_empty() {
                return single(VALUE_REQUIRED);
            }
            match input {
                InputSpec::Number if value.parse::<f64>().is_err() => single(NOT_A_NUMBER),
                InputSpec::Select { options } if !is_option(options, value) => single(NOT_AN_OPTION),
                _ => None,
            }
        }
    }
}

fn is_option(options: &[ChoiceOption], value: &str) -> bool {
    options.iter().any(|option| option.value == value)
}
