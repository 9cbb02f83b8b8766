//! Validation error reports.
//!
//! The host's form layer reports clause-list errors in one of two shapes:
//!
//! ```text
//! { "message": "..." }                                  -- the list as a whole
//! [ null, { "attribute": { "message": "..." } }, ... ]  -- parallel to the clauses
//! ```
//!
//! A per-clause entry may carry its own `message` or nested `attribute`,
//! `operator` and `value` errors. A `value` error is either a single error or
//! a list of per-entry errors (for multiselect values). Every field is
//! optional: missing pieces are left out of the report, never an error.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FieldError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueError {
    List(Vec<Option<FieldError>>),
    Single(FieldError),
}

impl ValueError {
    /// The message shown for a value: a list only surfaces its first entry.
    fn message(&self) -> Option<&str> {
        match self {
            ValueError::Single(error) => error.message(),
            ValueError::List(entries) => entries.first()?.as_ref()?.message(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<FieldError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<FieldError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ValueError>,
}

impl ClauseError {
    pub fn is_empty(&self) -> bool {
        self.message.is_none()
            && self.attribute.is_none()
            && self.operator.is_none()
            && self.value.is_none()
    }

    /// The text after `Clause N: `, if there is any.
    fn describe(&self) -> Option<String> {
        if let Some(message) = self.message.as_deref() {
            return Some(message.to_string());
        }

        let parts: Vec<String> = [
            ("Attribute", self.attribute.as_ref().and_then(FieldError::message)),
            ("Operator", self.operator.as_ref().and_then(FieldError::message)),
            ("Value", self.value.as_ref().and_then(ValueError::message)),
        ]
        .into_iter()
        .filter_map(|(field, message)| message.map(|message| format!("{}: {}", field, message)))
        .collect();

        (!parts.is_empty()).then(|| parts.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClauseErrors {
    PerClause(Vec<Option<ClauseError>>),
    Single(FieldError),
}

impl ClauseErrors {
    pub fn has_errors(&self) -> bool {
        match self {
            ClauseErrors::Single(error) => error.message.is_some(),
            ClauseErrors::PerClause(entries) => entries
                .iter()
                .flatten()
                .any(|entry| entry.describe().is_some()),
        }
    }
}

/// Render an error payload as a report, one `Clause N: ...` line per clause
/// with something to say.
pub fn format_clauses_error(error: Option<&ClauseErrors>) -> Option<String> {
    match error? {
        ClauseErrors::Single(error) => error.message.clone(),
        ClauseErrors::PerClause(entries) => {
            let lines: Vec<String> = entries
                .iter()
                .enumerate()
                .filter_map(|(index, entry)| {
                    let text = entry.as_ref()?.describe()?;
                    Some(format!("Clause {}: {}", index + 1, text))
                })
                .collect();
            (!lines.is_empty()).then(|| lines.join("\n"))
        }
    }
}
