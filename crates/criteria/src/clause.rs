//! # Clauses
//!
//! A [`LogicClause`] is one attribute/operator/value condition. Its fields are
//! loosely typed on purpose: a clause is edited field by field, so it spends
//! most of its life partially filled in. What shape a clause *has* is decided
//! by the catalog, and [`LogicClause::typed`] is the one place that decision
//! is made.
//!
//! ## Invariants
//!
//! - `value` is always a `Vec`, possibly empty. `null` and a missing field both
//!   deserialize to `[]`.
//! - With no `attribute`, `operator` is unset and `value` is empty.
//! - Unless the operator's input is `multiselect`, `value` holds at most one entry.
//! - `id` is assigned by the store, survives edits, and is never serialized.

use crate::catalog::{Catalog, ChoiceOption, InputKind, OperatorOption};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

/// Rendering identity of a clause instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClauseId(Uuid);

impl ClauseId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClauseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClauseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicClause {
    #[serde(skip)]
    pub id: Option<ClauseId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub value: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl LogicClause {
    /// A clause with nothing chosen yet.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new<I, S>(attribute: impl Into<String>, operator: impl Into<String>, value: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: None,
            attribute: Some(attribute.into()),
            operator: Some(operator.into()),
            value: value.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.attribute.is_none() && self.operator.is_none() && self.value.is_empty()
    }

    pub fn attribute(&self) -> Option<&str> {
        self.attribute.as_deref()
    }

    pub fn operator(&self) -> Option<&str> {
        self.operator.as_deref()
    }

    /// The clause with its id dropped, as persisted by the host.
    pub fn persisted(&self) -> Self {
        Self {
            id: None,
            ..self.clone()
        }
    }

    /// Resolve this clause's shape against `catalog`.
    pub fn typed<'a>(&'a self, catalog: &'a Catalog) -> TypedClause<'a> {
        let (Some(attribute), Some(operator)) = (self.attribute(), self.operator()) else {
            return TypedClause::Unresolved;
        };
        let Some(config) = catalog.operator_config(Some(attribute), Some(operator)) else {
            return TypedClause::Unresolved;
        };

        let single = self.value.first().map(String::as_str);
        match config.input_kind() {
            InputKind::Text => TypedClause::Text {
                attribute,
                operator: config,
                value: single,
            },
            InputKind::Number => TypedClause::Number {
                attribute,
                operator: config,
                value: single,
            },
            InputKind::Select => TypedClause::Select {
                attribute,
                operator: config,
                options: config.input_spec().options(),
                value: single,
            },
            InputKind::MultiSelect => TypedClause::MultiSelect {
                attribute,
                operator: config,
                options: config.input_spec().options(),
                values: &self.value,
            },
        }
    }
}

/// A clause viewed through its resolved input kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypedClause<'a> {
    /// Attribute or operator unset, or not found in the catalog.
    Unresolved,
    Text {
        attribute: &'a str,
        operator: &'a OperatorOption,
        value: Option<&'a str>,
    },
    Number {
        attribute: &'a str,
        operator: &'a OperatorOption,
        value: Option<&'a str>,
    },
    Select {
        attribute: &'a str,
        operator: &'a OperatorOption,
        options: &'a [ChoiceOption],
        value: Option<&'a str>,
    },
    MultiSelect {
        attribute: &'a str,
        operator: &'a OperatorOption,
        options: &'a [ChoiceOption],
        values: &'a [String],
    },
}

impl<'a> TypedClause<'a> {
    pub fn kind(&self) -> Option<InputKind> {
        match self {
            TypedClause::Unresolved => None,
            TypedClause::Text { .. } => Some(InputKind::Text),
            TypedClause::Number { .. } => Some(InputKind::Number),
            TypedClause::Select { .. } => Some(InputKind::Select),
            TypedClause::MultiSelect { .. } => Some(InputKind::MultiSelect),
        }
    }
}

/// A partial update to a clause. Unset fields leave the clause untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClausePatch {
    pub attribute: Option<Option<String>>,
    pub operator: Option<Option<String>>,
    pub value: Option<Vec<String>>,
}

impl ClausePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(Some(attribute.into()));
        self
    }

    pub fn clear_attribute(mut self) -> Self {
        self.attribute = Some(None);
        self
    }

    pub fn operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = Some(Some(operator.into()));
        self
    }

    pub fn clear_operator(mut self) -> Self {
        self.operator = Some(None);
        self
    }

    pub fn value<I, S>(mut self, value: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.value = Some(value.into_iter().map(Into::into).collect());
        self
    }

    pub fn touches_attribute(&self) -> bool {
        self.attribute.is_some()
    }

    /// Overwrite the fields this patch sets. The id is never patched.
    pub fn merge_into(&self, clause: &LogicClause) -> LogicClause {
        let mut next = clause.clone();
        if let Some(attribute) = &self.attribute {
            next.attribute = attribute.clone();
        }
        if let Some(operator) = &self.operator {
            next.operator = operator.clone();
        }
        if let Some(value) = &self.value {
            next.value = value.clone();
        }
        next
    }
}
