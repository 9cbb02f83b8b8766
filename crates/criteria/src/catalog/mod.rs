//! # Attribute/Operator Catalog
//!
//! The catalog is the schema the whole engine is driven by. It is supplied by
//! the host application and describes:
//!
//! - **Attributes**: the filterable fields (`age`, `country`, ...)
//! - **Operators**: the comparisons each attribute allows (`=`, `in`, ...)
//! - **Inputs**: how an operator's value is entered, which also fixes how many
//!   values a clause may hold
//!
//! | Input | Values | Edited as |
//! |-------|--------|-----------|
//! | `text` (or no input) | at most 1 | free text |
//! | `number` | at most 1 | numeric text |
//! | `select` | at most 1 | one of `options` |
//! | `multiselect` | any | several of `options` |
//!
//! Lookups never fail: an unset or unknown key resolves to "nothing found"
//! (an empty slice or `None`), which callers display as a disabled input.
//!
//! Catalogs loaded from outside the program go through [`Catalog::validate`],
//! which checks the structural invariants (non-empty operator lists and unique
//! keys at every level).

pub mod builtin;

use crate::error::{CriteriaError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// One enumerated choice of a `select` or `multiselect` input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

impl ChoiceOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// How an operator's value is entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputSpec {
    Text,
    Number,
    Select { options: Vec<ChoiceOption> },
    #[serde(rename = "multiselect")]
    MultiSelect { options: Vec<ChoiceOption> },
}

impl InputSpec {
    /// The input of an operator that declares none.
    pub const FREE_TEXT: &'static InputSpec = &InputSpec::Text;

    pub fn kind(&self) -> InputKind {
        match self {
            InputSpec::Text => InputKind::Text,
            InputSpec::Number => InputKind::Number,
            InputSpec::Select { .. } => InputKind::Select,
            InputSpec::MultiSelect { .. } => InputKind::MultiSelect,
        }
    }

    /// Enumerated options, empty for free-form inputs.
    pub fn options(&self) -> &[ChoiceOption] {
        match self {
            InputSpec::Select { options } | InputSpec::MultiSelect { options } => options,
            InputSpec::Text | InputSpec::Number => &[],
        }
    }

    /// Label for `value`, if this input enumerates it.
    pub fn label_for(&self, value: &str) -> Option<&str> {
        self.options()
            .iter()
            .find(|option| option.value == value)
            .map(|option| option.label.as_str())
    }
}

/// The shape of a clause's value, without the option payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Text,
    Number,
    Select,
    #[serde(rename = "multiselect")]
    MultiSelect,
}

impl InputKind {
    /// Whether a clause of this kind may hold more than one value.
    pub fn is_multi(self) -> bool {
        matches!(self, InputKind::MultiSelect)
    }
}

/// A comparison operator available on an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorOption {
    pub value: String,
    pub label: String,
    /// Absent means free text, single value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<InputSpec>,
}

impl OperatorOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            input: None,
        }
    }

    pub fn with_input(mut self, input: InputSpec) -> Self {
        self.input = Some(input);
        self
    }

    /// The operator's input, defaulting to free text.
    pub fn input_spec(&self) -> &InputSpec {
        self.input.as_ref().unwrap_or(InputSpec::FREE_TEXT)
    }

    pub fn input_kind(&self) -> InputKind {
        self.input_spec().kind()
    }
}

/// A filterable attribute and the operators it allows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeOption {
    pub value: String,
    pub label: String,
    pub operators: Vec<OperatorOption>,
}

impl AttributeOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            operators: Vec::new(),
        }
    }

    pub fn with_operator(mut self, operator: OperatorOption) -> Self {
        self.operators.push(operator);
        self
    }

    pub fn operator(&self, value: &str) -> Option<&OperatorOption> {
        self.operators.iter().find(|op| op.value == value)
    }
}

/// The full set of attributes a clause list can be built from.
///
/// Serializes as a bare JSON array of attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    attributes: Vec<AttributeOption>,
}

impl Catalog {
    pub fn new(attributes: Vec<AttributeOption>) -> Self {
        Self { attributes }
    }

    pub fn attributes(&self) -> &[AttributeOption] {
        &self.attributes
    }

    pub fn attribute(&self, value: &str) -> Option<&AttributeOption> {
        self.attributes.iter().find(|attr| attr.value == value)
    }

    /// Operators allowed on `attribute`; empty if unset or unknown.
    pub fn operators_for_attribute(&self, attribute: Option<&str>) -> &[OperatorOption] {
        attribute
            .and_then(|value| self.attribute(value))
            .map(|attr| attr.operators.as_slice())
            .unwrap_or(&[])
    }

    /// The definition of `operator` on `attribute`, if both resolve.
    pub fn operator_config(
        &self,
        attribute: Option<&str>,
        operator: Option<&str>,
    ) -> Option<&OperatorOption> {
        let operator = operator?;
        self.operators_for_attribute(attribute)
            .iter()
            .find(|op| op.value == operator)
    }

    /// Checks the structural invariants, reporting the first violation.
    pub fn validate(&self) -> Result<()> {
        let mut seen_attrs = HashSet::new();
        for attr in &self.attributes {
            if !seen_attrs.insert(attr.value.as_str()) {
                return Err(CriteriaError::DuplicateAttribute(attr.value.clone()));
            }
            if attr.operators.is_empty() {
                return Err(CriteriaError::NoOperators(attr.value.clone()));
            }

            let mut seen_ops = HashSet::new();
            for op in &attr.operators {
                if !seen_ops.insert(op.value.as_str()) {
                    return Err(CriteriaError::DuplicateOperator {
                        attribute: attr.value.clone(),
                        operator: op.value.clone(),
                    });
                }

                let mut seen_options = HashSet::new();
                for option in op.input_spec().options() {
                    if !seen_options.insert(option.value.as_str()) {
                        return Err(CriteriaError::DuplicateOption {
                            attribute: attr.value.clone(),
                            operator: op.value.clone(),
                            option: option.value.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Parse a catalog from its JSON form and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Read a catalog JSON file and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        tracing::debug!(
            path = %path.display(),
            attributes = catalog.attributes.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }
}

/// The input kind of `operator` on `attribute`.
///
/// `None` when either key does not resolve; [`InputKind::Text`] when the
/// operator declares no input.
pub fn resolve_input_kind(
    catalog: &Catalog,
    attribute: Option<&str>,
    operator: Option<&str>,
) -> Option<InputKind> {
    catalog
        .operator_config(attribute, operator)
        .map(OperatorOption::input_kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            AttributeOption::new("age", "Age")
                .with_operator(OperatorOption::new("=", "equals").with_input(InputSpec::Number))
                .with_operator(OperatorOption::new(">", "greater than").with_input(InputSpec::Number)),
            AttributeOption::new("nickname", "Nickname").with_operator(OperatorOption::new("=", "equals")),
            AttributeOption::new("country", "Country").with_operator(
                OperatorOption::new("in", "is in").with_input(InputSpec::MultiSelect {
                    options: vec![
                        ChoiceOption::new("us", "United States"),
                        ChoiceOption::new("ca", "Canada"),
                    ],
                }),
            ),
        ])
    }

    #[test]
    fn test_operators_for_known_attribute() {
        let catalog = catalog();
        let ops = catalog.operators_for_attribute(Some("age"));
        let values: Vec<_> = ops.iter().map(|op| op.value.as_str()).collect();
        assert_eq!(values, vec!["=", ">"]);
    }

    #[test]
    fn test_operators_for_unset_or_unknown_attribute_is_empty() {
        let catalog = catalog();
        assert!(catalog.operators_for_attribute(None).is_empty());
        assert!(catalog.operators_for_attribute(Some("shoe_size")).is_empty());
    }

    #[test]
    fn test_operator_config_resolves_both_keys() {
        let catalog = catalog();
        let op = catalog.operator_config(Some("country"), Some("in")).unwrap();
        assert_eq!(op.label, "is in");
        assert!(catalog.operator_config(Some("country"), Some("=")).is_none());
        assert!(catalog.operator_config(Some("country"), None).is_none());
        assert!(catalog.operator_config(None, Some("in")).is_none());
    }

    #[test]
    fn test_resolve_input_kind_defaults_to_text() {
        let catalog = catalog();
        assert_eq!(
            resolve_input_kind(&catalog, Some("nickname"), Some("=")),
            Some(InputKind::Text)
        );
        assert_eq!(
            resolve_input_kind(&catalog, Some("age"), Some(">")),
            Some(InputKind::Number)
        );
        assert_eq!(
            resolve_input_kind(&catalog, Some("country"), Some("in")),
            Some(InputKind::MultiSelect)
        );
        assert_eq!(resolve_input_kind(&catalog, Some("age"), Some("in")), None);
    }

    #[test]
    fn test_label_for_enumerated_value() {
        let catalog = catalog();
        let input = catalog
            .operator_config(Some("country"), Some("in"))
            .unwrap()
            .input_spec();
        assert_eq!(input.label_for("ca"), Some("Canada"));
        assert_eq!(input.label_for("mx"), None);
        assert_eq!(InputSpec::Number.label_for("3"), None);
    }

    #[test]
    fn test_validate_accepts_well_formed_catalog() {
        assert!(catalog().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_attribute_without_operators() {
        let catalog = Catalog::new(vec![AttributeOption::new("age", "Age")]);
        match catalog.validate() {
            Err(CriteriaError::NoOperators(attr)) => assert_eq!(attr, "age"),
            other => panic!("Expected NoOperators, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_duplicate_attribute() {
        let attr = AttributeOption::new("age", "Age").with_operator(OperatorOption::new("=", "equals"));
        let catalog = Catalog::new(vec![attr.clone(), attr]);
        assert!(matches!(
            catalog.validate(),
            Err(CriteriaError::DuplicateAttribute(_))
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_operator() {
        let catalog = Catalog::new(vec![AttributeOption::new("age", "Age")
            .with_operator(OperatorOption::new("=", "equals"))
            .with_operator(OperatorOption::new("=", "is"))]);
        assert!(matches!(
            catalog.validate(),
            Err(CriteriaError::DuplicateOperator { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_option() {
        let catalog = Catalog::new(vec![AttributeOption::new("country", "Country").with_operator(
            OperatorOption::new("=", "equals").with_input(InputSpec::Select {
                options: vec![ChoiceOption::new("us", "USA"), ChoiceOption::new("us", "U.S.")],
            }),
        )]);
        match catalog.validate() {
            Err(CriteriaError::DuplicateOption { option, .. }) => assert_eq!(option, "us"),
            other => panic!("Expected DuplicateOption, got {:?}", other),
        }
    }

    #[test]
    fn test_catalog_json_shape() {
        let json = r#"[
            {"value": "age", "label": "Age", "operators": [
                {"value": ">", "label": "greater than", "input": {"type": "number"}}
            ]},
            {"value": "country", "label": "Country", "operators": [
                {"value": "in", "label": "is in", "input": {"type": "multiselect", "options": [
                    {"value": "us", "label": "United States"}
                ]}},
                {"value": "=", "label": "equals"}
            ]}
        ]"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.attributes().len(), 2);
        assert_eq!(
            resolve_input_kind(&catalog, Some("country"), Some("in")),
            Some(InputKind::MultiSelect)
        );
        assert_eq!(
            resolve_input_kind(&catalog, Some("country"), Some("=")),
            Some(InputKind::Text)
        );
    }

    #[test]
    fn test_from_json_runs_validation() {
        let json = r#"[{"value": "age", "label": "Age", "operators": []}]"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CriteriaError::NoOperators(_))
        ));
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, serde_json::to_string(&catalog()).unwrap()).unwrap();
        let loaded = Catalog::load(&path).unwrap();
        assert_eq!(loaded, catalog());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Catalog::load(&dir.path().join("nope.json")),
            Err(CriteriaError::Io(_))
        ));
    }
}
