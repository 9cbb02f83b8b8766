//! Built-in participation catalog.
//!
//! The default set of attributes a study's enrollment rules are written
//! against. Hosts with their own attribute set load one with
//! [`Catalog::load`](super::Catalog::load) instead.

use super::{AttributeOption, Catalog, ChoiceOption, InputSpec, OperatorOption};
use once_cell::sync::Lazy;
use std::sync::Arc;

static PARTICIPATION: Lazy<Arc<Catalog>> = Lazy::new(|| Arc::new(build()));

/// The shared built-in catalog.
pub fn participation_catalog() -> Arc<Catalog> {
    Arc::clone(&PARTICIPATION)
}

fn countries() -> Vec<ChoiceOption> {
    vec![
        ChoiceOption::new("us", "United States"),
        ChoiceOption::new("ca", "Canada"),
        ChoiceOption::new("gb", "United Kingdom"),
        ChoiceOption::new("de", "Germany"),
        ChoiceOption::new("fr", "France"),
        ChoiceOption::new("jp", "Japan"),
    ]
}

fn languages() -> Vec<ChoiceOption> {
    vec![
        ChoiceOption::new("en", "English"),
        ChoiceOption::new("es", "Spanish"),
        ChoiceOption::new("fr", "French"),
        ChoiceOption::new("de", "German"),
        ChoiceOption::new("zh", "Chinese"),
    ]
}

fn genders() -> Vec<ChoiceOption> {
    vec![
        ChoiceOption::new("female", "Female"),
        ChoiceOption::new("male", "Male"),
        ChoiceOption::new("non_binary", "Non-binary"),
    ]
}

/// `in` / `not_in` over a multiselect plus `=` over a single select.
fn enumerated(value: &str, label: &str, options: Vec<ChoiceOption>) -> AttributeOption {
    AttributeOption::new(value, label)
        .with_operator(OperatorOption::new("in", "is in").with_input(InputSpec::MultiSelect {
            options: options.clone(),
        }))
        .with_operator(
            OperatorOption::new("not_in", "is not in").with_input(InputSpec::MultiSelect {
                options: options.clone(),
            }),
        )
        .with_operator(OperatorOption::new("=", "equals").with_input(InputSpec::Select { options }))
}

fn build() -> Catalog {
    let age = ["=", "!=", ">", "<"]
        .into_iter()
        .zip(["equals", "is not", "is greater than", "is less than"])
        .fold(AttributeOption::new("age", "Age"), |attr, (value, label)| {
            attr.with_operator(OperatorOption::new(value, label).with_input(InputSpec::Number))
        });

    let gender = AttributeOption::new("gender", "Gender")
        .with_operator(OperatorOption::new("=", "equals").with_input(InputSpec::Select {
            options: genders(),
        }))
        .with_operator(OperatorOption::new("!=", "is not").with_input(InputSpec::Select {
            options: genders(),
        }));

    // No input declared: free text.
    let email_domain = AttributeOption::new("email_domain", "Email domain")
        .with_operator(OperatorOption::new("=", "equals"))
        .with_operator(OperatorOption::new("!=", "is not"));

    Catalog::new(vec![
        age,
        enumerated("country", "Country", countries()),
        enumerated("language", "Language", languages()),
        gender,
        email_domain,
    ])
}
