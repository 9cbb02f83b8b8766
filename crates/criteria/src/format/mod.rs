//! # Sentence Builder
//!
//! Turns a clause list into readable text for previews, summaries and audit
//! logs, and an error payload into a per-clause report ([`errors`]).
//!
//! ## Clause phrases
//!
//! Each clause with both attribute and operator set becomes one phrase:
//!
//! | Operator | Phrase |
//! |----------|--------|
//! | `in` | `X is in V` |
//! | `not_in` | `X is not in V` |
//! | `=` | `X equals V` |
//! | `!=` | `X is not V` |
//! | `>` | `X is greater than V` |
//! | `<` | `X is less than V` |
//! | anything else | `X <operator> V` |
//!
//! `X` is the attribute label. `V` is the value text: option labels where the
//! operator enumerates options, raw values otherwise. Multiselect values are
//! listed as `A, B or C`, clamped to `max_list_items` with `or K more`. A
//! clause whose value text comes out empty is left out of the sentence.
//!
//! Phrases are joined with the joiner (`and` by default).
//!
//! ## Sentence mode
//!
//! With `format_as_sentence` the output starts with a capital letter, ends with
//! exactly one `.`, `!` or `?` (a `.` is added when there is none), and every
//! attribute label after the first is lowercased since it follows the joiner.

pub mod errors;

pub use errors::{format_clauses_error, ClauseError, ClauseErrors, FieldError, ValueError};

use crate::catalog::{Catalog, InputSpec};
use crate::clause::LogicClause;
use crate::config::CriteriaConfig;
use serde::{Deserialize, Serialize};

pub const DEFAULT_JOINER: &str = "and";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatOptions {
    pub joiner: String,
    /// `None` (or `Some(0)`) lists every value.
    pub max_list_items: Option<usize>,
    pub format_as_sentence: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            joiner: DEFAULT_JOINER.to_string(),
            max_list_items: None,
            format_as_sentence: false,
        }
    }
}

impl FormatOptions {
    pub fn sentence() -> Self {
        Self {
            format_as_sentence: true,
            ..Self::default()
        }
    }

    pub fn with_joiner(mut self, joiner: impl Into<String>) -> Self {
        self.joiner = joiner.into();
        self
    }

    pub fn with_max_list_items(mut self, max: usize) -> Self {
        self.max_list_items = Some(max);
        self
    }
}

impl From<&CriteriaConfig> for FormatOptions {
    fn from(config: &CriteriaConfig) -> Self {
        Self {
            joiner: config.joiner.clone(),
            max_list_items: config.max_list_items,
            format_as_sentence: config.format_as_sentence,
        }
    }
}

/// Render `clauses` as one string.
///
/// `None` when the list is absent, empty, or yields no phrase at all.
pub fn format_clauses(
    clauses: Option<&[LogicClause]>,
    catalog: &Catalog,
    options: &FormatOptions,
) -> Option<String> {
    let clauses = clauses.filter(|clauses| !clauses.is_empty())?;

    let phrases: Vec<String> = clauses
        .iter()
        .filter_map(|clause| clause_phrase(clause, catalog, options))
        .enumerate()
        .map(|(position, phrase)| {
            if options.format_as_sentence && position > 0 {
                phrase.lowercased_subject()
            } else {
                phrase.render()
            }
        })
        .collect();

    if phrases.is_empty() {
        return None;
    }

    let text = phrases.join(&format!(" {} ", options.joiner));
    Some(if options.format_as_sentence {
        as_sentence(&text)
    } else {
        text
    })
}

/// A clause phrase before the subject's case is settled.
struct Phrase {
    subject: String,
    predicate: String,
}

impl Phrase {
    fn render(&self) -> String {
        format!("{} {}", self.subject, self.predicate)
    }

    fn lowercased_subject(&self) -> String {
        format!("{} {}", self.subject.to_lowercase(), self.predicate)
    }
}

fn clause_phrase(clause: &LogicClause, catalog: &Catalog, options: &FormatOptions) -> Option<Phrase> {
    let (attribute, operator) = (clause.attribute()?, clause.operator()?);

    let subject = catalog
        .attribute(attribute)
        .map(|attr| attr.label.clone())
        .unwrap_or_else(|| attribute.to_string());
    let config = catalog.operator_config(Some(attribute), Some(operator));
    let input = config.map(|op| op.input_spec()).unwrap_or(InputSpec::FREE_TEXT);

    let value = value_text(&clause.value, input, options.max_list_items)?;
    let predicate = match operator {
        "in" => format!("is in {}", value),
        "not_in" => format!("is not in {}", value),
        "=" => format!("equals {}", value),
        "!=" => format!("is not {}", value),
        ">" => format!("is greater than {}", value),
        "<" => format!("is less than {}", value),
        other => format!("{} {}", other, value),
    };
    Some(Phrase { subject, predicate })
}

/// The value part of a phrase; `None` when there is nothing to show.
fn value_text(values: &[String], input: &InputSpec, max_items: Option<usize>) -> Option<String> {
    let label = |value: &String| input.label_for(value).unwrap_or(value.as_str()).to_string();
    let text = match input {
        InputSpec::MultiSelect { .. } => {
            let labels: Vec<String> = values.iter().map(label).collect();
            format_list(labels.as_slice(), max_items)
        }
        InputSpec::Text | InputSpec::Number | InputSpec::Select { .. } => {
            values.first().map(label)?
        }
    };
    (!text.is_empty()).then_some(text)
}

/// `A`, `A or B`, `A, B or C`; clamped to `max_items` with `or K more`.
pub fn format_list<S: AsRef<str>>(items: &[S], max_items: Option<usize>) -> String {
    let (listed, more) = match max_items.filter(|max| *max > 0 && items.len() > *max) {
        Some(max) => (&items[..max], Some(format!("{} more", items.len() - max))),
        None => (items, None),
    };
    let mut shown: Vec<&str> = listed.iter().map(AsRef::as_ref).collect();
    shown.extend(more.as_deref());

    match shown.as_slice() {
        [] => String::new(),
        [only] => (*only).to_string(),
        [init @ .., last] => format!("{} or {}", init.join(", "), last),
    }
}

/// Capitalize the first character and end with exactly one terminal mark.
fn as_sentence(text: &str) -> String {
    let trimmed = text.trim_end();
    let mut chars = trimmed.chars();
    let mut sentence = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => return String::new(),
    };

    let body_len = sentence.trim_end_matches(['.', '!', '?']).len();
    let mark = sentence[body_len..].chars().last();
    match mark {
        Some(mark) => {
            sentence.truncate(body_len);
            sentence.push(mark);
        }
        None => sentence.push('.'),
    }
    sentence
}
