//! Terminal output.
//!
//! Every function here returns a `String`; the command handlers decide where
//! it goes. Styling uses `console`, which drops the escape codes on its own
//! when stdout is not a terminal.

use console::Style;
use criteria::surface::ClauseRow;
use criteria::{Catalog, InputKind, InputSpec};

struct Styles {
    muted: Style,
    index: Style,
    heading: Style,
    success: Style,
    error: Style,
}

fn styles() -> Styles {
    Styles {
        muted: Style::new().dim(),
        index: Style::new().yellow(),
        heading: Style::new().bold(),
        success: Style::new().green(),
        error: Style::new().red().bold(),
    }
}

pub fn kind_name(kind: InputKind) -> &'static str {
    match kind {
        InputKind::Text => "text",
        InputKind::Number => "number",
        InputKind::Select => "select",
        InputKind::MultiSelect => "multiselect",
    }
}

pub fn muted(message: &str) -> String {
    styles().muted.apply_to(message).to_string()
}

pub fn success(message: &str) -> String {
    styles().success.apply_to(message).to_string()
}

pub fn failure(message: &str) -> String {
    styles().error.apply_to(message).to_string()
}

/// One line per clause: position, fields, input kind and row state.
pub fn render_rows(rows: &[ClauseRow<'_>]) -> String {
    let s = styles();
    let dash = || s.muted.apply_to("-").to_string();
    let mut out = String::new();

    for row in rows {
        let clause = row.clause;
        let attribute = clause.attribute().map(str::to_string).unwrap_or_else(dash);
        let operator = clause.operator().map(str::to_string).unwrap_or_else(dash);
        let value = if clause.value.is_empty() {
            dash()
        } else {
            clause.value.join(", ")
        };
        let kind = row.input_kind().map(kind_name).unwrap_or("-");

        let mut flags = Vec::new();
        flags.push(if row.complete {
            s.success.apply_to("complete").to_string()
        } else {
            s.muted.apply_to("incomplete").to_string()
        });
        if row.can_append {
            flags.push("can append".to_string());
        }

        out.push_str(&format!(
            "{} {}  {}  {}  {}\n",
            s.index.apply_to(format!("{:>3}.", row.index + 1)),
            attribute,
            operator,
            value,
            s.muted.apply_to(format!("[{}] {}", kind, flags.join(", "))),
        ));
    }
    out
}

/// Attributes with their operators and, for selects, the option values.
pub fn render_catalog(catalog: &Catalog) -> String {
    let s = styles();
    let mut out = String::new();

    for attribute in catalog.attributes() {
        out.push_str(&format!(
            "{} {}\n",
            s.heading.apply_to(&attribute.label),
            s.muted.apply_to(format!("({})", attribute.value)),
        ));
        for operator in &attribute.operators {
            let input = operator.input_spec();
            let mut line = format!(
                "  {:<8} {:<18} {}",
                operator.value,
                operator.label,
                s.muted.apply_to(kind_name(input.kind())),
            );
            if let InputSpec::Select { options } | InputSpec::MultiSelect { options } = input {
                let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
                line.push_str(&format!(": {}", values.join(", ")));
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
    }
    out
}
