//! Category and schema commands

use anyhow::{bail, Result};
use p2p_forms::{compile, registry, PaymentMethodCategory, Schema};
use serde::Serialize;
use tabled::Tabled;

use crate::output::OutputFormat;

#[derive(Serialize, Tabled)]
struct CategoryRow {
    key: &'static str,
    label: &'static str,
    #[serde(rename = "type")]
    #[tabled(rename = "type")]
    method_type: &'static str,
    fields: String,
}

#[derive(Serialize, Tabled)]
struct RuleRow {
    name: String,
    label: String,
    kind: &'static str,
    required: bool,
    placeholder: String,
}

pub fn list(format: OutputFormat) -> Result<()> {
    let rows: Vec<CategoryRow> = PaymentMethodCategory::all()
        .map(|category| CategoryRow {
            key: category.key(),
            label: category.label(),
            method_type: category.method_type(),
            fields: category.field_set().field_names().collect::<Vec<_>>().join(", "),
        })
        .collect();
    format.print_rows(&rows)
}

pub fn schema(category: &str, format: OutputFormat) -> Result<()> {
    if registry::lookup(category).is_none() {
        bail!(
            "unknown category `{}`; expected one of: {}",
            category,
            PaymentMethodCategory::all().map(|c| c.key()).collect::<Vec<_>>().join(", ")
        );
    }

    let schema = compile(category);
    match format {
        OutputFormat::Table => format.print_rows(&rule_rows(&schema)),
        _ => format.print(&schema),
    }
}

fn rule_rows(schema: &Schema) -> Vec<RuleRow> {
    schema
        .rules()
        .iter()
        .map(|rule| RuleRow {
            name: rule.name.to_string(),
            label: rule.label.to_string(),
            kind: rule.kind.as_str(),
            required: rule.is_required(),
            placeholder: rule.placeholder(),
        })
        .collect()
}
