//! Field-set registry
//!
//! Read-only lookup from category key to its field-set. Unknown keys are
//! not an error: they mean no category has been chosen yet.

use super::value_objects::{FieldKind, FieldSetDefinition, PaymentMethodCategory};

pub fn lookup(category_key: &str) -> Option<&'static FieldSetDefinition> {
    PaymentMethodCategory::from_key(category_key).map(|c| c.field_set())
}

/// Every registered field-set in display order
pub fn field_sets() -> impl Iterator<Item = &'static FieldSetDefinition> {
    PaymentMethodCategory::all().map(|c| c.field_set())
}

/// Label for a field name. Known names use the registered label; anything
/// else is title-cased from its snake_case name.
pub fn field_label(name: &str) -> String {
    if let Some(def) = field_sets().flat_map(|set| set.fields.iter()).find(|f| f.name == name) {
        return def.label.to_string();
    }

    name.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Input kind guessed from a field name, for details that arrive without a
/// definition
pub fn infer_kind(name: &str) -> FieldKind {
    if name.contains("phone") {
        FieldKind::Tel
    } else if name.contains("email") {
        FieldKind::Email
    } else {
        FieldKind::Text
    }
}
