//! Schema compiler
//!
//! Builds the rule list for a category: two base fields (category selector
//! and notes) followed by the category's own fields. Compilation is pure; a
//! schema never inherits rules from a previously selected category.
//!
//! Edit forms may also carry rules for saved details that have no
//! registered definition; those are required text-like inputs labelled
//! from their name.

use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;

use super::registry;
use super::validation::{ErrorKind, ValidationResult};
use super::value_objects::{FieldKind, PaymentMethodCategory, SavedPaymentMethod};

/// Category selector field
pub const METHOD_FIELD: &str = "method";
/// Free-text notes field
pub const NOTES_FIELD: &str = "instructions";
/// Notes character cap
pub const NOTES_MAX_CHARS: usize = 300;

pub const SELECT_METHOD_MESSAGE: &str = "Please select a payment method";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Rule {
    /// Non-empty string
    Required { message: String },
    /// Any string, empty allowed, optionally capped in characters
    Optional { max_chars: Option<usize> },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldRule {
    pub name: Cow<'static, str>,
    pub label: Cow<'static, str>,
    pub kind: FieldKind,
    #[serde(flatten)]
    pub rule: Rule,
}

impl FieldRule {
    /// Rule for a saved detail the registry does not define
    fn inferred(name: &str) -> Self {
        let label = registry::field_label(name);
        Self {
            name: Cow::Owned(name.to_string()),
            kind: registry::infer_kind(name),
            rule: Rule::Required { message: format!("{label} is required") },
            label: Cow::Owned(label),
        }
    }

    fn check(&self, value: &str, result: &mut ValidationResult) {
        match &self.rule {
            Rule::Required { message } => {
                if value.is_empty() {
                    result.reject(&*self.name, ErrorKind::Field, message.clone());
                }
            }
            Rule::Optional { max_chars: Some(max) } => {
                if value.chars().count() > *max {
                    result.reject(
                        &*self.name,
                        ErrorKind::Field,
                        format!("{} must be at most {} characters", self.label, max),
                    );
                }
            }
            Rule::Optional { max_chars: None } => {}
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self.rule, Rule::Required { .. })
    }

    /// Placeholder shown in the empty input
    pub fn placeholder(&self) -> String {
        format!("Enter {}", self.label.to_lowercase())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Schema {
    category: Option<PaymentMethodCategory>,
    /// Selector value; set with the category, or alone for a saved method
    /// of an unregistered category
    method: Option<String>,
    rules: Vec<FieldRule>,
}

impl Schema {
    /// Schema with only the selector and notes rules
    pub fn base() -> Self {
        Self {
            category: None,
            method: None,
            rules: vec![
                FieldRule {
                    name: Cow::Borrowed(METHOD_FIELD),
                    label: Cow::Borrowed("Payment method"),
                    kind: FieldKind::Text,
                    rule: Rule::Required { message: SELECT_METHOD_MESSAGE.to_string() },
                },
                FieldRule {
                    name: Cow::Borrowed(NOTES_FIELD),
                    label: Cow::Borrowed("Instructions"),
                    kind: FieldKind::Text,
                    rule: Rule::Optional { max_chars: Some(NOTES_MAX_CHARS) },
                },
            ],
        }
    }

    pub fn for_category(category: PaymentMethodCategory) -> Self {
        let mut schema = Self::base();
        schema.category = Some(category);
        schema.method = Some(category.key().to_string());
        schema.rules.extend(category.field_set().fields.iter().map(|def| FieldRule {
            name: Cow::Borrowed(def.name),
            label: Cow::Borrowed(def.label),
            kind: def.kind,
            rule: if def.required {
                Rule::Required { message: format!("{} is required", def.label) }
            } else {
                Rule::Optional { max_chars: None }
            },
        }));
        schema
    }

    /// Schema for editing a saved method: its category's rules, plus a
    /// required rule for every saved detail the category does not define.
    /// A method of an unregistered category gets rules for its details
    /// only.
    pub fn for_saved(saved: &SavedPaymentMethod) -> Self {
        let mut schema = match saved.category() {
            Some(category) => Self::for_category(category),
            None => Self { method: Some(saved.method.clone()), ..Self::base() },
        };
        let inferred: Vec<FieldRule> = saved
            .detail_names()
            .filter(|name| !schema.contains(name))
            .map(FieldRule::inferred)
            .collect();
        schema.rules.extend(inferred);
        schema
    }

    pub fn category(&self) -> Option<PaymentMethodCategory> {
        self.category
    }

    /// Selector value this schema was compiled for
    pub fn method_key(&self) -> Option<&str> {
        self.method.as_deref()
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    pub fn rule(&self, name: &str) -> Option<&FieldRule> {
        self.rules.iter().find(|r| r.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rule(name).is_some()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| &*r.name)
    }

    /// Names of the category-specific fields, excluding the base fields
    pub fn dynamic_field_names(&self) -> impl Iterator<Item = &str> {
        self.field_names().filter(|n| *n != METHOD_FIELD && *n != NOTES_FIELD)
    }

    /// Run every rule. Missing keys validate as empty strings.
    pub fn validate(&self, values: &BTreeMap<String, String>) -> ValidationResult {
        let mut result = ValidationResult::valid();
        for rule in &self.rules {
            let value = values.get(&*rule.name).map(String::as_str).unwrap_or("");
            rule.check(value, &mut result);
        }
        result
    }
}

/// Compile the schema for a category key. Unknown keys yield the base
/// schema.
pub fn compile(category_key: &str) -> Schema {
    PaymentMethodCategory::from_key(category_key).map_or_else(Schema::base, Schema::for_category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn values(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_field_names_are_base_plus_field_set() {
        for category in PaymentMethodCategory::all() {
            let schema = compile(category.key());
            let names: BTreeSet<_> = schema.field_names().collect();
            let mut expected: BTreeSet<_> = category.field_set().field_names().collect();
            expected.insert(METHOD_FIELD);
            expected.insert(NOTES_FIELD);
            assert_eq!(names, expected, "schema for {}", category);
        }
    }

    #[test]
    fn test_no_leakage_between_compilations() {
        let _bank = compile("bank_transfer");
        let alipay = compile("alipay");
        assert!(!alipay.contains("bank_name"));
        assert_eq!(alipay, compile("alipay"));
    }

    #[test]
    fn test_unknown_category_compiles_base_only() {
        let schema = compile("unknown");
        let names: Vec<_> = schema.field_names().collect();
        assert_eq!(names, vec![METHOD_FIELD, NOTES_FIELD]);
        assert_eq!(schema.category(), None);
    }

    #[test]
    fn test_required_and_optional_rules() {
        let schema = compile("bank_transfer");
        let result = schema.validate(&values(&[("method", "bank_transfer")]));
        assert_eq!(result.message("account"), Some("Account Number is required"));
        assert_eq!(result.message("bank_name"), Some("Bank Name is required"));
        assert!(!result.has_error("bank_code"));
        assert!(!result.has_error("branch"));
        assert!(!result.has_error(NOTES_FIELD));
    }

    #[test]
    fn test_selector_is_required() {
        let result = Schema::base().validate(&BTreeMap::new());
        assert_eq!(result.message(METHOD_FIELD), Some(SELECT_METHOD_MESSAGE));
    }

    #[test]
    fn test_notes_cap_counts_chars() {
        let schema = compile("alipay");
        let at_cap = "é".repeat(NOTES_MAX_CHARS);
        let ok = schema.validate(&values(&[
            ("method", "alipay"),
            ("alipay_id", "me@example.com"),
            (NOTES_FIELD, at_cap.as_str()),
        ]));
        assert!(ok.is_valid());

        let over = "a".repeat(NOTES_MAX_CHARS + 1);
        let too_long = schema.validate(&values(&[
            ("method", "alipay"),
            ("alipay_id", "me@example.com"),
            (NOTES_FIELD, over.as_str()),
        ]));
        assert_eq!(
            too_long.message(NOTES_FIELD),
            Some("Instructions must be at most 300 characters")
        );
    }

    fn saved(method: &str, details: &[(&str, &str)]) -> SavedPaymentMethod {
        SavedPaymentMethod {
            id: 3,
            display_name: method.to_string(),
            method: method.to_string(),
            method_type: "other".to_string(),
            fields: details.iter().map(|(k, v)| (k.to_string(), (*v).into())).collect(),
        }
    }

    #[test]
    fn test_saved_unregistered_category_infers_rules() {
        let schema = Schema::for_saved(&saved(
            "cash",
            &[("phone_number", "0812"), ("contact_email", "a@b.c"), ("instructions", "noon")],
        ));
        assert_eq!(schema.category(), None);
        assert_eq!(schema.method_key(), Some("cash"));
        assert_eq!(
            schema.dynamic_field_names().collect::<Vec<_>>(),
            vec!["contact_email", "phone_number"]
        );

        let phone = schema.rule("phone_number").unwrap();
        assert_eq!(phone.label, "Phone Number");
        assert_eq!(phone.kind, FieldKind::Tel);
        assert!(phone.is_required());
        assert_eq!(schema.rule("contact_email").unwrap().kind, FieldKind::Email);

        let result = schema.validate(&values(&[("method", "cash"), ("contact_email", "a@b.c")]));
        assert_eq!(result.message("phone_number"), Some("Phone Number is required"));
    }

    #[test]
    fn test_saved_extra_details_extend_category_rules() {
        let schema = Schema::for_saved(&saved(
            "alipay",
            &[("alipay_id", "me@example.com"), ("legacy_code", "XYZ")],
        ));
        assert_eq!(schema.category(), Some(PaymentMethodCategory::Alipay));
        assert_eq!(
            schema.dynamic_field_names().collect::<Vec<_>>(),
            vec!["alipay_id", "legacy_code"]
        );
        assert_eq!(schema.rule("alipay_id").unwrap().label, "Alipay ID");
        assert_eq!(schema.rule("legacy_code").unwrap().label, "Legacy Code");
    }

    #[test]
    fn test_placeholder_lowercases_label() {
        let schema = compile("bank_transfer");
        assert_eq!(schema.rule("bank_name").unwrap().placeholder(), "Enter bank name");
    }

    #[test]
    fn test_dynamic_field_names() {
        let schema = compile("alipay");
        assert_eq!(schema.dynamic_field_names().collect::<Vec<_>>(), vec!["alipay_id"]);
    }
}
