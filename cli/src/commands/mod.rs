//! CLI Commands

pub mod ads;
pub mod categories;
pub mod config;
pub mod payment_methods;

/// Split a `name=value` argument
pub fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.trim().to_string(), value.to_string()))
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| format!("expected name=value, got `{raw}`"))
}
