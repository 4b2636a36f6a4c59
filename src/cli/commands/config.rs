//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use anyhow::Result;

/// Run the config command.
pub fn run_config(action: &ConfigAction, settings: Settings) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let toml_str = toml::to_string_pretty(&settings)
                .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
            println!("{}", toml_str);
        }

        ConfigAction::Set { key, value } => {
            let config_path = Settings::default_config_path();

            let mut root = toml::Value::try_from(&settings)
                .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
            set_key(&mut root, key, value)?;

            // Round-trip through Settings so invalid keys or types fail here
            // instead of on the next load.
            let updated: Settings = root
                .try_into()
                .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;
            updated.save_to(&config_path)?;

            Output::success(&format!("Set {} = {}", key, value));
            Output::kv("Config", &config_path.display().to_string());
        }

        ConfigAction::Path => {
            let config_path = Settings::default_config_path();
            println!("{}", config_path.display());
        }
    }

    Ok(())
}

/// Set a dotted-path key (e.g. "chunking.chunk_seconds") in a TOML tree.
fn set_key(root: &mut toml::Value, key: &str, value: &str) -> Result<()> {
    let mut current = root;
    let mut parts = key.split('.').peekable();

    while let Some(part) = parts.next() {
        let table = current
            .as_table_mut()
            .ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {}", key))?;

        if parts.peek().is_none() {
            table.insert(part.to_string(), parse_value(value));
            return Ok(());
        }

        current = table
            .get_mut(part)
            .ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {}", key))?;
    }

    Err(anyhow::anyhow!("Empty configuration key"))
}

/// Interpret the raw CLI string as the most specific TOML type.
fn parse_value(value: &str) -> toml::Value {
    if let Ok(b) = value.parse::<bool>() {
        return toml::Value::Boolean(b);
    }
    if let Ok(i) = value.parse::<i64>() {
        return toml::Value::Integer(i);
    }
    if let Ok(f) = value.parse::<f64>() {
        return toml::Value::Float(f);
    }
    toml::Value::String(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_key_updates_nested_value() {
        let settings = Settings::default();
        let mut root = toml::Value::try_from(&settings).unwrap();

        set_key(&mut root, "chunking.chunk_seconds", "90.5").unwrap();

        let updated: Settings = root.try_into().unwrap();
        assert_eq!(updated.chunking.chunk_seconds, 90.5);
    }

    #[test]
    fn test_set_key_rejects_unknown_section() {
        let settings = Settings::default();
        let mut root = toml::Value::try_from(&settings).unwrap();

        assert!(set_key(&mut root, "nope.key", "1").is_err());
    }

    #[test]
    fn test_parse_value_types() {
        assert_eq!(parse_value("true"), toml::Value::Boolean(true));
        assert_eq!(parse_value("42"), toml::Value::Integer(42));
        assert_eq!(parse_value("3.5"), toml::Value::Float(3.5));
        assert_eq!(
            parse_value("hello"),
            toml::Value::String("hello".to_string())
        );
    }
}
