//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`WEKALA_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use serde::{Deserialize, Serialize};
use tracing::warn;
use wekala_core::{Bya3aMode, Locale, Money, SellingMode};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeskConfig {
    /// Agency name (page headers, statements)
    pub agency_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Language of user-facing messages
    pub locale: Locale,

    /// Selling mode of a freshly added sale line
    pub default_selling_mode: SellingMode,

    /// Bya3a mode of a freshly added sale line
    pub default_bya3a_mode: Bya3aMode,
}

impl Default for DeskConfig {
    /// ## Default Values
    /// - Currency: Egyptian pound (ج.م)
    /// - Messages: Arabic
    /// - New rows: piece / fixed bya3a
    fn default() -> Self {
        DeskConfig {
            agency_name: "Wekala".to_string(),
            currency_symbol: "ج.م".to_string(),
            locale: Locale::Ar,
            default_selling_mode: SellingMode::Piece,
            default_bya3a_mode: Bya3aMode::Fixed,
        }
    }
}

impl DeskConfig {
    /// Creates a DeskConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `WEKALA_AGENCY_NAME`: Override agency name
    /// - `WEKALA_CURRENCY_SYMBOL`: Override currency symbol
    /// - `WEKALA_LOCALE`: `ar` or `en`
    /// - `WEKALA_DEFAULT_SELLING_MODE`: `weight`, `piece` or `package`
    /// - `WEKALA_DEFAULT_BYA3A_MODE`: `per_unit` or `fixed`
    ///
    /// Values that don't parse keep the default and log a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = DeskConfig::default();

        if let Some(name) = lookup("WEKALA_AGENCY_NAME").filter(|v| !v.trim().is_empty()) {
            config.agency_name = name.trim().to_string();
        }

        if let Some(symbol) = lookup("WEKALA_CURRENCY_SYMBOL").filter(|v| !v.trim().is_empty()) {
            config.currency_symbol = symbol.trim().to_string();
        }

        if let Some(raw) = lookup("WEKALA_LOCALE") {
            match raw.parse::<Locale>() {
                Ok(locale) => config.locale = locale,
                Err(e) => warn!(value = %raw, error = %e, "ignoring WEKALA_LOCALE"),
            }
        }

        if let Some(raw) = lookup("WEKALA_DEFAULT_SELLING_MODE") {
            match raw.parse::<SellingMode>() {
                Ok(mode) => config.default_selling_mode = mode,
                Err(e) => warn!(value = %raw, error = %e, "ignoring WEKALA_DEFAULT_SELLING_MODE"),
            }
        }

        if let Some(raw) = lookup("WEKALA_DEFAULT_BYA3A_MODE") {
            match raw.parse::<Bya3aMode>() {
                Ok(mode) => config.default_bya3a_mode = mode,
                Err(e) => warn!(value = %raw, error = %e, "ignoring WEKALA_DEFAULT_BYA3A_MODE"),
            }
        }

        config
    }

    /// Formats an amount with the configured currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use wekala_core::Money;
    /// use wekala_desk::state::DeskConfig;
    ///
    /// let config = DeskConfig::default();
    /// assert_eq!(config.format_money(Money::from_cents(2700)), "27.00 ج.م");
    /// ```
    pub fn format_money(&self, amount: Money) -> String {
        format!("{} {}", amount, self.currency_symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> DeskConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DeskConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config, DeskConfig::default());
        assert_eq!(config.locale, Locale::Ar);
        assert_eq!(config.default_selling_mode, SellingMode::Piece);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("WEKALA_AGENCY_NAME", "وكالة الأمل"),
            ("WEKALA_CURRENCY_SYMBOL", "EGP"),
            ("WEKALA_LOCALE", "en"),
            ("WEKALA_DEFAULT_SELLING_MODE", "weight"),
            ("WEKALA_DEFAULT_BYA3A_MODE", "per_unit"),
        ]);

        assert_eq!(config.agency_name, "وكالة الأمل");
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.default_selling_mode, SellingMode::Weight);
        assert_eq!(config.default_bya3a_mode, Bya3aMode::PerUnit);
        assert_eq!(config.format_money(Money::from_cents(-550)), "-5.50 EGP");
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            ("WEKALA_LOCALE", "fr"),
            ("WEKALA_DEFAULT_SELLING_MODE", "kilo"),
            ("WEKALA_CURRENCY_SYMBOL", "  "),
        ]);
        assert_eq!(config, DeskConfig::default());
    }
}
