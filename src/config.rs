//! Runtime configuration.
//!
//! Values come from a key lookup so the same code serves native builds (process
//! environment) and wasm builds, where the only environment available is the
//! one captured at compile time.

use std::time::Duration;

use crate::error::ReviewError;
use crate::models::address::Address;

pub const WALLETCONNECT_PROJECT_ID: &str = "WALLETCONNECT_PROJECT_ID";
pub const RECEIPT_CONTRACT_ADDRESS: &str = "RECEIPT_CONTRACT_ADDRESS";
pub const REVIEW_REGISTRY_ADDRESS: &str = "REVIEW_REGISTRY_ADDRESS";
pub const CONTENT_UPLOAD_LATENCY_MS: &str = "CONTENT_UPLOAD_LATENCY_MS";
pub const CONTENT_FETCH_LATENCY_MS: &str = "CONTENT_FETCH_LATENCY_MS";

/// Value shipped in `.env.example`; treated as "not configured".
pub const PLACEHOLDER_PROJECT_ID: &str = "your_project_id_here";

pub const DEFAULT_RECEIPT_CONTRACT: Address = Address::from_bytes([
    0x12, 0x34, 0x56, 0x78, 0x90, 0x12, 0x34, 0x56, 0x78, 0x90, 0x12, 0x34, 0x56, 0x78, 0x90,
    0x12, 0x34, 0x56, 0x78, 0x90,
]);
pub const DEFAULT_REVIEW_REGISTRY: Address = Address::from_bytes([
    0x09, 0x87, 0x65, 0x43, 0x21, 0x09, 0x87, 0x65, 0x43, 0x21, 0x09, 0x87, 0x65, 0x43, 0x21,
    0x09, 0x87, 0x65, 0x43, 0x21,
]);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub walletconnect_project_id: Option<String>,
    pub receipt_contract: Address,
    pub review_registry: Address,
    pub upload_latency: Duration,
    pub fetch_latency: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            walletconnect_project_id: None,
            receipt_contract: DEFAULT_RECEIPT_CONTRACT,
            review_registry: DEFAULT_REVIEW_REGISTRY,
            upload_latency: Duration::from_millis(1500),
            fetch_latency: Duration::from_millis(500),
        }
    }
}

impl AppConfig {
    /// Reads the process environment, falling back to values baked in at build time.
    pub fn from_env() -> Result<Self, ReviewError> {
        Self::from_lookup(|key| std::env::var(key).ok().or_else(|| build_time_value(key)))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ReviewError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        config.walletconnect_project_id = lookup(WALLETCONNECT_PROJECT_ID)
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty() && id != PLACEHOLDER_PROJECT_ID);

        if let Some(raw) = lookup(RECEIPT_CONTRACT_ADDRESS) {
            config.receipt_contract = raw.trim().parse()?;
        }
        if let Some(raw) = lookup(REVIEW_REGISTRY_ADDRESS) {
            config.review_registry = raw.trim().parse()?;
        }
        if let Some(raw) = lookup(CONTENT_UPLOAD_LATENCY_MS) {
            config.upload_latency = parse_millis(CONTENT_UPLOAD_LATENCY_MS, &raw)?;
        }
        if let Some(raw) = lookup(CONTENT_FETCH_LATENCY_MS) {
            config.fetch_latency = parse_millis(CONTENT_FETCH_LATENCY_MS, &raw)?;
        }

        Ok(config)
    }

    /// No artificial delays; used by tests and server-side rendering.
    pub fn without_latency(mut self) -> Self {
        self.upload_latency = Duration::ZERO;
        self.fetch_latency = Duration::ZERO;
        self
    }
}

fn parse_millis(key: &str, raw: &str) -> Result<Duration, ReviewError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| ReviewError::Config(format!("{key}={raw:?}: {e}")))
}

fn build_time_value(key: &str) -> Option<String> {
    let value = match key {
        WALLETCONNECT_PROJECT_ID => option_env!("WALLETCONNECT_PROJECT_ID"),
        RECEIPT_CONTRACT_ADDRESS => option_env!("RECEIPT_CONTRACT_ADDRESS"),
        REVIEW_REGISTRY_ADDRESS => option_env!("REVIEW_REGISTRY_ADDRESS"),
        CONTENT_UPLOAD_LATENCY_MS => option_env!("CONTENT_UPLOAD_LATENCY_MS"),
        CONTENT_FETCH_LATENCY_MS => option_env!("CONTENT_FETCH_LATENCY_MS"),
        _ => None,
    };
    value.map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(
            config.review_registry.to_string(),
            "0x0987654321098765432109876543210987654321"
        );
        assert_eq!(
            config.receipt_contract.to_string(),
            "0x1234567890123456789012345678901234567890"
        );
    }

    #[test]
    fn test_placeholder_project_id_is_ignored() {
        let config =
            AppConfig::from_lookup(lookup_from(&[(WALLETCONNECT_PROJECT_ID, PLACEHOLDER_PROJECT_ID)]))
                .unwrap();
        assert_eq!(config.walletconnect_project_id, None);

        let config =
            AppConfig::from_lookup(lookup_from(&[(WALLETCONNECT_PROJECT_ID, "abc123")])).unwrap();
        assert_eq!(config.walletconnect_project_id.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_overrides_and_errors() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (CONTENT_UPLOAD_LATENCY_MS, "0"),
            (CONTENT_FETCH_LATENCY_MS, "25"),
            (REVIEW_REGISTRY_ADDRESS, "0x1111111111111111111111111111111111111111"),
        ]))
        .unwrap();
        assert_eq!(config.upload_latency, Duration::ZERO);
        assert_eq!(config.fetch_latency, Duration::from_millis(25));
        assert_eq!(
            config.review_registry.to_string(),
            "0x1111111111111111111111111111111111111111"
        );

        let err = AppConfig::from_lookup(lookup_from(&[(CONTENT_FETCH_LATENCY_MS, "soon")]));
        assert!(matches!(err, Err(ReviewError::Config(_))));

        let err = AppConfig::from_lookup(lookup_from(&[(RECEIPT_CONTRACT_ADDRESS, "0xnope")]));
        assert!(matches!(err, Err(ReviewError::Config(_))));
    }
}
