//! Gateway configuration

use creditmeter_common::{
    CreditError, Result, DEFAULT_CORS_ORIGINS, DEFAULT_MESSAGES_API_URL,
    DEFAULT_REPORT_API_URL_TEMPLATE,
};
use serde::{Deserialize, Serialize};

/// Gateway service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Service host
    pub host: String,
    /// Service port
    pub port: u16,
    /// Origins allowed to call the API cross-origin; `*` allows any
    pub cors_origins: Vec<String>,
    /// Upstream message service
    pub messages_url: String,
    /// Upstream report service, `{id}` is replaced by the report id
    pub report_url_template: String,
    /// Upstream HTTP timeout in seconds
    pub http_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: parse_origins(DEFAULT_CORS_ORIGINS),
            messages_url: DEFAULT_MESSAGES_API_URL.to_string(),
            report_url_template: DEFAULT_REPORT_API_URL_TEMPLATE.to_string(),
            http_timeout_secs: 30,
        }
    }
}

impl GatewayConfig {
    /// Load configuration from `.env` and the environment
    pub fn load() -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        // Platform PORT first, CREDITMETER_PORT overrides it
        for key in ["PORT", "CREDITMETER_PORT"] {
            if let Some(p) = lookup(key).and_then(|v| v.parse::<u16>().ok()) {
                cfg.port = p;
            }
        }
        if let Some(host) = lookup("CREDITMETER_HOST") {
            cfg.host = host;
        }

        if let Some(origins) = lookup("CORS_ORIGINS") {
            cfg.cors_origins = parse_origins(&origins);
        }

        if let Some(url) = lookup("MESSAGES_API_URL") {
            cfg.messages_url = url;
        }
        if let Some(template) = lookup("REPORT_API_URL_TEMPLATE") {
            cfg.report_url_template = template;
        }
        if let Some(secs) = lookup("CREDITMETER_HTTP_TIMEOUT_SECS").and_then(|v| v.parse::<u64>().ok()) {
            cfg.http_timeout_secs = secs;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.report_url_template.contains("{id}") {
            return Err(CreditError::Config(format!(
                "REPORT_API_URL_TEMPLATE must contain {{id}}: {}",
                self.report_url_template
            )));
        }
        Ok(())
    }

    /// Socket address string to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<GatewayConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        GatewayConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg.port, 8000);
        assert_eq!(cfg.cors_origins, vec!["http://localhost:5173"]);
        assert_eq!(cfg.messages_url, DEFAULT_MESSAGES_API_URL);
        assert_eq!(cfg.bind_addr(), "0.0.0.0:8000");
    }

    #[test]
    fn test_overrides() {
        let cfg = load(&[
            ("PORT", "9000"),
            ("CREDITMETER_PORT", "9100"),
            ("CORS_ORIGINS", "https://a.example, https://b.example,,"),
            ("MESSAGES_API_URL", "http://localhost:1/messages"),
            ("REPORT_API_URL_TEMPLATE", "http://localhost:1/reports/{id}"),
            ("CREDITMETER_HTTP_TIMEOUT_SECS", "5"),
        ])
        .unwrap();

        assert_eq!(cfg.port, 9100);
        assert_eq!(cfg.cors_origins, vec!["https://a.example", "https://b.example"]);
        assert_eq!(cfg.messages_url, "http://localhost:1/messages");
        assert_eq!(cfg.http_timeout_secs, 5);
    }

    #[test]
    fn test_unparseable_numbers_keep_defaults() {
        let cfg = load(&[("PORT", "eighty"), ("CREDITMETER_HTTP_TIMEOUT_SECS", "-1")]).unwrap();
        assert_eq!(cfg.port, 8000);
        assert_eq!(cfg.http_timeout_secs, 30);
    }

    #[test]
    fn test_template_without_placeholder_is_rejected() {
        let err = load(&[("REPORT_API_URL_TEMPLATE", "http://localhost/reports")]).unwrap_err();
        assert!(matches!(err, CreditError::Config(_)));
    }
}
