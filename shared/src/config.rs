use serde::Deserialize;

use crate::error::ConfigError;
use crate::validation::UploadPolicy;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default)]
    pub upload: UploadPolicy,
    /// How long a toast stays on screen.
    #[serde(default = "default_notification_ms")]
    pub notification_ms: u32,
    /// Deadline for upload and search requests; `None` waits forever.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: Option<u32>,
}

fn default_api_base() -> String {
    "http://localhost:8080".to_string()
}

fn default_notification_ms() -> u32 {
    2000
}

fn default_request_timeout_ms() -> Option<u32> {
    Some(30_000)
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            upload: UploadPolicy::default(),
            notification_ms: default_notification_ms(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl ClientConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig = serde_yaml::from_str(source)?;
        Ok(config)
    }

    /// Full URL of a backend route, e.g. `endpoint("/knn")`.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = ClientConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.upload.max_size_bytes, 150_000);
        assert_eq!(config.request_timeout_ms, Some(30_000));
    }

    #[test]
    fn partial_document_overrides_only_given_fields() {
        let yaml = r#"
api_base: "https://search.example.org/api/"
upload:
  max_size_bytes: 500000
request_timeout_ms: null
"#;
        let config = ClientConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.upload.max_size_bytes, 500_000);
        assert_eq!(config.upload.accepted_types.len(), 3);
        assert_eq!(config.request_timeout_ms, None);
        assert_eq!(config.notification_ms, 2000);
        assert_eq!(
            config.endpoint("/knn"),
            "https://search.example.org/api/knn"
        );
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(ClientConfig::from_yaml_str("notification_ms: [1, 2]").is_err());
    }
}
