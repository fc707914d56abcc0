use serde::Deserialize;

use crate::model::SourceFile;

pub const DEFAULT_MAX_SIZE_BYTES: u64 = 150_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Accepted,
    Rejected(Vec<String>),
}

impl ValidationResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationResult::Accepted)
    }
}

/// Format and size rules applied to a file before it is uploaded.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadPolicy {
    #[serde(default = "default_accepted_types")]
    pub accepted_types: Vec<String>,
    #[serde(default = "default_max_size_bytes")]
    pub max_size_bytes: u64,
}

fn default_accepted_types() -> Vec<String> {
    ["image/png", "image/jpeg", "image/gif"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_max_size_bytes() -> u64 {
    DEFAULT_MAX_SIZE_BYTES
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            accepted_types: default_accepted_types(),
            max_size_bytes: default_max_size_bytes(),
        }
    }
}

impl UploadPolicy {
    /// Checks format and size independently and reports every violation,
    /// format first.
    pub fn validate<P>(&self, file: &SourceFile<P>) -> ValidationResult {
        let mut reasons = Vec::new();

        if !self.accepted_types.iter().any(|t| *t == file.mime_type) {
            reasons.push(format!("'{}' is not a supported format", file.mime_type));
        }

        if file.size_bytes > self.max_size_bytes {
            reasons.push(format!(
                "'{}' is too large, please pick a smaller file",
                file.name
            ));
        }

        if reasons.is_empty() {
            ValidationResult::Accepted
        } else {
            ValidationResult::Rejected(reasons)
        }
    }

    /// Value for the file input's `accept` attribute.
    pub fn accept_attribute(&self) -> String {
        self.accepted_types.join(",")
    }
}

/// Validates against the default policy.
pub fn validate<P>(file: &SourceFile<P>) -> ValidationResult {
    UploadPolicy::default().validate(file)
}
