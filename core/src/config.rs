//! Static configuration for the reporting wizard.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

pub const DEFAULT_CASE_ID_PREFIX: &str = "CSP";
pub const DEFAULT_MAX_EVIDENCE_FILE_BYTES: u64 = 100 * 1024 * 1024;
pub const DEFAULT_SUBMIT_LATENCY_MS: u64 = 2000;
pub const DEFAULT_HELPLINE: &str = "1991";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WizardConfig {
    /// Prefix of generated case identifiers, e.g. `CSP` in `CSP-2026-7K2M9QXA`.
    pub case_id_prefix: String,

    /// Evidence files strictly larger than this are rejected at intake.
    pub max_evidence_file_bytes: u64,

    /// Simulated submission delay.
    pub submit_latency_ms: u64,

    /// Support number shown alongside confirmations.
    pub helpline: String,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            case_id_prefix: DEFAULT_CASE_ID_PREFIX.to_string(),
            max_evidence_file_bytes: DEFAULT_MAX_EVIDENCE_FILE_BYTES,
            submit_latency_ms: DEFAULT_SUBMIT_LATENCY_MS,
            helpline: DEFAULT_HELPLINE.to_string(),
        }
    }
}

impl WizardConfig {
    /// Load configuration from environment variables, falling back per field to defaults.
    pub fn from_env() -> CoreResult<Self> {
        let defaults = Self::default();
        let cfg = Self {
            case_id_prefix: env::var("CYBERSAFE_CASE_PREFIX")
                .unwrap_or(defaults.case_id_prefix),

            max_evidence_file_bytes: env::var("CYBERSAFE_MAX_FILE_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_evidence_file_bytes),

            submit_latency_ms: env::var("CYBERSAFE_SUBMIT_LATENCY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.submit_latency_ms),

            helpline: env::var("CYBERSAFE_HELPLINE").unwrap_or(defaults.helpline),
        };
        cfg.validated()
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> CoreResult<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        let cfg: Self = serde_json::from_slice(&bytes)?;
        cfg.validated()
    }

    pub fn validated(self) -> CoreResult<Self> {
        if self.case_id_prefix.is_empty()
            || !self
                .case_id_prefix
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        {
            return Err(CoreError::InvalidInput(format!(
                "case_id_prefix must be uppercase ASCII alphanumerics, got {:?}",
                self.case_id_prefix
            )));
        }
        if self.max_evidence_file_bytes == 0 {
            return Err(CoreError::InvalidInput(
                "max_evidence_file_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::WizardConfig;

    #[test]
    fn default_threshold_is_one_hundred_mebibytes() {
        assert_eq!(
            WizardConfig::default().max_evidence_file_bytes,
            104_857_600
        );
    }

    #[test]
    fn rejects_lowercase_prefix() {
        let cfg = WizardConfig {
            case_id_prefix: "csp".to_string(),
            ..WizardConfig::default()
        };
        assert!(cfg.validated().is_err());
    }
}
