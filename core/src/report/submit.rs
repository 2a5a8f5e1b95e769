use super::evidence::now_rfc3339_utc;
use super::model::ReportDraft;
use crate::case::case_id::generate_case_id_now;
use crate::config::WizardConfig;
use crate::error::CoreResult;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub case_id: String,
    pub submitted_at: String, // RFC3339 UTC
    pub files_attached: usize,
    pub urls_attached: usize,
}

/// Hands a finished draft to whoever handles reports.
///
/// Implementations backed by a real service decide their own retry policy; the wizard
/// only guarantees that no second submission starts while one is pending.
pub trait ReportSubmitter {
    fn submit(&self, draft: &ReportDraft) -> CoreResult<SubmissionReceipt>;
}

/// Waits for a fixed latency and then always succeeds with a freshly generated case id.
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    pub case_id_prefix: String,
    pub latency: Duration,
}

impl SimulatedSubmitter {
    pub fn new(case_id_prefix: &str, latency: Duration) -> Self {
        Self {
            case_id_prefix: case_id_prefix.to_string(),
            latency,
        }
    }

    pub fn from_config(cfg: &WizardConfig) -> Self {
        Self::new(
            &cfg.case_id_prefix,
            Duration::from_millis(cfg.submit_latency_ms),
        )
    }
}

impl ReportSubmitter for SimulatedSubmitter {
    fn submit(&self, draft: &ReportDraft) -> CoreResult<SubmissionReceipt> {
        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }
        Ok(SubmissionReceipt {
            case_id: generate_case_id_now(&self.case_id_prefix),
            submitted_at: now_rfc3339_utc(),
            files_attached: draft.evidence.files.len(),
            urls_attached: draft.evidence.urls.len(),
        })
    }
}
