use super::case_id::{is_case_id, sha256_hex};
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum CaseStage {
    Received,
    UnderReview,
    Investigating,
    Resolved,
}

impl CaseStage {
    pub const ALL: [CaseStage; 4] = [
        CaseStage::Received,
        CaseStage::UnderReview,
        CaseStage::Investigating,
        CaseStage::Resolved,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CaseStage::Received => "Report Received",
            CaseStage::UnderReview => "Under Review",
            CaseStage::Investigating => "Investigation in Progress",
            CaseStage::Resolved => "Resolved",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaseStatusView {
    pub case_id: String,
    pub stage: CaseStage,
    /// Stages reached so far, oldest first, ending with `stage`.
    pub history: Vec<CaseStage>,
}

/// Demo lookup: there is no case registry, so the stage is derived from the id itself.
/// The same id always maps to the same status.
pub fn lookup_case_status(prefix: &str, raw_case_id: &str) -> CoreResult<CaseStatusView> {
    let case_id = raw_case_id.trim().to_ascii_uppercase();
    if !is_case_id(prefix, &case_id) {
        return Err(CoreError::InvalidInput(format!(
            "case id must look like {}-YYYY-XXXXXXXX",
            prefix
        )));
    }
    let digest = sha256_hex(case_id.as_bytes());
    let bucket = u8::from_str_radix(&digest[..2], 16)
        .map_err(|e| CoreError::InvalidInput(format!("digest parse failed: {}", e)))?;
    let idx = bucket as usize % CaseStage::ALL.len();
    Ok(CaseStatusView {
        case_id,
        stage: CaseStage::ALL[idx],
        history: CaseStage::ALL[..=idx].to_vec(),
    })
}
