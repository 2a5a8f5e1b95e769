use super::validate::SectionCheck;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    MissingFields,
    OversizeFiles,
}

/// A blocking, alert-style message for the user. At most one is pending at a time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn missing_fields(check: &SectionCheck) -> Self {
        let lines = check
            .missing
            .iter()
            .map(|label| format!("- {}", label))
            .collect::<Vec<_>>()
            .join("\n");
        Self {
            kind: NoticeKind::MissingFields,
            message: format!("Please fill in the following required fields:\n{}", lines),
        }
    }

    pub fn oversize_files(message: String) -> Self {
        Self {
            kind: NoticeKind::OversizeFiles,
            message,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
