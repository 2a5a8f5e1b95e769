use super::model::ReportDraft;
use super::section::{self, Section};
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SectionCheck {
    pub section: Section,
    /// Missing required-field labels, in form order.
    pub missing: Vec<String>,
}

impl SectionCheck {
    pub fn passed(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn into_result(self) -> CoreResult<()> {
        if self.passed() {
            return Ok(());
        }
        Err(CoreError::SectionIncomplete {
            section: self.section.number(),
            missing: self.missing,
        })
    }
}

fn selected(value: &str) -> bool {
    !value.is_empty()
}

fn filled(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Checks the required fields of `section`. Optional fields never affect the result.
pub fn validate_section(section: Section, draft: &ReportDraft) -> SectionCheck {
    let checks: Vec<(&'static str, bool)> = match section {
        Section::Reporter => {
            let r = &draft.reporter;
            vec![
                (section::ALIAS, filled(&r.alias)),
                (section::ROLE, selected(&r.role)),
                (section::PURPOSE, selected(&r.purpose)),
                (section::DATA_BREACH, selected(&r.data_breach)),
                (section::EXTERNAL_IT_SUPPORT, selected(&r.external_it_support)),
            ]
        }
        Section::Victim => {
            let v = &draft.victim;
            vec![
                (section::REPORTING_AS, selected(&v.reporting_as)),
                (section::LOCATION, selected(&v.location)),
                (section::CONFIDENTIALITY, selected(&v.confidentiality)),
            ]
        }
        Section::Incident => {
            let i = &draft.incident;
            vec![
                (section::INCIDENT_TYPES, !i.incident_types.is_empty()),
                (section::START_DATE, !i.start_date.is_empty()),
                (section::HOW_IT_STARTED, selected(&i.how_it_started)),
                (section::DESCRIPTION, filled(&i.description)),
            ]
        }
        Section::Impact => {
            let i = &draft.impact;
            vec![
                (section::AFFECTED_ITEMS, !i.affected_items.is_empty()),
                (section::IMPACT_LEVEL, selected(&i.impact_level)),
            ]
        }
        Section::Attacker | Section::Evidence => vec![],
    };

    SectionCheck {
        section,
        missing: checks
            .into_iter()
            .filter(|(_, ok)| !ok)
            .map(|(label, _)| label.to_string())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_follow_catalog_order() {
        for s in Section::ALL {
            let check = validate_section(s, &ReportDraft::new());
            assert_eq!(check.missing, s.required_labels().to_vec());
        }
    }

    #[test]
    fn failure_converts_to_section_incomplete() {
        let err = validate_section(Section::Impact, &ReportDraft::new())
            .into_result()
            .unwrap_err();
        match err {
            CoreError::SectionIncomplete { section, missing } => {
                assert_eq!(section, 4);
                assert_eq!(missing.len(), 2);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }
}
