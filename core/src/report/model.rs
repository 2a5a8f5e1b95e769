use super::evidence::EvidenceSection;
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Checkbox-group selection. Membership only; duplicates cannot exist.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ChoiceSet(BTreeSet<String>);

impl ChoiceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `value`. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, value: &str) -> bool {
        if self.0.remove(value) {
            false
        } else {
            self.0.insert(value.to_string());
            true
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.contains(value)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ChoiceSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

// Single-choice selections are stored as strings; empty means "not selected".

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReporterInfo {
    pub alias: String,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub role: String,
    pub purpose: String,
    pub data_breach: String,
    pub external_it_support: String,
    pub agencies_notified: ChoiceSet,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VictimProfile {
    /// `individual` or `organization`; picks which optional sub-fields the form shows.
    pub reporting_as: String,
    pub age: String,
    pub gender: String,
    pub org_name: String,
    pub org_sector: String,
    pub org_size: String,
    pub location: String,
    pub confidentiality: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IncidentDetails {
    pub incident_types: ChoiceSet,
    pub start_date: String,
    pub end_date: String,
    pub how_it_started: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImpactAssessment {
    pub affected_items: ChoiceSet,
    pub impact_level: String,
    pub financial_loss: String,
    pub victim_type: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttackerInfo {
    pub attacker_details: ChoiceSet,
    pub known_identifiers: String,
    pub suspected_motive: String,
    pub additional_info: String,
}

/// The in-progress report. Lives only in memory for one wizard session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportDraft {
    pub reporter: ReporterInfo,
    pub victim: VictimProfile,
    pub incident: IncidentDetails,
    pub impact: ImpactAssessment,
    pub attacker: AttackerInfo,
    pub evidence: EvidenceSection,
}

pub const FIELD_KEYS: &[&str] = &[
    "alias",
    "full_name",
    "phone",
    "email",
    "role",
    "purpose",
    "data_breach",
    "external_it_support",
    "reporting_as",
    "age",
    "gender",
    "org_name",
    "org_sector",
    "org_size",
    "location",
    "confidentiality",
    "start_date",
    "end_date",
    "how_it_started",
    "description",
    "impact_level",
    "financial_loss",
    "victim_type",
    "known_identifiers",
    "suspected_motive",
    "additional_info",
    "evidence_source",
    "original_or_copy",
    "modified",
    "obtained_when",
    "others_have_copies",
    "encryption_password",
    "encryption_notes",
];

pub const CHOICE_GROUPS: &[&str] = &[
    "agencies_notified",
    "incident_types",
    "affected_items",
    "attacker_details",
];

impl ReportDraft {
    pub fn new() -> Self {
        Self::default()
    }

    fn field_mut(&mut self, key: &str) -> Option<&mut String> {
        let q = &mut self.evidence.questions;
        let field = match key {
            "alias" => &mut self.reporter.alias,
            "full_name" => &mut self.reporter.full_name,
            "phone" => &mut self.reporter.phone,
            "email" => &mut self.reporter.email,
            "role" => &mut self.reporter.role,
            "purpose" => &mut self.reporter.purpose,
            "data_breach" => &mut self.reporter.data_breach,
            "external_it_support" => &mut self.reporter.external_it_support,
            "reporting_as" => &mut self.victim.reporting_as,
            "age" => &mut self.victim.age,
            "gender" => &mut self.victim.gender,
            "org_name" => &mut self.victim.org_name,
            "org_sector" => &mut self.victim.org_sector,
            "org_size" => &mut self.victim.org_size,
            "location" => &mut self.victim.location,
            "confidentiality" => &mut self.victim.confidentiality,
            "start_date" => &mut self.incident.start_date,
            "end_date" => &mut self.incident.end_date,
            "how_it_started" => &mut self.incident.how_it_started,
            "description" => &mut self.incident.description,
            "impact_level" => &mut self.impact.impact_level,
            "financial_loss" => &mut self.impact.financial_loss,
            "victim_type" => &mut self.impact.victim_type,
            "known_identifiers" => &mut self.attacker.known_identifiers,
            "suspected_motive" => &mut self.attacker.suspected_motive,
            "additional_info" => &mut self.attacker.additional_info,
            "evidence_source" => &mut q.source,
            "original_or_copy" => &mut q.original_or_copy,
            "modified" => &mut q.modified,
            "obtained_when" => &mut q.obtained_when,
            "others_have_copies" => &mut q.others_have_copies,
            "encryption_notes" => &mut self.evidence.encryption.notes,
            _ => return None,
        };
        Some(field)
    }

    /// Overwrites one scalar field by key.
    pub fn set_field(&mut self, key: &str, value: &str) -> CoreResult<()> {
        // The password only exists while encryption is enabled.
        if key == "encryption_password" {
            return self.evidence.encryption.set_password(value);
        }
        let field = self
            .field_mut(key)
            .ok_or_else(|| CoreError::UnknownField(key.to_string()))?;
        *field = value.to_string();
        tracing::debug!(field = key, "draft field updated");
        Ok(())
    }

    pub fn choice_group(&self, group: &str) -> Option<&ChoiceSet> {
        match group {
            "agencies_notified" => Some(&self.reporter.agencies_notified),
            "incident_types" => Some(&self.incident.incident_types),
            "affected_items" => Some(&self.impact.affected_items),
            "attacker_details" => Some(&self.attacker.attacker_details),
            _ => None,
        }
    }

    /// Flips one checkbox in `group`. Returns whether it is checked afterwards.
    pub fn toggle_choice(&mut self, group: &str, value: &str) -> CoreResult<bool> {
        let set = match group {
            "agencies_notified" => &mut self.reporter.agencies_notified,
            "incident_types" => &mut self.incident.incident_types,
            "affected_items" => &mut self.impact.affected_items,
            "attacker_details" => &mut self.attacker.attacker_details,
            _ => return Err(CoreError::UnknownField(group.to_string())),
        };
        let selected = set.toggle(value);
        tracing::debug!(group, value, selected, "choice toggled");
        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::{ChoiceSet, ReportDraft, CHOICE_GROUPS, FIELD_KEYS};

    #[test]
    fn toggle_twice_restores_original_set() {
        let mut set: ChoiceSet = ["phishing", "sextortion"].into_iter().collect();
        let before = set.clone();
        assert!(set.toggle("identity-theft"));
        assert!(!set.toggle("identity-theft"));
        assert_eq!(set, before);

        assert!(!set.toggle("phishing"));
        assert!(set.toggle("phishing"));
        assert_eq!(set, before);
    }

    #[test]
    fn every_listed_field_key_is_settable() {
        let mut draft = ReportDraft::new();
        draft.evidence.encryption.set_enabled(true);
        for key in FIELD_KEYS {
            draft.set_field(key, "x").unwrap();
        }
        for group in CHOICE_GROUPS {
            assert!(draft.toggle_choice(group, "x").unwrap());
            assert!(draft.choice_group(group).unwrap().contains("x"));
        }
    }

    #[test]
    fn unknown_keys_leave_draft_untouched() {
        let mut draft = ReportDraft::new();
        assert!(draft.set_field("section", "4").is_err());
        assert!(draft.toggle_choice("colours", "red").is_err());
        assert_eq!(draft, ReportDraft::new());
    }
}
