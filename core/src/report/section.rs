use serde::{Deserialize, Serialize};

pub const ALIAS: &str = "Alias / Unique ID";
pub const ROLE: &str = "Your Role";
pub const PURPOSE: &str = "Purpose of Report";
pub const DATA_BREACH: &str = "Data Breach Involved";
pub const EXTERNAL_IT_SUPPORT: &str = "External IT Support";

pub const REPORTING_AS: &str = "Reporting As";
pub const LOCATION: &str = "Location";
pub const CONFIDENTIALITY: &str = "Confidentiality Preference";

pub const INCIDENT_TYPES: &str = "Incident Type (select at least one)";
pub const START_DATE: &str = "Start Date";
pub const HOW_IT_STARTED: &str = "How It Started";
pub const DESCRIPTION: &str = "Incident Description";

pub const AFFECTED_ITEMS: &str = "Affected Items (select at least one)";
pub const IMPACT_LEVEL: &str = "Impact Level";

/// The six fixed form sections, in order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    Reporter,
    Victim,
    Incident,
    Impact,
    Attacker,
    Evidence,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Reporter,
        Section::Victim,
        Section::Incident,
        Section::Impact,
        Section::Attacker,
        Section::Evidence,
    ];

    pub const FIRST: Section = Section::Reporter;
    pub const LAST: Section = Section::Evidence;

    /// 1-based position.
    pub fn number(self) -> u8 {
        match self {
            Section::Reporter => 1,
            Section::Victim => 2,
            Section::Incident => 3,
            Section::Impact => 4,
            Section::Attacker => 5,
            Section::Evidence => 6,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.get(usize::from(n).checked_sub(1)?).copied()
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn prev(self) -> Option<Self> {
        Self::from_number(self.number() - 1)
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::Reporter => "Reporter Information",
            Section::Victim => "Victim Profile",
            Section::Incident => "Incident Details",
            Section::Impact => "Impact Assessment",
            Section::Attacker => "Attacker Information",
            Section::Evidence => "Evidence Upload",
        }
    }

    /// Labels of the required fields, in the order they are reported when missing.
    pub fn required_labels(self) -> &'static [&'static str] {
        match self {
            Section::Reporter => &[ALIAS, ROLE, PURPOSE, DATA_BREACH, EXTERNAL_IT_SUPPORT],
            Section::Victim => &[REPORTING_AS, LOCATION, CONFIDENTIALITY],
            Section::Incident => &[INCIDENT_TYPES, START_DATE, HOW_IT_STARTED, DESCRIPTION],
            Section::Impact => &[AFFECTED_ITEMS, IMPACT_LEVEL],
            Section::Attacker | Section::Evidence => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Section;

    #[test]
    fn numbering_round_trips_and_bounds_hold() {
        for s in Section::ALL {
            assert_eq!(Section::from_number(s.number()), Some(s));
        }
        assert_eq!(Section::from_number(0), None);
        assert_eq!(Section::from_number(7), None);
        assert_eq!(Section::FIRST.prev(), None);
        assert_eq!(Section::LAST.next(), None);
        assert_eq!(Section::Incident.next(), Some(Section::Impact));
        assert_eq!(Section::Incident.prev(), Some(Section::Victim));
    }
}
