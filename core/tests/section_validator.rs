use cybersafe_core::report::model::ReportDraft;
use cybersafe_core::report::section::Section;
use cybersafe_core::report::validate::validate_section;

fn reporter_ready() -> ReportDraft {
    let mut d = ReportDraft::new();
    d.reporter.alias = "falcon-17".to_string();
    d.reporter.role = "victim".to_string();
    d.reporter.purpose = "seek-help".to_string();
    d.reporter.data_breach = "no".to_string();
    d.reporter.external_it_support = "yes".to_string();
    d
}

#[test]
fn blank_alias_is_the_only_missing_field() {
    let mut d = reporter_ready();
    d.reporter.alias = String::new();
    let check = validate_section(Section::Reporter, &d);
    assert!(!check.passed());
    assert_eq!(check.missing, vec!["Alias / Unique ID".to_string()]);

    d.reporter.alias = "   ".to_string();
    assert_eq!(
        validate_section(Section::Reporter, &d).missing,
        vec!["Alias / Unique ID".to_string()]
    );
}

#[test]
fn reporter_optional_fields_do_not_matter() {
    let d = reporter_ready();
    assert!(validate_section(Section::Reporter, &d).passed());

    let mut with_optionals = d.clone();
    with_optionals.reporter.full_name = "A. Khan".to_string();
    with_optionals.reporter.email = "not-an-email".to_string();
    with_optionals.reporter.agencies_notified.toggle("fia");
    assert!(validate_section(Section::Reporter, &with_optionals).passed());
}

#[test]
fn each_reporter_requirement_fails_alone() {
    let setters: [fn(&mut ReportDraft); 5] = [
        |d| d.reporter.alias.clear(),
        |d| d.reporter.role.clear(),
        |d| d.reporter.purpose.clear(),
        |d| d.reporter.data_breach.clear(),
        |d| d.reporter.external_it_support.clear(),
    ];
    for (i, clear) in setters.iter().enumerate() {
        let mut d = reporter_ready();
        clear(&mut d);
        let check = validate_section(Section::Reporter, &d);
        assert_eq!(check.missing.len(), 1, "requirement {}", i);
        assert_eq!(
            check.missing[0],
            Section::Reporter.required_labels()[i],
            "requirement {}",
            i
        );
    }
}

#[test]
fn victim_branch_fields_are_always_optional() {
    let mut d = ReportDraft::new();
    d.victim.reporting_as = "organization".to_string();
    d.victim.location = "lahore".to_string();
    d.victim.confidentiality = "anonymous".to_string();
    assert!(validate_section(Section::Victim, &d).passed());

    d.victim.reporting_as = "individual".to_string();
    assert!(validate_section(Section::Victim, &d).passed());

    d.victim.location.clear();
    assert_eq!(
        validate_section(Section::Victim, &d).missing,
        vec!["Location".to_string()]
    );
}

#[test]
fn empty_incident_types_are_reported() {
    let mut d = ReportDraft::new();
    d.incident.start_date = "2024-01-01".to_string();
    d.incident.how_it_started = "suspicious-link".to_string();
    d.incident.description = "x".to_string();
    let check = validate_section(Section::Incident, &d);
    assert!(!check.passed());
    assert!(check
        .missing
        .contains(&"Incident Type (select at least one)".to_string()));

    d.incident.incident_types.toggle("phishing");
    assert!(validate_section(Section::Incident, &d).passed());

    d.incident.description = " \n\t".to_string();
    assert_eq!(
        validate_section(Section::Incident, &d).missing,
        vec!["Incident Description".to_string()]
    );
}

#[test]
fn impact_requires_items_and_level() {
    let mut d = ReportDraft::new();
    d.impact.financial_loss = "50000 PKR".to_string();
    assert_eq!(
        validate_section(Section::Impact, &d).missing,
        vec![
            "Affected Items (select at least one)".to_string(),
            "Impact Level".to_string()
        ]
    );
    d.impact.affected_items.toggle("bank-account");
    d.impact.impact_level = "high".to_string();
    assert!(validate_section(Section::Impact, &d).passed());
}

#[test]
fn attacker_and_evidence_sections_always_pass() {
    let empty = ReportDraft::new();
    assert!(validate_section(Section::Attacker, &empty).passed());
    assert!(validate_section(Section::Evidence, &empty).passed());
}
