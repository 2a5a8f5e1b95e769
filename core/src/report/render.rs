use super::evidence::format_bytes;
use super::model::{ChoiceSet, ReportDraft};
use super::section::Section;
use crate::error::CoreResult;

fn or_dash(v: &str) -> &str {
    if v.trim().is_empty() {
        "-"
    } else {
        v
    }
}

fn choices(set: &ChoiceSet) -> String {
    if set.is_empty() {
        "-".to_string()
    } else {
        set.iter().collect::<Vec<_>>().join(", ")
    }
}

/// Review sheet shown before submitting. The encryption password is never printed.
pub fn render_review_markdown(draft: &ReportDraft) -> String {
    let mut md = String::from("# Incident Report Review\n");

    let rows: Vec<(Section, Vec<(&str, String)>)> = vec![
        (
            Section::Reporter,
            vec![
                ("Alias", or_dash(&draft.reporter.alias).to_string()),
                ("Name", or_dash(&draft.reporter.full_name).to_string()),
                ("Phone", or_dash(&draft.reporter.phone).to_string()),
                ("Email", or_dash(&draft.reporter.email).to_string()),
                ("Role", or_dash(&draft.reporter.role).to_string()),
                ("Purpose", or_dash(&draft.reporter.purpose).to_string()),
                ("Data breach", or_dash(&draft.reporter.data_breach).to_string()),
                (
                    "External IT support",
                    or_dash(&draft.reporter.external_it_support).to_string(),
                ),
                (
                    "Agencies notified",
                    choices(&draft.reporter.agencies_notified),
                ),
            ],
        ),
        (
            Section::Victim,
            vec![
                ("Reporting as", or_dash(&draft.victim.reporting_as).to_string()),
                ("Age", or_dash(&draft.victim.age).to_string()),
                ("Gender", or_dash(&draft.victim.gender).to_string()),
                ("Organization", or_dash(&draft.victim.org_name).to_string()),
                ("Sector", or_dash(&draft.victim.org_sector).to_string()),
                ("Size", or_dash(&draft.victim.org_size).to_string()),
                ("Location", or_dash(&draft.victim.location).to_string()),
                (
                    "Confidentiality",
                    or_dash(&draft.victim.confidentiality).to_string(),
                ),
            ],
        ),
        (
            Section::Incident,
            vec![
                ("Incident types", choices(&draft.incident.incident_types)),
                ("Start date", or_dash(&draft.incident.start_date).to_string()),
                ("End date", or_dash(&draft.incident.end_date).to_string()),
                (
                    "How it started",
                    or_dash(&draft.incident.how_it_started).to_string(),
                ),
                ("Description", or_dash(&draft.incident.description).to_string()),
            ],
        ),
        (
            Section::Impact,
            vec![
                ("Affected items", choices(&draft.impact.affected_items)),
                ("Impact level", or_dash(&draft.impact.impact_level).to_string()),
                (
                    "Financial loss",
                    or_dash(&draft.impact.financial_loss).to_string(),
                ),
                ("Victim type", or_dash(&draft.impact.victim_type).to_string()),
            ],
        ),
        (
            Section::Attacker,
            vec![
                ("Attacker details", choices(&draft.attacker.attacker_details)),
                (
                    "Known identifiers",
                    or_dash(&draft.attacker.known_identifiers).to_string(),
                ),
                (
                    "Suspected motive",
                    or_dash(&draft.attacker.suspected_motive).to_string(),
                ),
                (
                    "Additional info",
                    or_dash(&draft.attacker.additional_info).to_string(),
                ),
            ],
        ),
    ];

    for (section, fields) in rows {
        md.push_str(&format!("\n## {}. {}\n\n", section.number(), section.title()));
        for (label, value) in fields {
            md.push_str(&format!("- {}: {}\n", label, value));
        }
    }

    let ev = &draft.evidence;
    md.push_str(&format!(
        "\n## {}. {}\n\n",
        Section::Evidence.number(),
        Section::Evidence.title()
    ));
    md.push_str(&format!("- Files: {}\n", ev.files.len()));
    for f in &ev.files {
        md.push_str(&format!(
            "  - {} ({}, {}) [{}]\n",
            f.name,
            format_bytes(f.size_bytes),
            f.mime_type,
            f.status.as_str()
        ));
    }
    md.push_str(&format!("- Links: {}\n", ev.urls.len()));
    for u in &ev.urls {
        md.push_str(&format!("  - {} {}\n", u.url, or_dash(&u.description)));
    }
    let q = &ev.questions;
    md.push_str(&format!("- Evidence source: {}\n", or_dash(&q.source)));
    md.push_str(&format!("- Original or copy: {}\n", or_dash(&q.original_or_copy)));
    md.push_str(&format!("- Modified: {}\n", or_dash(&q.modified)));
    md.push_str(&format!("- Obtained: {}\n", or_dash(&q.obtained_when)));
    md.push_str(&format!(
        "- Others have copies: {}\n",
        or_dash(&q.others_have_copies)
    ));
    md.push_str(&format!(
        "- Encryption: {}\n",
        if ev.encryption.enabled { "on" } else { "off" }
    ));
    md.push_str(&format!(
        "- Encryption notes: {}\n",
        or_dash(&ev.encryption.notes)
    ));
    md
}

/// Files first, then links, each in the order they were added.
pub fn render_evidence_manifest_csv(draft: &ReportDraft) -> CoreResult<String> {
    let mut wtr = csv::WriterBuilder::new().from_writer(vec![]);
    wtr.write_record([
        "kind",
        "id",
        "name_or_url",
        "bytes",
        "content_type",
        "added_at",
        "status",
        "sha256",
        "host",
        "description",
    ])?;
    for f in &draft.evidence.files {
        let size = f.size_bytes.to_string();
        wtr.write_record([
            "file",
            f.id.as_str(),
            f.name.as_str(),
            size.as_str(),
            f.mime_type.as_str(),
            f.uploaded_at.as_str(),
            f.status.as_str(),
            f.sha256.as_deref().unwrap_or(""),
            "",
            "",
        ])?;
    }
    for u in &draft.evidence.urls {
        let host = u.host().unwrap_or_default();
        wtr.write_record([
            "url",
            u.id.as_str(),
            u.url.as_str(),
            "",
            "",
            u.added_at.as_str(),
            "",
            "",
            host.as_str(),
            u.description.as_str(),
        ])?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).replace("\r\n", "\n"))
}
