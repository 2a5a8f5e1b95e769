use cybersafe_core::report::evidence::{EvidenceSection, IncomingFile, MemoryEvidenceStore};
use cybersafe_core::report::model::ReportDraft;
use cybersafe_core::report::render::{render_evidence_manifest_csv, render_review_markdown};

#[test]
fn review_lists_every_section_and_hides_password() {
    let mut d = ReportDraft::new();
    d.reporter.alias = "falcon-17".to_string();
    d.incident.incident_types.toggle("sextortion");
    d.incident.incident_types.toggle("blackmail");
    d.evidence.encryption.set_enabled(true);
    d.evidence.encryption.set_password("hunter2").unwrap();

    let md = render_review_markdown(&d);
    for heading in [
        "## 1. Reporter Information",
        "## 2. Victim Profile",
        "## 3. Incident Details",
        "## 4. Impact Assessment",
        "## 5. Attacker Information",
        "## 6. Evidence Upload",
    ] {
        assert!(md.contains(heading), "{}", heading);
    }
    assert!(md.contains("- Alias: falcon-17"));
    assert!(md.contains("- Name: -"));
    assert!(md.contains("- Incident types: blackmail, sextortion"));
    assert!(md.contains("- Encryption: on"));
    assert!(!md.contains("hunter2"));
}

#[test]
fn manifest_lists_files_then_urls() {
    let mut ev = EvidenceSection::default();
    let mut store = MemoryEvidenceStore::new();
    ev.intake_files(
        vec![IncomingFile {
            name: "chat, export.txt".to_string(),
            size_bytes: 5,
            mime_type: "text/plain".to_string(),
            contents: Some(b"hello".to_vec()),
        }],
        1024,
        &mut store,
    )
    .unwrap();
    let url_id = ev.add_url("https://social.example/u/scammer").unwrap();
    ev.set_url_description(&url_id, "impersonating profile");

    let draft = ReportDraft {
        evidence: ev,
        ..ReportDraft::default()
    };
    let csv = render_evidence_manifest_csv(&draft).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "kind,id,name_or_url,bytes,content_type,added_at,status,sha256,host,description"
    );
    assert!(lines[1].starts_with("file,f_"));
    assert!(lines[1].contains("\"chat, export.txt\",5,text/plain"));
    assert!(lines[1].contains(",pending,2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824,"));
    assert!(lines[2].starts_with("url,u_"));
    assert!(lines[2].ends_with(",social.example,impersonating profile"));
    assert_eq!(lines.len(), 3);
}
