use cybersafe_core::config::WizardConfig;

#[test]
fn json_config_fills_missing_keys_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wizard.json");
    std::fs::write(&path, br#"{"case_id_prefix":"FIA","submit_latency_ms":0}"#).unwrap();

    let cfg = WizardConfig::from_json_file(&path).unwrap();
    assert_eq!(cfg.case_id_prefix, "FIA");
    assert_eq!(cfg.submit_latency_ms, 0);
    assert_eq!(cfg.max_evidence_file_bytes, 100 * 1024 * 1024);
    assert_eq!(cfg.helpline, WizardConfig::default().helpline);
}

#[test]
fn invalid_json_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wizard.json");
    std::fs::write(&path, br#"{"max_evidence_file_bytes":0}"#).unwrap();
    assert!(WizardConfig::from_json_file(&path).is_err());

    std::fs::write(&path, b"{not json").unwrap();
    assert!(WizardConfig::from_json_file(&path).is_err());
    assert!(WizardConfig::from_json_file(dir.path().join("missing.json")).is_err());
}
