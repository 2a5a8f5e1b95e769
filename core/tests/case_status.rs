use cybersafe_core::case::case_id::generate_case_id;
use cybersafe_core::case::status::{lookup_case_status, CaseStage};

#[test]
fn lookup_is_deterministic_and_history_ends_at_stage() {
    let id = generate_case_id("CSP", 2025);
    let a = lookup_case_status("CSP", &id).unwrap();
    let b = lookup_case_status("CSP", &id).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.history.first(), Some(&CaseStage::Received));
    assert_eq!(a.history.last(), Some(&a.stage));
    assert!(a.history.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn lookup_normalizes_case_and_whitespace() {
    let a = lookup_case_status("CSP", "CSP-2025-AB12CD34").unwrap();
    let b = lookup_case_status("CSP", "  csp-2025-ab12cd34 \n").unwrap();
    assert_eq!(a, b);
    assert_eq!(b.case_id, "CSP-2025-AB12CD34");
}

#[test]
fn malformed_ids_are_rejected() {
    for bad in [
        "",
        "CSP-2025",
        "CSP-2025-AB12CD3",
        "XYZ-2025-AB12CD34",
        "CSP-2025-AB12CD34X",
        "CSP-۲۰۲۵-AB12CD34",
        "CSP-२०२५-AB12CD34",
    ] {
        let err = lookup_case_status("CSP", bad).unwrap_err();
        assert!(err.to_string().contains("CSP-YYYY-XXXXXXXX"), "{}", bad);
    }
}
