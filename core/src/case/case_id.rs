use crate::error::{CoreError, CoreResult};
use rand::Rng;
use regex::Regex;
use sha2::{Digest, Sha256};

pub const CASE_ID_SUFFIX_LEN: usize = 8;

const SUFFIX_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// `PREFIX-YEAR-XXXXXXXX` with an `[A-Z0-9]{8}` suffix.
pub fn generate_case_id(prefix: &str, year: i32) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..CASE_ID_SUFFIX_LEN)
        .map(|_| SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())] as char)
        .collect();
    format!("{}-{}-{}", prefix, year, suffix)
}

pub fn generate_case_id_now(prefix: &str) -> String {
    generate_case_id(prefix, time::OffsetDateTime::now_utc().year())
}

pub fn is_case_id(prefix: &str, candidate: &str) -> bool {
    match case_id_pattern(prefix) {
        Ok(re) => re.is_match(candidate),
        Err(_) => false,
    }
}

pub fn case_id_pattern(prefix: &str) -> CoreResult<Regex> {
    Regex::new(&format!(
        r"^{}-[0-9]{{4}}-[A-Z0-9]{{{}}}$",
        regex::escape(prefix),
        CASE_ID_SUFFIX_LEN
    ))
    .map_err(|e| CoreError::InvalidInput(format!("invalid case id prefix: {}", e)))
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut h = Sha256::new();
    h.update(bytes);
    hex::encode(h.finalize())
}

#[cfg(test)]
mod tests {
    use super::{generate_case_id, is_case_id};

    #[test]
    fn generated_ids_match_pattern() {
        for _ in 0..64 {
            let id = generate_case_id("CSP", 2026);
            assert!(id.starts_with("CSP-2026-"), "{}", id);
            assert!(is_case_id("CSP", &id), "{}", id);
        }
    }

    #[test]
    fn pattern_rejects_wrong_prefix_and_lowercase() {
        assert!(!is_case_id("CSP", "FIA-2026-ABCD1234"));
        assert!(!is_case_id("CSP", "CSP-2026-abcd1234"));
        assert!(!is_case_id("CSP", "CSP-26-ABCD1234"));
        assert!(!is_case_id("CSP", "CSP-2026-ABCD123"));
        assert!(!is_case_id("CSP", "CSP-۲۰۲۶-ABCD1234"));
    }
}
