//! Smart decoder: fixed-regex entity extraction.
//!
//! Runs independently of the Grok match and records common entities found
//! anywhere in the raw line under `_`-prefixed keys.

use std::sync::LazyLock;

use regex::Regex;

static IPV4: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:\d{1,3}\.){3}\d{1,3}\b").unwrap());
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap()
});
static URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://[^\s]+").unwrap());
static MAC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9A-Fa-f]{2}[:-]){5}([0-9A-Fa-f]{2})").unwrap());
static UUID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}")
        .unwrap()
});

/// Extracts common entities from a raw log line.
///
/// Returns `(key, value)` pairs where `key` is one of `_ipv4_addr`,
/// `_email_addr`, `_urls`, `_mac_addr`, `_uuids` and `value` is the
/// comma-joined list of matches. Keys with no matches are absent.
#[must_use]
pub fn smart_decode(line: &str) -> Vec<(&'static str, String)> {
    let mut decoded = Vec::new();

    for (key, regex) in [
        ("_ipv4_addr", &*IPV4),
        ("_email_addr", &*EMAIL),
        ("_urls", &*URL),
        ("_mac_addr", &*MAC),
        ("_uuids", &*UUID),
    ] {
        let matches: Vec<&str> = regex.find_iter(line).map(|m| m.as_str()).collect();
        if !matches.is_empty() {
            decoded.push((key, matches.join(", ")));
        }
    }

    decoded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decoded_map(line: &str) -> std::collections::HashMap<&'static str, String> {
        smart_decode(line).into_iter().collect()
    }

    #[test]
    fn decodes_ipv4_and_email() {
        let decoded = decoded_map("user bob@x.com from 10.0.0.1");
        assert_eq!(decoded["_email_addr"], "bob@x.com");
        assert_eq!(decoded["_ipv4_addr"], "10.0.0.1");
        assert!(!decoded.contains_key("_urls"));
    }

    #[test]
    fn joins_multiple_matches_with_comma() {
        let decoded = decoded_map("SRC=192.168.0.1 DST=192.168.0.2");
        assert_eq!(decoded["_ipv4_addr"], "192.168.0.1, 192.168.0.2");
    }

    #[test]
    fn decodes_urls() {
        let decoded = decoded_map("redirect to https://example.com/path?q=1 done");
        assert_eq!(decoded["_urls"], "https://example.com/path?q=1");
    }

    #[test]
    fn decodes_mac_addresses() {
        let decoded = decoded_map("from de:ad:be:ef:00:01 dropped");
        assert_eq!(decoded["_mac_addr"], "de:ad:be:ef:00:01");
    }

    #[test]
    fn decodes_uuids() {
        let decoded = decoded_map("request c1234abc-def5-4a67-89ab-klmno0123456 failed");
        // The trailing id is not hex; only valid UUIDs match.
        assert!(!decoded.contains_key("_uuids"));

        let decoded = decoded_map("request 550e8400-e29b-41d4-a716-446655440000 ok");
        assert_eq!(decoded["_uuids"], "550e8400-e29b-41d4-a716-446655440000");
    }

    #[test]
    fn plain_line_decodes_nothing() {
        assert!(smart_decode("nothing interesting here").is_empty());
    }
}
