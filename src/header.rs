//! Column header codec
//!
//! Field names travel as camelCase identifiers (`orderId`), column headers as
//! upper-cased, space separated words (`ORDER ID`). Both directions are purely
//! structural, no lookup table is involved. Any run of characters other than
//! letters and digits (`_`, `-`, `.`, `$`, whitespace) acts as a word break.
//!
//! The round trip holds for plain one- and two-word identifiers. Acronym runs
//! (`HTTPServer` → `HTTP SERVER` → `httpServer`) do not invert exactly.

use regex::Regex;
use std::sync::LazyLock;

/// `aB`, `1B` → word break before the capital
static LOWER_UPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid header regex"));

/// `HTTPServer` → break before the capital that opens `Server`
static ACRONYM_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z])([A-Z][a-z])").expect("valid header regex"));

/// Any run of characters that are neither letters nor digits
static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}]+").expect("valid header regex"));

/// Convert a field name into a display header: `orderId` → `ORDER ID`
pub fn to_header(field_name: &str) -> String {
    let spaced = LOWER_UPPER.replace_all(field_name, "$1 $2");
    let spaced = ACRONYM_WORD.replace_all(&spaced, "$1 $2");
    let spaced = SEPARATORS.replace_all(&spaced, " ");
    spaced.trim().to_uppercase()
}

/// Convert a display header back into a camelCase field name: `ORDER ID` → `orderId`
pub fn to_field_name(header: &str) -> String {
    let mut words = SEPARATORS
        .split(header.trim())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase);

    let mut field_name = words.next().unwrap_or_default();
    for word in words {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            field_name.extend(first.to_uppercase());
            field_name.push_str(chars.as_str());
        }
    }
    field_name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_header_camel_case() {
        assert_eq!(to_header("orderId"), "ORDER ID");
        assert_eq!(to_header("customerFirstName"), "CUSTOMER FIRST NAME");
    }

    #[test]
    fn test_to_header_single_word() {
        assert_eq!(to_header("name"), "NAME");
        assert_eq!(to_header("NAME"), "NAME");
    }

    #[test]
    fn test_to_header_separators() {
        assert_eq!(to_header("order_id"), "ORDER ID");
        assert_eq!(to_header("order--id"), "ORDER ID");
        assert_eq!(to_header("_id"), "ID");
    }

    #[test]
    fn test_to_header_punctuation_breaks_words() {
        assert_eq!(to_header("order.id"), "ORDER ID");
        assert_eq!(to_header("price$usd"), "PRICE USD");
        assert_eq!(to_header("unit/price"), "UNIT PRICE");
        assert_eq!(to_field_name("PRICE $ USD"), "priceUsd");
    }

    #[test]
    fn test_to_header_acronym_and_digits() {
        assert_eq!(to_header("HTTPServer"), "HTTP SERVER");
        assert_eq!(to_header("address2Line"), "ADDRESS2 LINE");
        assert_eq!(to_header("hOffset"), "H OFFSET");
    }

    #[test]
    fn test_to_field_name() {
        assert_eq!(to_field_name("ORDER ID"), "orderId");
        assert_eq!(to_field_name("Customer_First-Name"), "customerFirstName");
        assert_eq!(to_field_name("  NAME  "), "name");
        assert_eq!(to_field_name("ORDER   ID"), "orderId");
    }

    #[test]
    fn test_to_field_name_empty() {
        assert_eq!(to_field_name(""), "");
        assert_eq!(to_field_name("   "), "");
    }

    #[test]
    fn test_round_trip_simple_identifiers() {
        for field in ["orderId", "name", "available", "hOffset", "address2Line"] {
            assert_eq!(to_field_name(&to_header(field)), field);
        }
    }

    #[test]
    fn test_round_trip_is_lossy_for_acronyms() {
        assert_eq!(to_field_name(&to_header("HTTPServer")), "httpServer");
    }
}
