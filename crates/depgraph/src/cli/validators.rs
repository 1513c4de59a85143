//! CLI input validation functions.
//!
//! Used by clap's `value_parser` attribute so bad input is rejected before
//! the store is touched.

/// Validate a node name.
///
/// Names are kept exactly as given. They must contain at least one
/// non-whitespace character and no control characters.
pub fn validate_node_name(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        return Err("Node name cannot be empty".to_string());
    }

    if s.chars().any(char::is_control) {
        return Err(format!(
            "Node name '{}' contains control characters",
            s.escape_default()
        ));
    }

    Ok(s.to_string())
}

/// Validate a node name used to look a node up.
///
/// Only the empty string is rejected. Stored names are not checked on load,
/// so a hand-edited document may hold names that `add-node` would refuse.
pub fn validate_query_name(s: &str) -> Result<String, String> {
    if s.is_empty() {
        return Err("Node name cannot be empty".to_string());
    }

    Ok(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("LGACB01")]
    #[case("sql-include:CUSTOMER")]
    #[case("My Program")]
    #[case("ПРОГРАММА")]
    fn test_valid_names(#[case] name: &str) {
        assert_eq!(validate_node_name(name), Ok(name.to_string()));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("A\nB")]
    #[case("tab\there")]
    fn test_invalid_names(#[case] name: &str) {
        assert!(validate_node_name(name).is_err());
    }

    #[rstest]
    #[case("LGACB01")]
    #[case("   ")]
    #[case("A\nB")]
    #[case("tab\there")]
    fn test_query_accepts_stored_names(#[case] name: &str) {
        assert_eq!(validate_query_name(name), Ok(name.to_string()));
    }

    #[test]
    fn test_query_rejects_empty() {
        assert!(validate_query_name("").is_err());
    }

    #[test]
    fn test_names_are_not_trimmed() {
        assert_eq!(validate_node_name(" A "), Ok(" A ".to_string()));
    }
}
