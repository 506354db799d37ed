//! Version locator normalization
//!
//! A version locator ends in the raw version token, with underscores
//! standing in for the dots a path segment cannot carry:
//! `https://index/api/v1/cookbooks/apache/versions/1_0_0` is version `1.0.0`.

use url::Url;

/// Canonical version string of a locator, if it has a usable trailing segment
pub fn canonical_version(locator: &Url) -> Option<String> {
    let token = locator
        .path_segments()?
        .filter(|segment| !segment.is_empty())
        .last()?;
    Some(normalize_token(token))
}

/// Replace the underscores of a raw version token with dots
pub fn normalize_token(token: &str) -> String {
    token.replace('_', ".")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_canonical_version() {
        assert_eq!(
            canonical_version(&url("http://x/1_0_0")),
            Some("1.0.0".to_string())
        );
        assert_eq!(
            canonical_version(&url(
                "https://cookbooks.opscode.com/api/v1/cookbooks/apache2/versions/1_10_4"
            )),
            Some("1.10.4".to_string())
        );
    }

    #[test]
    fn test_trailing_slash_is_ignored() {
        assert_eq!(
            canonical_version(&url("http://x/versions/2_1_0/")),
            Some("2.1.0".to_string())
        );
    }

    #[test]
    fn test_query_is_not_part_of_version() {
        assert_eq!(
            canonical_version(&url("http://x/versions/0_3_1?format=json")),
            Some("0.3.1".to_string())
        );
    }

    #[test]
    fn test_no_usable_segment() {
        assert_eq!(canonical_version(&url("http://x/")), None);
        assert_eq!(canonical_version(&url("mailto:a@b.c")), None);
    }

    #[test]
    fn test_token_without_underscores() {
        assert_eq!(normalize_token("1.2.3"), "1.2.3");
        assert_eq!(normalize_token("latest"), "latest");
    }
}
