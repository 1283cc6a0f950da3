//! Parsing of the director's discovery response headers

use crate::error::{FederationError, Result};

/// Parse origin URLs out of a `Link` header
///
/// The director advertises origins as comma-separated entries of the form
/// `<url>; rel="duplicate"; pri=1`. Only the URL between the angle
/// brackets is used; priority ordering is left to the caller.
pub fn parse_link_header(value: &str) -> Result<Vec<String>> {
    let mut origins = Vec::new();
    for entry in value.split(',') {
        let url = entry
            .split_once('<')
            .and_then(|(_, rest)| rest.split_once('>'))
            .map(|(url, _)| url)
            .ok_or_else(|| FederationError::MalformedHeader {
                name: "Link".to_string(),
                value: value.to_string(),
            })?;
        origins.push(url.to_string());
    }
    Ok(origins)
}

/// Parse the namespace prefix out of an `X-Pelican-Namespace` header
///
/// The header is a comma-separated list of `key=value` fields with
/// `namespace=<prefix>` first, e.g.
/// `namespace=/icecube, require-token=true, collections-url=...`.
pub fn parse_namespace_header(value: &str) -> Result<String> {
    value
        .split(',')
        .next()
        .and_then(|field| field.split_once('='))
        .map(|(_, namespace)| namespace.trim().to_string())
        .ok_or_else(|| {
            FederationError::MalformedHeader {
                name: "X-Pelican-Namespace".to_string(),
                value: value.to_string(),
            }
            .into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_link_header_single() {
        let origins = parse_link_header("<https://origin.example.org:8443>; rel=\"duplicate\"; pri=1").unwrap();
        assert_eq!(origins, vec!["https://origin.example.org:8443"]);
    }

    #[test]
    fn test_parse_link_header_multiple() {
        let origins = parse_link_header(
            "<https://origin1.example.org>; pri=1, <https://origin2.example.org>; pri=2",
        )
        .unwrap();
        assert_eq!(
            origins,
            vec!["https://origin1.example.org", "https://origin2.example.org"]
        );
    }

    #[test]
    fn test_parse_link_header_malformed() {
        assert!(parse_link_header("https://origin.example.org; pri=1").is_err());
        assert!(parse_link_header("<https://origin.example.org; pri=1").is_err());
    }

    #[test]
    fn test_parse_namespace_header() {
        let namespace =
            parse_namespace_header("namespace=/icecube/wipac, require-token=true").unwrap();
        assert_eq!(namespace, "/icecube/wipac");
    }

    #[test]
    fn test_parse_namespace_header_single_field() {
        let namespace = parse_namespace_header("namespace=/icecube").unwrap();
        assert_eq!(namespace, "/icecube");
    }

    #[test]
    fn test_parse_namespace_header_malformed() {
        assert!(parse_namespace_header("no equals sign here").is_err());
    }
}
