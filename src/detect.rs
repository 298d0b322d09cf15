//! Lightweight version sniffing for uploaded specification documents.
//!
//! Classification is substring-based on purpose: callers upload complete,
//! well-formed documents, so a full parse just to pick a loader would be
//! wasted work. Documents that quote their version unusually are
//! misclassified; that limitation is accepted by the calling contract.

use std::fmt;

/// Specification flavor of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecVersion {
    /// OpenAPI 3.x (JSON or YAML)
    OpenApi3,
    /// Swagger 2.0 (JSON or YAML)
    Swagger2,
    /// Neither marker found
    Unknown,
}

impl fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecVersion::OpenApi3 => write!(f, "OpenAPI 3.x"),
            SpecVersion::Swagger2 => write!(f, "Swagger 2.0"),
            SpecVersion::Unknown => write!(f, "unknown"),
        }
    }
}

/// Classify raw document bytes as OpenAPI 3.x, Swagger 2.0 or unknown.
///
/// OpenAPI 3.x is checked first and wins when both marker pairs are
/// present. Non-UTF8 input is viewed lossily; no I/O, no full parse.
pub fn detect_version(data: &[u8]) -> SpecVersion {
    let text = String::from_utf8_lossy(data);
    if text.contains("openapi") && text.contains("3.") {
        SpecVersion::OpenApi3
    } else if text.contains("swagger") && text.contains("2.") {
        SpecVersion::Swagger2
    } else {
        SpecVersion::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_openapi3() {
        assert_eq!(
            detect_version(br#"{"openapi": "3.0.3", "info": {}}"#),
            SpecVersion::OpenApi3
        );
        assert_eq!(
            detect_version(b"openapi: 3.1.0\ninfo: {}\n"),
            SpecVersion::OpenApi3
        );
    }

    #[test]
    fn test_detect_swagger2() {
        assert_eq!(
            detect_version(br#"{"swagger": "2.0", "info": {}}"#),
            SpecVersion::Swagger2
        );
    }

    #[test]
    fn test_openapi3_wins_when_both_markers_present() {
        // A converted document may carry both marker pairs; the 3.x check
        // runs first and takes precedence.
        let data = br#"{"openapi": "3.1.0", "x-converted-from": "swagger 2.0"}"#;
        assert_eq!(detect_version(data), SpecVersion::OpenApi3);
    }

    #[test]
    fn test_marker_alone_is_not_enough() {
        // Each classification needs its version-like substring too.
        assert_eq!(detect_version(b"openapi document"), SpecVersion::Unknown);
        assert_eq!(detect_version(b"swagger document"), SpecVersion::Unknown);
    }

    #[test]
    fn test_detect_unknown() {
        assert_eq!(detect_version(b"just some text"), SpecVersion::Unknown);
        assert_eq!(detect_version(b""), SpecVersion::Unknown);
    }

    #[test]
    fn test_detect_tolerates_invalid_utf8() {
        assert_eq!(detect_version(&[0xff, 0xfe, 0x00]), SpecVersion::Unknown);
        // Markers survive a lossy view around the bad byte.
        let mut data = b"\xff{\"openapi\": \"3.0.0\"}".to_vec();
        data.push(0xff);
        assert_eq!(detect_version(&data), SpecVersion::OpenApi3);
    }
}
