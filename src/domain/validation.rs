//! Validation of user-entered segment names and route paths

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::error::ValidationError;

/// Longest accepted segment name.
pub const MAX_SEGMENT_LEN: usize = 50;

fn segment_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("segment pattern is valid"))
}

/// Validate a single URL segment typed by a user.
///
/// ```
/// use routetree::domain::validation::validate_segment_name;
/// use routetree::domain::ValidationError;
///
/// assert!(validate_segment_name("valid-name_1").is_ok());
/// assert_eq!(validate_segment_name("  "), Err(ValidationError::EmptyName));
/// ```
pub fn validate_segment_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if !segment_pattern().is_match(trimmed) {
        return Err(ValidationError::IllegalCharacters);
    }
    if trimmed.chars().count() > MAX_SEGMENT_LEN {
        return Err(ValidationError::TooLong {
            max: MAX_SEGMENT_LEN,
        });
    }
    Ok(())
}

/// Validate a full route path such as `/blog/posts`.
///
/// At most one trailing slash is ignored; every other segment, including
/// empty ones from `//`, must pass [`validate_segment_name`].
pub fn validate_route_path(path: &str) -> Result<(), ValidationError> {
    if path.trim().is_empty() {
        return Err(ValidationError::EmptyPath);
    }
    if !path.starts_with('/') {
        return Err(ValidationError::MissingLeadingSlash);
    }

    let body = &path[1..];
    let body = body.strip_suffix('/').unwrap_or(body);
    if body.is_empty() {
        return Ok(());
    }

    for (i, segment) in body.split('/').enumerate() {
        if let Err(reason) = validate_segment_name(segment) {
            return Err(ValidationError::InvalidSegment {
                position: i + 1,
                segment: segment.to_string(),
                reason: Box::new(reason),
            });
        }
    }
    Ok(())
}

/// Looser check for manually added entries: groups, dynamic segments and
/// file names like `page.tsx` are allowed, separators are not.
pub fn validate_entry_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if name.contains('/') || name.contains('\\') {
        return Err(ValidationError::IllegalCharacters);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t")]
    fn given_blank_name_when_validating_then_empty_name(#[case] name: &str) {
        assert_eq!(validate_segment_name(name), Err(ValidationError::EmptyName));
    }

    #[rstest]
    #[case("has space")]
    #[case("dot.name")]
    #[case("(group)")]
    #[case("[id]")]
    #[case("ümlaut")]
    fn given_illegal_characters_when_validating_then_rejected(#[case] name: &str) {
        assert_eq!(
            validate_segment_name(name),
            Err(ValidationError::IllegalCharacters)
        );
    }

    #[test]
    fn given_length_boundary_when_validating_then_51_is_too_long() {
        assert!(validate_segment_name(&"a".repeat(50)).is_ok());
        assert_eq!(
            validate_segment_name(&"a".repeat(51)),
            Err(ValidationError::TooLong { max: 50 })
        );
    }

    #[test]
    fn given_padded_name_when_validating_then_trimmed_before_checking() {
        assert!(validate_segment_name("  blog  ").is_ok());
    }

    #[rstest]
    #[case("/")]
    #[case("/blog")]
    #[case("/blog/")]
    #[case("/blog/my-post_2")]
    fn given_valid_route_path_when_validating_then_ok(#[case] path: &str) {
        assert!(validate_route_path(path).is_ok(), "{path}");
    }

    #[test]
    fn given_bad_route_paths_when_validating_then_reports_kind() {
        assert_eq!(validate_route_path(""), Err(ValidationError::EmptyPath));
        assert_eq!(validate_route_path("  "), Err(ValidationError::EmptyPath));
        assert_eq!(
            validate_route_path("no-leading-slash"),
            Err(ValidationError::MissingLeadingSlash)
        );
    }

    #[test]
    fn given_bad_segment_when_validating_path_then_reports_first_offender() {
        let err = validate_route_path("/ok/bad name/also bad").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidSegment {
                position: 2,
                segment: "bad name".into(),
                reason: Box::new(ValidationError::IllegalCharacters),
            }
        );
        assert_eq!(
            err.to_string(),
            "segment 2 (\"bad name\"): only letters, numbers, hyphens and underscores are allowed"
        );
    }

    #[test]
    fn given_double_slash_when_validating_path_then_empty_segment_rejected() {
        let err = validate_route_path("/a//b").unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidSegment { position: 2, .. }
        ));
        // only one trailing slash is forgiven
        assert!(validate_route_path("/a//").is_err());
    }

    #[test]
    fn given_entry_names_when_validating_then_only_separators_rejected() {
        assert!(validate_entry_name("(marketing)").is_ok());
        assert!(validate_entry_name("[...slug]").is_ok());
        assert!(validate_entry_name("page.tsx").is_ok());
        assert_eq!(validate_entry_name(" "), Err(ValidationError::EmptyName));
        assert_eq!(
            validate_entry_name("a/b"),
            Err(ValidationError::IllegalCharacters)
        );
    }
}
