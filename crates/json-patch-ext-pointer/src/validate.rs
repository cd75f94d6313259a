//! Validation functions for JSON Pointer.

use crate::JsonPointerError;

/// Validate a JSON Pointer string.
///
/// # Errors
///
/// - [`JsonPointerError::PointerInvalid`] if the pointer is non-empty but
///   doesn't start with `/`
/// - [`JsonPointerError::InvalidEscape`] for a `~` not followed by `0` or `1`
///
/// # Example
///
/// ```
/// use json_patch_ext_pointer::validate_json_pointer;
///
/// validate_json_pointer("").unwrap();
/// validate_json_pointer("/foo/bar").unwrap();
/// validate_json_pointer("foo").unwrap_err();
/// validate_json_pointer("/a~2").unwrap_err();
/// ```
pub fn validate_json_pointer(pointer: &str) -> Result<(), JsonPointerError> {
    if pointer.is_empty() {
        return Ok(());
    }
    if !pointer.starts_with('/') {
        return Err(JsonPointerError::PointerInvalid);
    }
    let mut chars = pointer.chars();
    while let Some(c) = chars.next() {
        if c == '~' && !matches!(chars.next(), Some('0' | '1')) {
            return Err(JsonPointerError::InvalidEscape);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_empty_pointer() {
        assert!(validate_json_pointer("").is_ok());
    }

    #[test]
    fn test_validate_absolute_pointer() {
        assert!(validate_json_pointer("/").is_ok());
        assert!(validate_json_pointer("/foo").is_ok());
        assert!(validate_json_pointer("/a~0b/c~1d").is_ok());
    }

    #[test]
    fn test_validate_relative_pointer() {
        assert_eq!(
            validate_json_pointer("foo/bar"),
            Err(JsonPointerError::PointerInvalid)
        );
    }

    #[test]
    fn test_validate_bad_escape() {
        assert_eq!(
            validate_json_pointer("/a~"),
            Err(JsonPointerError::InvalidEscape)
        );
        assert_eq!(
            validate_json_pointer("/a~x"),
            Err(JsonPointerError::InvalidEscape)
        );
    }

    #[test]
    fn test_validate_long_pointer() {
        let long = format!("/{}/b~1c", "a".repeat(4096));
        assert!(validate_json_pointer(&long).is_ok());
    }
}
