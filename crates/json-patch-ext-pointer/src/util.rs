use crate::types::{Path, PathToken};

/// Unescapes a JSON Pointer path component.
///
/// Per RFC 6901, `~1` is replaced with `/` and `~0` is replaced with `~`.
///
/// # Example
///
/// ```
/// use json_patch_ext_pointer::unescape_component;
///
/// assert_eq!(unescape_component("a~0b"), "a~b");
/// assert_eq!(unescape_component("c~1d"), "c/d");
/// assert_eq!(unescape_component("~01"), "~1");
/// ```
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // ~1 first, otherwise "~01" would decode to "/"
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a JSON Pointer path component.
///
/// # Example
///
/// ```
/// use json_patch_ext_pointer::escape_component;
///
/// assert_eq!(escape_component("a~b"), "a~0b");
/// assert_eq!(escape_component("c/d"), "c~1d");
/// ```
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// Parse a JSON Pointer string into a [`Path`].
///
/// The empty string is the root. The leading `/` is stripped and every
/// component is unescaped. No validation happens here; use
/// [`str::parse`] on [`Path`] for checked parsing.
///
/// # Example
///
/// ```
/// use json_patch_ext_pointer::{parse_json_pointer, PathToken};
///
/// assert!(parse_json_pointer("").is_root());
/// let path = parse_json_pointer("/foo/0/-");
/// assert_eq!(path.tokens(), &[PathToken::new("foo"), PathToken::Index(0), PathToken::Append]);
/// ```
pub fn parse_json_pointer(pointer: &str) -> Path {
    if pointer.is_empty() {
        return Path::root();
    }
    let body = pointer.strip_prefix('/').unwrap_or(pointer);
    body.split('/')
        .map(|component| PathToken::new(unescape_component(component)))
        .collect()
}

/// Format a [`Path`] as a JSON Pointer string. The root formats as `""`.
///
/// # Example
///
/// ```
/// use json_patch_ext_pointer::{format_json_pointer, Path};
///
/// assert_eq!(format_json_pointer(&Path::root()), "");
/// assert_eq!(format_json_pointer(&Path::from_tokens(["a/b", "c"])), "/a~1b/c");
/// ```
pub fn format_json_pointer(path: &Path) -> String {
    let mut out = String::new();
    for token in path.tokens() {
        out.push('/');
        out.push_str(&escape_component(&token.as_str()));
    }
    out
}

/// Check if a string represents a valid non-negative integer array index.
///
/// Leading zeros are rejected, as RFC 6901 requires.
///
/// # Example
///
/// ```
/// use json_patch_ext_pointer::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("123"));
/// assert!(!is_valid_index("01"));
/// assert!(!is_valid_index("-1"));
/// assert!(!is_valid_index("abc"));
/// ```
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(u8::is_ascii_digit)
}
