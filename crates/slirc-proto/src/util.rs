//! Utility functions for IRC protocol handling.
//!
//! Safe string truncation for the outbound length limit and rendering of
//! parameter lists in wire form.

/// Truncates a string to at most `max_bytes` bytes without breaking
/// a multi-byte UTF-8 codepoint at the end.
///
/// # Examples
///
/// ```
/// use slirc_proto::util::truncate_utf8_safe;
///
/// assert_eq!(truncate_utf8_safe("hello world", 5), "hello");
///
/// // "é" is two bytes; cutting inside it backs off to the previous boundary
/// assert_eq!(truncate_utf8_safe("café", 4), "caf");
///
/// assert_eq!(truncate_utf8_safe("hi", 10), "hi");
/// ```
#[inline]
pub fn truncate_utf8_safe(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }

    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }

    &s[..end]
}

/// Whether a final parameter must be sent with a leading `:`.
#[inline]
pub fn needs_colon_prefix(s: &str) -> bool {
    s.is_empty() || s.contains(' ') || s.starts_with(':')
}

/// Render a parameter list the way it appears after the command on the wire.
///
/// Parameters are separated by single spaces; the last one is marked as
/// trailing only when it has to be.
///
/// ```
/// use slirc_proto::util::join_params;
///
/// assert_eq!(join_params(&["server.example"]), "server.example");
/// assert_eq!(join_params(&["#chan", "hello world"]), "#chan :hello world");
/// assert_eq!(join_params::<&str>(&[]), "");
/// ```
pub fn join_params<S: AsRef<str>>(params: &[S]) -> String {
    let mut out = String::new();
    let last = params.len().saturating_sub(1);
    for (i, param) in params.iter().enumerate() {
        let param = param.as_ref();
        if i > 0 {
            out.push(' ');
        }
        if i == last && needs_colon_prefix(param) {
            out.push(':');
        }
        out.push_str(param);
    }
    out
}
