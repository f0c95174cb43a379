//! Identifier and literal helpers shared by the generators

/// Reduce `raw` to `[A-Za-z0-9_]`, never starting with a digit
///
/// Returns `fallback` when nothing is left.
pub(crate) fn sanitize_identifier(raw: &str, fallback: &str) -> String {
    let mut result: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if result.is_empty() {
        return fallback.to_string();
    }
    if result.starts_with(|c: char| c.is_ascii_digit()) {
        result.insert(0, '_');
    }
    result
}

/// Wrap `value` in double quotes, escaping backslashes and quotes
pub(crate) fn quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}
