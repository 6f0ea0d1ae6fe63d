use std::borrow::Cow;

/// Prepare a recorded string for splicing between quotes in generated JS.
///
/// With `escape` off the text goes in untouched, so a selector containing a
/// `'` still breaks the emitted statement. With it on, the characters that
/// can terminate a single-quoted string or a template literal are escaped.
pub fn js_string(raw: &str, escape: bool) -> Cow<'_, str> {
    if !escape || !raw.contains(['\\', '\'', '`', '$', '\n', '\r']) {
        return Cow::Borrowed(raw);
    }

    let mut out = String::with_capacity(raw.len() + 8);
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '`' => out.push_str("\\`"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '$' if chars.peek() == Some(&'{') => out.push_str("\\$"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}
