use std::borrow::Cow;

/// Text content between tags.
pub fn escape_html(raw: &str) -> Cow<'_, str> {
    html_escape::encode_text(raw)
}

/// Value inside a double-quoted attribute.
pub fn escape_attr(raw: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(raw)
}

/// Percent-encode a query string value.
pub fn encode_query(raw: &str) -> Cow<'_, str> {
    urlencoding::encode(raw)
}
