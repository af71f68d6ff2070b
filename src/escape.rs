//! Escaping and encoding routines for everything interpolated into the page.
//!
//! - [`escape_html`] - entity escaping for text and attribute values
//! - [`encode_uri_component`] - percent-encoding with the `encodeURIComponent` set
//! - [`encode_asset_path`] - per-segment encoding of relative image paths
//! - [`js_single_quoted`] - single-quoted JS literal for inline handler arguments
//! - [`json_for_script`] - JSON safe to place inside a `<script>` element
//!
//! Handler arguments are escaped twice: first as a JS literal, then the whole
//! handler is entity-escaped as an attribute value by the markup serializer.

use std::borrow::Cow;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

use crate::Result;

/// Characters left intact by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const HTML_RESERVED: [char; 5] = ['&', '<', '>', '"', '\''];

#[inline]
fn html_entity(c: char) -> Option<&'static str> {
    match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        _ => None,
    }
}

/// Escapes the five reserved markup characters.
///
/// Borrows the input when nothing needs escaping.
pub fn escape_html(s: &str) -> Cow<'_, str> {
    if !s.contains(HTML_RESERVED) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match html_entity(c) {
            Some(entity) => out.push_str(entity),
            None => out.push(c),
        }
    }
    Cow::Owned(out)
}

pub fn encode_uri_component(s: &str) -> String {
    utf8_percent_encode(s, URI_COMPONENT).to_string()
}

/// Encodes each `/`-separated segment and re-joins them.
pub fn encode_asset_path(relative_path: &str) -> String {
    relative_path
        .split('/')
        .map(encode_uri_component)
        .collect::<Vec<_>>()
        .join("/")
}

/// Renders `s` as a single-quoted JS string literal, quotes included.
pub fn js_single_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Serializes `value` to JSON that cannot terminate the enclosing script element.
pub fn json_for_script<T: Serialize>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value)?;
    Ok(json
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}
