//! HTML escaping of user-entered text.

use crate::collaborators::TextSanitizer;

/// Sanitizer escaping HTML special characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlSanitizer;

impl TextSanitizer for HtmlSanitizer {
    fn sanitize(&self, text: &str) -> String {
        html_escape(text)
    }
}

/// Escape HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
