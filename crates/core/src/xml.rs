//! XML text escaping and document constants shared by the export builders.

/// First line of every exported document.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// MIME type offered for every exported document.
pub const XML_MIME_TYPE: &str = "application/xml";

/// Named entities for the five reserved characters, without the leading `&`.
const NAMED_ENTITIES: [&str; 5] = ["lt;", "gt;", "amp;", "apos;", "quot;"];

/// Escape the five reserved XML characters in free text.
///
/// `<`, `>`, `'` and `"` are always replaced by their named entities. An `&`
/// is replaced by `&amp;` unless it already starts one of the five named
/// entities, so escaping an escaped string leaves it unchanged.
/// The output is lossy for text that already holds those entities: a literal
/// `&lt;` in the input reads back as `<`.
///
/// ```
/// use portal_core::xml::escape;
///
/// assert_eq!(escape("Fish & Chips"), "Fish &amp; Chips");
/// assert_eq!(escape(&escape("a < b")), "a &lt; b");
/// ```
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for (idx, ch) in text.char_indices() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            '&' => {
                let rest = &text[idx + 1..];
                if NAMED_ENTITIES.iter().any(|entity| rest.starts_with(entity)) {
                    out.push('&');
                } else {
                    out.push_str("&amp;");
                }
            }
            other => out.push(other),
        }
    }

    out
}
