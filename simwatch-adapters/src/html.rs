//! Element-by-id text extraction.
//!
//! The status page marks every field with an element id (`l1_gsm_sim`,
//! `l1_module_status`, ...). [`ElementIdExtractor`] finds that element and
//! returns its visible text: nested tags stripped, common entities decoded,
//! surrounding whitespace trimmed.
//!
//! Scanning is tolerant of attribute order, quoting style and letter case.
//! It does not build a DOM; nested elements with the same tag name as the
//! target are balanced by counting open and close tags.

use std::sync::OnceLock;

use regex::Regex;

/// Looks up the text of a named field in raw page content.
///
/// Returns `None` when the field is not present. Implementations must not
/// fail on malformed markup; a field that cannot be found is simply missing.
pub trait FieldExtractor: Send + Sync {
    fn extract(&self, page: &str, id: &str) -> Option<String>;
}

/// Extracts the text content of the element carrying a given `id`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElementIdExtractor;

impl FieldExtractor for ElementIdExtractor {
    fn extract(&self, page: &str, id: &str) -> Option<String> {
        let open = open_tag_regex(id)?;
        let found = open.captures(page)?;
        let tag = found.name("tag")?.as_str().to_ascii_lowercase();
        let body_start = found.get(0)?.end();

        let body = &page[body_start..];
        let body_end = closing_tag_offset(body, &tag).unwrap_or(body.len());

        Some(visible_text(&body[..body_end]))
    }
}

fn open_tag_regex(id: &str) -> Option<Regex> {
    let pattern = format!(
        r#"(?is)<(?P<tag>[a-z][a-z0-9]*)\b[^>]*?\sid\s*=\s*(?:"{id}"|'{id}'|{id}\b)[^>]*>"#,
        id = regex::escape(id)
    );
    Regex::new(&pattern).ok()
}

/// Offset of the `</tag>` that closes the element whose body starts at
/// `body[0]`, skipping nested elements of the same name.
fn closing_tag_offset(body: &str, tag: &str) -> Option<usize> {
    let pattern = format!(r"(?i)<(?P<close>/)?{}\b[^>]*>", regex::escape(tag));
    let tags = Regex::new(&pattern).ok()?;

    let mut depth = 0usize;
    for m in tags.captures_iter(body) {
        if m.name("close").is_some() {
            if depth == 0 {
                return m.get(0).map(|whole| whole.start());
            }
            depth -= 1;
        } else if !m.get(0)?.as_str().ends_with("/>") {
            depth += 1;
        }
    }
    None
}

fn visible_text(fragment: &str) -> String {
    static TAGS: OnceLock<Regex> = OnceLock::new();
    let tags = TAGS.get_or_init(|| Regex::new(r"(?s)<[^>]*>").expect("static regex"));

    decode_entities(&tags.replace_all(fragment, ""))
        .trim()
        .to_string()
}

fn decode_entities(text: &str) -> String {
    static NUMERIC: OnceLock<Regex> = OnceLock::new();
    let numeric = NUMERIC.get_or_init(|| {
        Regex::new(r"&#(?:[xX](?P<hex>[0-9a-fA-F]{1,6})|(?P<dec>[0-9]{1,7}));").expect("static regex")
    });

    let text = numeric.replace_all(text, |caps: &regex::Captures<'_>| {
        let code = match (caps.name("hex"), caps.name("dec")) {
            (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
            (_, Some(dec)) => dec.as_str().parse().ok(),
            _ => None,
        };
        code.and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    });

    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
