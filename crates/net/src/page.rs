use memchr::{memchr, memmem};
use url::Url;

const MAX_LINKS: usize = 200;

pub fn is_html(content_type: Option<&str>) -> bool {
    content_type
        .map(|ct| ct.to_ascii_lowercase().contains("html"))
        .unwrap_or(false)
}

/// Text of the first `<title>` element, whitespace collapsed.
pub fn extract_title(html: &str) -> Option<String> {
    // ASCII lowercasing keeps byte offsets aligned with `html`
    let lower = html.to_ascii_lowercase();
    let bytes = lower.as_bytes();

    let start = memmem::find(bytes, b"<title")?;
    let open_end = start + memchr(b'>', &bytes[start..])? + 1;
    let close = open_end + memmem::find(&bytes[open_end..], b"</title")?;

    let title = html[open_end..close]
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    (!title.is_empty()).then_some(title)
}

/// `href` targets resolved against `base`, deduplicated in document order.
/// Fragment-only and `javascript:` links are skipped.
pub fn extract_links(html: &str, base: &str) -> Vec<String> {
    let Ok(base) = Url::parse(base) else {
        return Vec::new();
    };
    let lower = html.to_ascii_lowercase();
    let bytes = lower.as_bytes();

    let mut links: Vec<String> = Vec::new();
    for pos in memmem::find_iter(bytes, b"href") {
        let Some(raw) = attribute_value(html, pos + 4) else {
            continue;
        };
        let raw = raw.trim();
        if raw.is_empty() || raw.starts_with('#') {
            continue;
        }
        if raw
            .get(..11)
            .is_some_and(|scheme| scheme.eq_ignore_ascii_case("javascript:"))
        {
            continue;
        }
        if let Ok(abs) = base.join(raw) {
            let abs = abs.to_string();
            if !links.contains(&abs) {
                links.push(abs);
                if links.len() == MAX_LINKS {
                    break;
                }
            }
        }
    }
    links
}

/// Value following `=` at `offset`, quoted or bare.
fn attribute_value(html: &str, offset: usize) -> Option<&str> {
    let rest = html.get(offset..)?.trim_start();
    let rest = rest.strip_prefix('=')?.trim_start();

    match rest.chars().next()? {
        quote @ ('"' | '\'') => {
            let inner = &rest[1..];
            let end = inner.find(quote)?;
            Some(&inner[..end])
        }
        _ => {
            let end = rest
                .find(|c: char| c.is_whitespace() || c == '>')
                .unwrap_or(rest.len());
            Some(&rest[..end])
        }
    }
}
