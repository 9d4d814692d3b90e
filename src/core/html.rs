// src/core/html.rs
//
// Tolerant, case-insensitive tag scanning. No DOM: callers slice the
// document into blocks (`<tr …>…</tr>`) and pick attributes off openers.

use super::sanitize::{normalize_entities, normalize_ws};

pub fn to_lower(s: &str) -> String {
    // ASCII-only lowering keeps byte offsets aligned with the source.
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// Next `<tag …>…</tag>` block at or after `from`, as byte offsets into `s`.
/// `tag` is the bare name (`"tr"`, `"a"`); `<tbody` does not match `"tr"`-style prefixes.
pub fn next_block(s: &str, lc: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    let open = join!("<", tag);
    let close = join!("</", tag);
    let mut at = from;
    loop {
        let start = lc.get(at..)?.find(&open)? + at;
        let after = start + open.len();
        let boundary = lc.as_bytes().get(after).copied();
        if !matches!(boundary, Some(b' ' | b'>' | b'\t' | b'\n' | b'\r' | b'/')) {
            at = after;
            continue;
        }
        let open_end = s[start..].find('>')? + start + 1;
        let end_rel = lc[open_end..].find(&close)?;
        let close_end = lc[open_end + end_rel..].find('>').map(|p| open_end + end_rel + p + 1)?;
        return Some((start, close_end));
    }
}

/// All `<tag>` blocks in `s`, in document order.
pub fn blocks<'a>(s: &'a str, tag: &str) -> Vec<&'a str> {
    let lc = to_lower(s);
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some((bs, be)) = next_block(s, &lc, tag, pos) {
        out.push(&s[bs..be]);
        pos = be;
    }
    out
}

/// Element whose opener starts at byte `start`, closed by its own matching
/// close tag, so nested children of the same name stay inside.
pub fn element_at(lc: &str, start: usize) -> Option<(usize, usize)> {
    let rest = lc.get(start + 1..)?;
    let name_len = rest.find(|c: char| !c.is_ascii_alphanumeric())?;
    if name_len == 0 {
        return None;
    }
    let open = join!("<", &rest[..name_len]);
    let close = join!("</", &rest[..name_len]);

    let mut depth = 0usize;
    let mut at = start;
    loop {
        let next_close = lc[at..].find(&close)? + at;
        match lc[at..].find(&open).map(|p| p + at) {
            Some(o) if o < next_close => {
                let boundary = lc.as_bytes().get(o + open.len()).copied();
                if matches!(boundary, Some(b' ' | b'>' | b'\t' | b'\n' | b'\r' | b'/')) {
                    depth += 1;
                }
                at = o + open.len();
            }
            _ => {
                depth = depth.saturating_sub(1);
                at = next_close + close.len();
                if depth == 0 {
                    let end = lc[at..].find('>')? + at + 1;
                    return Some((start, end));
                }
            }
        }
    }
}

/// Outermost elements of any tag carrying one of `classes`, in document order.
pub fn by_class<'a>(s: &'a str, classes: &[&str]) -> Vec<&'a str> {
    let lc = to_lower(s);
    let mut out = Vec::new();
    let mut at = 0usize;
    while let Some(rel) = lc[at..].find('<') {
        let start = at + rel;
        at = start + 1;
        if matches!(lc.as_bytes().get(at).copied(), Some(b'/' | b'!')) {
            continue;
        }
        let Some(oe) = s[start..].find('>') else { break };
        let open = &s[start..=start + oe];
        if !classes.iter().any(|c| has_class(open, c)) {
            continue;
        }
        if let Some((bs, be)) = element_at(&lc, start) {
            out.push(&s[bs..be]);
            at = be;
        }
    }
    out
}

/// The opening tag of a block, `<…>` included.
pub fn opener(block: &str) -> &str {
    match block.find('>') {
        Some(e) => &block[..=e],
        None => block,
    }
}

pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return block[oe + 1..cs].to_string();
            }
        }
    }
    s!()
}

/// Attribute value from an opening tag. Accepts "double", 'single' and bare values.
pub fn attr(open_tag: &str, name: &str) -> Option<String> {
    let lc = to_lower(open_tag);
    let needle = to_lower(name);
    let bytes = lc.as_bytes();
    let mut from = 0usize;

    while let Some(rel) = lc[from..].find(&needle) {
        let at = from + rel;
        from = at + needle.len();

        // must be a whole attribute name
        let before_ok = at == 0 || bytes[at - 1].is_ascii_whitespace();
        if !before_ok { continue; }

        let mut i = at + needle.len();
        while i < bytes.len() && bytes[i].is_ascii_whitespace() { i += 1; }
        if bytes.get(i) != Some(&b'=') { continue; }
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() { i += 1; }

        let value = match bytes.get(i) {
            Some(b'"') => open_tag[i + 1..].split('"').next(),
            Some(b'\'') => open_tag[i + 1..].split('\'').next(),
            Some(_) => open_tag[i..]
                .split(|c: char| c.is_whitespace() || c == '>')
                .next(),
            None => None,
        };
        return value.map(|v| normalize_entities(v));
    }
    None
}

pub fn has_class(open_tag: &str, class: &str) -> bool {
    attr(open_tag, "class")
        .map(|v| v.split_whitespace().any(|c| c.eq_ignore_ascii_case(class)))
        .unwrap_or(false)
}

/// Visible text: tags dropped, entities decoded, whitespace collapsed.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => { in_tag = true; out.push(' '); }
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&normalize_entities(&out))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Anchor {
    pub href: String,
    pub text: String,
    pub open_tag: String,
}

/// Every `<a href=…>` in `s` with its visible text.
pub fn anchors(s: &str) -> Vec<Anchor> {
    blocks(s, "a")
        .into_iter()
        .filter_map(|b| {
            let open = opener(b);
            let href = attr(open, "href")?;
            Some(Anchor {
                href,
                text: strip_tags(inner_after_open_tag(b)),
                open_tag: open.to_string(),
            })
        })
        .collect()
}

/// Absolute URL for a possibly site-relative href.
pub fn absolutize(base: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        s!(href)
    } else if let Some(rest) = href.strip_prefix("//") {
        join!("https://", rest)
    } else if href.starts_with('/') {
        join!(base.trim_end_matches('/'), href)
    } else {
        join!(base.trim_end_matches('/'), "/", href)
    }
}
