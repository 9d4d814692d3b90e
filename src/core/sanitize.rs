// src/core/sanitize.rs

pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Cut to `max` chars, appending "..." when something was dropped.
pub fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max).collect();
    out.push_str("...");
    out
}

/// Pull `src="…"` out of an embed snippet; a bare URL passes through.
/// Anything else yields an empty string.
pub fn extract_embed_src(html_or_url: &str) -> String {
    let text = html_or_url.trim();
    if text.is_empty() {
        return s!();
    }
    let lc = text.to_ascii_lowercase();
    let mut from = 0usize;
    while let Some(rel) = lc[from..].find("src") {
        let mut i = from + rel + 3;
        from = i;
        let b = lc.as_bytes();
        while i < b.len() && b[i].is_ascii_whitespace() { i += 1; }
        if b.get(i) != Some(&b'=') { continue; }
        i += 1;
        while i < b.len() && b[i].is_ascii_whitespace() { i += 1; }
        let quote = match b.get(i) { Some(b'"') => '"', Some(b'\'') => '\'', _ => continue };
        if let Some(v) = text[i + 1..].split(quote).next() {
            return v.trim().to_string();
        }
    }
    if lc.starts_with("http://") || lc.starts_with("https://") || lc.starts_with("//") {
        return text.to_string();
    }
    s!()
}

/// First run of 2..=4 ASCII digits standing alone as a word.
pub fn first_rating_like_number(s: &str) -> Option<u32> {
    let b = s.as_bytes();
    let mut i = 0usize;
    while i < b.len() {
        if b[i].is_ascii_digit() {
            let start = i;
            while i < b.len() && b[i].is_ascii_digit() { i += 1; }
            let len = i - start;
            let left_ok = start == 0 || !is_word(b[start - 1]);
            let right_ok = i == b.len() || !is_word(b[i]);
            if (2..=4).contains(&len) && left_ok && right_ok {
                return s[start..i].parse().ok();
            }
        } else {
            i += 1;
        }
    }
    None
}

fn is_word(c: u8) -> bool { c.is_ascii_alphanumeric() || c == b'_' }
