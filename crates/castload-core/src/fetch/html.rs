//! Discovery-link extraction from HTML pages.
//!
//! Looks for `<link rel="alternate" type="application/asciicast+json" href="...">`.
//! This is a tolerant start-tag scanner, not an HTML parser: comments are
//! skipped, `<script>`/`<style>` contents are opaque, attribute names are
//! case-insensitive and values may be double-quoted, single-quoted or bare.

const LINK_REL: &str = "alternate";
const LINK_TYPE: &str = "application/asciicast+json";

/// Returns the `href` of the last matching discovery link, if any.
pub fn find_asciicast_link(html: &str) -> Option<String> {
    let mut found = None;
    let mut rest = html;

    while let Some(lt) = rest.find('<') {
        rest = &rest[lt + 1..];

        if let Some(after) = rest.strip_prefix("!--") {
            rest = match after.find("-->") {
                Some(end) => &after[end + 3..],
                None => "",
            };
            continue;
        }

        let name_len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
            .unwrap_or(rest.len());
        if name_len == 0 {
            continue;
        }
        let name = &rest[..name_len];
        let (attrs, consumed) = parse_attributes(&rest[name_len..]);
        rest = &rest[name_len + consumed..];

        if name.eq_ignore_ascii_case("link") {
            let rel = attr(&attrs, "rel");
            let ty = attr(&attrs, "type");
            if rel == Some(LINK_REL) && ty == Some(LINK_TYPE) {
                if let Some(href) = attr(&attrs, "href") {
                    found = Some(href.to_string());
                }
            }
        } else if name.eq_ignore_ascii_case("script") || name.eq_ignore_ascii_case("style") {
            rest = skip_raw_text(rest, name);
        }
    }

    found
}

fn attr<'a>(attrs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

/// Parses attributes up to the closing `>` of a start tag.
/// Returns the attributes (names lowercased, values unescaped) and the number
/// of bytes consumed including the `>`.
fn parse_attributes(input: &str) -> (Vec<(String, String)>, usize) {
    let bytes = input.as_bytes();
    let mut attrs = Vec::new();
    let mut i = 0;

    loop {
        while i < bytes.len() && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
            i += 1;
        }
        if i >= bytes.len() {
            return (attrs, i);
        }
        if bytes[i] == b'>' {
            return (attrs, i + 1);
        }

        let start = i;
        while i < bytes.len()
            && !bytes[i].is_ascii_whitespace()
            && !matches!(bytes[i], b'=' | b'>' | b'/')
        {
            i += 1;
        }
        let name = input[start..i].to_ascii_lowercase();

        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() || bytes[i] != b'=' {
            attrs.push((name, String::new()));
            continue;
        }
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        let value = if i < bytes.len() && (bytes[i] == b'"' || bytes[i] == b'\'') {
            let quote = bytes[i];
            let begin = i + 1;
            let end = input[begin..]
                .bytes()
                .position(|b| b == quote)
                .map(|p| begin + p)
                .unwrap_or(bytes.len());
            i = (end + 1).min(bytes.len());
            &input[begin..end]
        } else {
            let begin = i;
            while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                i += 1;
            }
            &input[begin..i]
        };
        attrs.push((name, unescape(value)));
    }
}

/// Skips past the matching end tag of a raw-text element.
fn skip_raw_text<'a>(input: &'a str, name: &str) -> &'a str {
    let closing = format!("</{}", name.to_ascii_lowercase());
    let lower = input.to_ascii_lowercase();
    match lower.find(&closing) {
        Some(pos) => &input[pos..],
        None => "",
    }
}

/// Decodes the handful of character references that show up in URLs.
fn unescape(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let semi = match rest.find(';') {
            Some(s) if s <= 10 => s,
            _ => {
                out.push('&');
                rest = &rest[1..];
                continue;
            }
        };
        let decoded = match &rest[1..semi] {
            "amp" => Some('&'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            "lt" => Some('<'),
            "gt" => Some('>'),
            ent => ent
                .strip_prefix("#x")
                .or_else(|| ent.strip_prefix("#X"))
                .and_then(|h| u32::from_str_radix(h, 16).ok())
                .or_else(|| ent.strip_prefix('#').and_then(|d| d.parse().ok()))
                .and_then(char::from_u32),
        };
        match decoded {
            Some(c) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
