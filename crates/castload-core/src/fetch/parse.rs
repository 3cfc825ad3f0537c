//! Parse HTTP response header lines into the fields the fetcher branches on.

/// Response properties that decide how a body is decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseMeta {
    /// `Content-Type` value if present.
    pub content_type: Option<String>,
    /// `Content-Encoding` value if present.
    pub content_encoding: Option<String>,
}

impl ResponseMeta {
    /// True if the body is gzip-compressed.
    pub fn is_gzip(&self) -> bool {
        self.content_encoding
            .as_deref()
            .map(|v| v.eq_ignore_ascii_case("gzip"))
            .unwrap_or(false)
    }

    /// True if the body is an HTML page rather than a recording.
    pub fn is_html(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|v| {
                v.get(..9)
                    .map(|p| p.eq_ignore_ascii_case("text/html"))
                    .unwrap_or(false)
            })
            .unwrap_or(false)
    }
}

/// Parse collected header lines into ResponseMeta.
///
/// With redirects libcurl reports the headers of every hop; a status line
/// (`HTTP/...`) starts a new response, so only the last one is kept.
pub(crate) fn parse_headers(lines: &[String]) -> ResponseMeta {
    let mut meta = ResponseMeta::default();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            meta = ResponseMeta::default();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-type") {
                meta.content_type = Some(value.to_string());
            }
            if name.eq_ignore_ascii_case("content-encoding") {
                meta.content_encoding = Some(value.to_string());
            }
        }
    }

    meta
}
