//! Blocking HTTP GET through libcurl.

use std::str;

use super::parse::{parse_headers, ResponseMeta};
use super::FetchOptions;
use crate::error::LoadError;

/// A fully received response: effective URL, decoding-relevant headers, raw body.
#[derive(Debug)]
pub(crate) struct HttpResponse {
    pub url: String,
    pub meta: ResponseMeta,
    pub body: Vec<u8>,
}

/// Performs a GET asking for gzip content-encoding. The body is returned as
/// sent on the wire; libcurl does not decompress it.
///
/// Follows redirects. Non-2xx status codes are errors.
pub(crate) fn get(url: &str, opts: &FetchOptions) -> Result<HttpResponse, LoadError> {
    let mut headers: Vec<String> = Vec::new();
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    if let Some(timeout) = opts.connect_timeout {
        easy.connect_timeout(timeout)?;
    }
    if let Some(agent) = &opts.user_agent {
        easy.useragent(agent)?;
    }

    let mut list = curl::easy::List::new();
    list.append("Accept-Encoding: gzip")?;
    easy.http_headers(list)?;

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                headers.push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    tracing::debug!("GET {} -> HTTP {} ({} bytes)", url, code, body.len());
    if !(200..300).contains(&code) {
        return Err(LoadError::Transport(format!(
            "GET {} returned HTTP {}",
            url, code
        )));
    }

    let effective = easy
        .effective_url()?
        .map(str::to_string)
        .unwrap_or_else(|| url.to_string());

    Ok(HttpResponse {
        url: effective,
        meta: parse_headers(&headers),
        body,
    })
}
