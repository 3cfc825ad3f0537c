//! Transport: open a normalized target as a decoded text stream.
//!
//! Local paths and stdin are read as strict UTF-8. HTTP(S) bodies are
//! gunzipped when the server says so, and HTML pages are followed through
//! their asciicast discovery link.

mod html;
mod http;
mod parse;

pub use html::find_asciicast_link;
pub use parse::ResponseMeta;

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Read};
use std::time::Duration;

use flate2::read::MultiGzDecoder;

use crate::config::CastloadConfig;
use crate::error::{LoadError, LINK_NOT_FOUND};
use crate::locator::Target;

/// Transport knobs. The defaults impose no timeout and no hop limit.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub connect_timeout: Option<Duration>,
    /// Maximum number of HTML pages followed before giving up (None = unbounded).
    pub max_html_hops: Option<u32>,
    pub user_agent: Option<String>,
}

impl FetchOptions {
    pub fn from_config(cfg: &CastloadConfig) -> Self {
        Self {
            connect_timeout: cfg.connect_timeout_secs.map(Duration::from_secs),
            max_html_hops: cfg.max_html_hops,
            user_agent: cfg.user_agent.clone(),
        }
    }
}

/// An open, decoded text stream over one recording source.
///
/// Reading yields UTF-8 text; `read_line`/`read_to_string` fail with
/// `InvalidData` on invalid sequences. Dropping the stream closes the
/// underlying file or releases stdin.
pub struct SourceStream {
    origin: String,
    reader: Box<dyn BufRead>,
}

impl SourceStream {
    pub fn new<R: BufRead + 'static>(origin: impl Into<String>, reader: R) -> Self {
        Self {
            origin: origin.into(),
            reader: Box::new(reader),
        }
    }

    /// Builds a stream over in-memory text.
    pub fn from_text(origin: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(origin, Cursor::new(text.into().into_bytes()))
    }

    /// Where the content came from (path, final URL or `<stdin>`).
    pub fn origin(&self) -> &str {
        &self.origin
    }
}

impl fmt::Debug for SourceStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceStream")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

impl Read for SourceStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl BufRead for SourceStream {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.reader.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.reader.consume(amt)
    }
}

/// Opens `target` with default options.
pub fn fetch(target: &str) -> Result<SourceStream, LoadError> {
    fetch_with(target, &FetchOptions::default())
}

/// Opens `target` (already normalized by the locator resolver).
///
/// `-` is stdin, `http:`/`https:` go over the network, anything else is a
/// local path. HTML responses are replaced by whatever their discovery link
/// points to; the page body is dropped before the next request.
pub fn fetch_with(target: &str, opts: &FetchOptions) -> Result<SourceStream, LoadError> {
    fetch_target(Target::classify(target), opts)
}

/// Opens an already classified target. See [`fetch_with`].
pub fn fetch_target(mut target: Target, opts: &FetchOptions) -> Result<SourceStream, LoadError> {
    let mut hops = 0u32;

    loop {
        match target {
            Target::Stdin => {
                tracing::debug!("reading recording from stdin");
                return Ok(SourceStream::new("<stdin>", io::stdin().lock()));
            }
            Target::Path(path) => {
                tracing::debug!("opening {}", path.display());
                let file = File::open(&path)
                    .map_err(|e| LoadError::Transport(format!("{}: {}", path.display(), e)))?;
                return Ok(SourceStream::new(
                    path.display().to_string(),
                    BufReader::new(file),
                ));
            }
            Target::Url(url) => {
                let response = http::get(&url, opts)?;
                let body: Box<dyn Read> = if response.meta.is_gzip() {
                    Box::new(MultiGzDecoder::new(Cursor::new(response.body)))
                } else {
                    Box::new(Cursor::new(response.body))
                };

                if !response.meta.is_html() {
                    return Ok(SourceStream::new(response.url, BufReader::new(body)));
                }

                let href = discovery_link(body)?;
                let next = join_href(&response.url, &href);
                hops += 1;
                if let Some(max) = opts.max_html_hops {
                    if hops > max {
                        return Err(LoadError::Transport(format!(
                            "gave up after following {} HTML discovery links",
                            max
                        )));
                    }
                }
                tracing::info!("{} is an HTML page, following {}", response.url, next);
                target = Target::classify(&next);
            }
        }
    }
}

/// Reads an HTML body (invalid UTF-8 replaced) and extracts the discovery link.
fn discovery_link(mut body: Box<dyn Read>) -> Result<String, LoadError> {
    let mut raw = Vec::new();
    body.read_to_end(&mut raw)?;
    let page = String::from_utf8_lossy(&raw);
    find_asciicast_link(&page).ok_or_else(|| LoadError::Transport(LINK_NOT_FOUND.to_string()))
}

/// Resolves `href` relative to the page it was found on. Absolute hrefs,
/// and anything that does not form a valid URL, are returned unchanged.
fn join_href(page_url: &str, href: &str) -> String {
    if url::Url::parse(href).is_ok() {
        return href.to_string();
    }
    url::Url::parse(page_url)
        .and_then(|base| base.join(href))
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}
