use std::io::Read;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use bus::PageSummary;
use core_types::ErrorKind;
use log::debug;
use thiserror::Error;
use url::Url;

mod page;

pub use page::{extract_links, extract_title, is_html};

#[derive(Clone, Debug)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub user_agent: String,
    pub max_body_bytes: u64,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            user_agent: "webview-shell/0.1".to_string(),
            max_body_bytes: 512 * 1024,
        }
    }
}

#[derive(Debug, Error)]
pub enum NetError {
    #[error("could not resolve host for {url}: {detail}")]
    HostLookup { url: String, detail: String },
    #[error("connection to {url} failed: {detail}")]
    Connect { url: String, detail: String },
    #[error("request to {url} timed out")]
    Timeout { url: String },
    #[error("secure connection to {url} failed: {detail}")]
    Tls { url: String, detail: String },
    #[error("reading {url} failed: {source}")]
    Io {
        url: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{url} cannot be fetched: {detail}")]
    Unsupported { url: String, detail: String },
    #[error("request cancelled")]
    Cancelled,
}

impl NetError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            NetError::HostLookup { .. } => ErrorKind::HostLookup,
            NetError::Connect { .. } => ErrorKind::Connect,
            NetError::Timeout { .. } => ErrorKind::Timeout,
            NetError::Tls { .. } => ErrorKind::Tls,
            NetError::Io { .. } => ErrorKind::Io,
            NetError::Unsupported { .. } | NetError::Cancelled => ErrorKind::Unknown,
        }
    }

    fn from_transport(url: &str, transport: ureq::Transport) -> Self {
        let url = url.to_string();
        let detail = transport.to_string();
        match transport.kind() {
            ureq::ErrorKind::Dns => NetError::HostLookup { url, detail },
            ureq::ErrorKind::ConnectionFailed if is_tls_failure(&detail) => {
                NetError::Tls { url, detail }
            }
            ureq::ErrorKind::ConnectionFailed | ureq::ErrorKind::ProxyConnect => {
                NetError::Connect { url, detail }
            }
            ureq::ErrorKind::Io if is_timeout(&transport) => NetError::Timeout { url },
            ureq::ErrorKind::Io => NetError::Io {
                url,
                source: std::io::Error::other(detail),
            },
            _ => NetError::Unsupported { url, detail },
        }
    }
}

fn is_timeout(transport: &ureq::Transport) -> bool {
    use std::error::Error as _;
    transport
        .source()
        .and_then(|err| err.downcast_ref::<std::io::Error>())
        .is_some_and(|err| {
            matches!(
                err.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
            )
        })
}

fn is_tls_failure(detail: &str) -> bool {
    let detail = detail.to_ascii_lowercase();
    detail.contains("tls") || detail.contains("certificate")
}

/// What one request produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fetched {
    Page(PageSummary),
    /// 3xx with a `Location`, resolved against the requested address.
    /// Redirects are never followed here; the caller decides.
    Redirect { location: String },
}

/// Fetch `url` and summarize it. HTTP error statuses still produce a page;
/// only transport failures are errors. `cancel` is checked between the
/// request and the body read.
pub fn fetch_page(
    url: &str,
    cancel: &AtomicBool,
    options: &FetchOptions,
) -> Result<Fetched, NetError> {
    let start = Instant::now();
    let agent = ureq::AgentBuilder::new()
        .timeout(options.timeout)
        .user_agent(&options.user_agent)
        .redirects(0)
        .build();

    let response = match agent.get(url).call() {
        Ok(response) => response,
        Err(ureq::Error::Status(_, response)) => response,
        Err(ureq::Error::Transport(transport)) => {
            return Err(NetError::from_transport(url, transport));
        }
    };
    if cancel.load(Ordering::Acquire) {
        return Err(NetError::Cancelled);
    }

    let status = response.status();
    if (300..400).contains(&status) {
        if let Some(location) = response.header("location") {
            let location = resolve_location(url, location);
            debug!("{url} redirects ({status}) to {location}");
            return Ok(Fetched::Redirect { location });
        }
    }

    let final_url = response.get_url().to_string();
    let content_type = response.header("content-type").map(|s| s.to_string());

    let mut body = Vec::new();
    response
        .into_reader()
        .take(options.max_body_bytes)
        .read_to_end(&mut body)
        .map_err(|source| NetError::Io {
            url: url.to_string(),
            source,
        })?;
    if cancel.load(Ordering::Acquire) {
        return Err(NetError::Cancelled);
    }

    let (title, links) = if is_html(content_type.as_deref()) {
        let text = String::from_utf8_lossy(&body);
        (extract_title(&text), extract_links(&text, &final_url))
    } else {
        (None, Vec::new())
    };

    debug!(
        "fetched {final_url}: {status} {} bytes, {} links in {} ms",
        body.len(),
        links.len(),
        start.elapsed().as_millis()
    );

    Ok(Fetched::Page(PageSummary {
        final_url,
        status,
        content_type,
        title,
        links,
    }))
}

/// Relative locations join the requested address; anything unparseable is
/// passed on as sent.
fn resolve_location(url: &str, location: &str) -> String {
    let location = location.trim();
    Url::parse(url)
        .and_then(|base| base.join(location))
        .map(|resolved| resolved.to_string())
        .unwrap_or_else(|_| location.to_string())
}
