//! Blocking HTTP source (feature `http`).

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::{self, HeaderMap, HeaderValue};
use sw_core::Timestamp;
use tracing::debug;

use crate::payload::{self, FALLBACK_URL, PRIMARY_URL};
use crate::{FeedKind, FeedResult, PositionSource, SatellitePosition};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the client shared by all HTTP sources.
pub fn build_client() -> FeedResult<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::USER_AGENT,
        HeaderValue::from_static(concat!("satwatch / ", env!("CARGO_PKG_VERSION"))),
    );
    Ok(Client::builder()
        .default_headers(headers)
        .timeout(DEFAULT_TIMEOUT)
        .build()?)
}

/// Fetches one of the public feeds over HTTP and decodes it.
pub struct HttpSource {
    client: Client,
    kind:   FeedKind,
    url:    String,
}

impl HttpSource {
    pub fn new(client: Client, kind: FeedKind, url: impl Into<String>) -> Self {
        Self { client, kind, url: url.into() }
    }

    /// The primary feed at its public URL.
    pub fn primary(client: Client) -> Self {
        Self::new(client, FeedKind::Primary, PRIMARY_URL)
    }

    /// The fallback feed at its public URL.
    pub fn fallback(client: Client) -> Self {
        Self::new(client, FeedKind::Fallback, FALLBACK_URL)
    }
}

impl PositionSource for HttpSource {
    fn name(&self) -> &str {
        self.kind.as_str()
    }

    fn fetch(&mut self, _now: Timestamp) -> FeedResult<SatellitePosition> {
        debug!(url = %self.url, "GET");
        let body = self
            .client
            .get(&self.url)
            .send()
            .and_then(Response::error_for_status)?
            .text()?;
        payload::parse(self.kind, &body)
    }
}
