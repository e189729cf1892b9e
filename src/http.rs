//! # Remote Template Fetching
//!
//! This module retrieves raw template files over HTTPS. It is built around a
//! small trait so that the transport can be swapped out:
//!
//! - **`HttpTransport`**: performs a single GET and reports the status, the
//!   `Location` header and the body. It never follows redirects itself.
//!
//! - **`RemoteFetcher`**: drives a transport, following 301/302/307/308
//!   redirects up to a fixed number of hops and turning non-success
//!   responses into errors.
//!
//! In the application the transport is `ReqwestTransport`, a blocking
//! `reqwest` client with redirects disabled and a request timeout. Tests
//! inject scripted transports to simulate redirect chains and failures
//! without touching the network.

use std::time::Duration;

use log::debug;
use reqwest::header::{ACCEPT, LOCATION};
use url::Url;

use crate::error::{Error, Result};

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("agent-managed-files/", env!("CARGO_PKG_VERSION"));

/// Maximum number of body characters kept in an HTTP status error.
pub const ERROR_BODY_LIMIT: usize = 180;

/// The parts of a response the fetcher needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Raw `Location` header, if present.
    pub location: Option<String>,
    pub body: String,
}

/// Trait for single HTTP GET requests - allows mocking in tests
pub trait HttpTransport {
    /// Perform one GET request without following redirects.
    fn get(&self, url: &Url) -> Result<HttpResponse>;
}

/// The default transport, backed by a blocking `reqwest` client.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Build a client with redirects disabled and the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Network {
                url: crate::defaults::RAW_CONTENT_BASE.to_string(),
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &Url) -> Result<HttpResponse> {
        let network_error = |e: reqwest::Error| Error::Network {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, "text/plain")
            .send()
            .map_err(network_error)?;

        let status = response.status().as_u16();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().map_err(network_error)?;
        // Error bodies are only shown truncated, so decode those lossily.
        let body = if (200..300).contains(&status) {
            String::from_utf8(bytes.to_vec()).map_err(|_| Error::NotUtf8 {
                path: url.to_string(),
            })?
        } else {
            String::from_utf8_lossy(&bytes).into_owned()
        };

        Ok(HttpResponse {
            status,
            location,
            body,
        })
    }
}

/// Fetches text bodies, following redirects.
pub struct RemoteFetcher {
    transport: Box<dyn HttpTransport>,
    max_redirects: usize,
}

impl RemoteFetcher {
    /// Creates a fetcher using the default `reqwest` transport.
    pub fn new(timeout: Duration, max_redirects: usize) -> Result<Self> {
        Ok(Self::with_transport(
            Box::new(ReqwestTransport::new(timeout)?),
            max_redirects,
        ))
    }

    /// Creates a fetcher with a custom transport.
    pub fn with_transport(transport: Box<dyn HttpTransport>, max_redirects: usize) -> Self {
        Self {
            transport,
            max_redirects,
        }
    }

    /// GET `url` and return the body of the final response.
    ///
    /// Redirects are resolved against the URL that produced them, so both
    /// absolute and relative `Location` values work. A redirect without a
    /// `Location` header, more than `max_redirects` hops, or a final status
    /// outside 2xx is an error.
    pub fn fetch_text(&self, url: &Url) -> Result<String> {
        let mut current = url.clone();
        let mut hops = 0;

        loop {
            debug!("GET {}", current);
            let response = self.transport.get(&current)?;

            match response.status {
                301 | 302 | 307 | 308 => {
                    let Some(location) = response.location else {
                        return Err(Error::RedirectWithoutLocation {
                            url: current.to_string(),
                        });
                    };
                    if hops >= self.max_redirects {
                        return Err(Error::TooManyRedirects {
                            url: url.to_string(),
                            max: self.max_redirects,
                        });
                    }
                    hops += 1;
                    current = current.join(&location)?;
                    debug!("HTTP {} redirect to {}", response.status, current);
                }
                200..=299 => return Ok(response.body),
                status => {
                    return Err(Error::HttpStatus {
                        url: current.to_string(),
                        status,
                        body: response.body.chars().take(ERROR_BODY_LIMIT).collect(),
                    })
                }
            }
        }
    }
}
