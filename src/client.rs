//! HTTP lookup client.
//!
//! One `reqwest::Client` is built per run with the configured timeout,
//! proxy, and TLS settings. `lookup` issues at most one GET per call and
//! never fails across the row boundary: every problem comes back as a
//! `Lookup::Failed` variant.

use reqwest::Client;
use tracing::debug;

use crate::cep;
use crate::config::HttpConfig;
use crate::error::{Error, Result};
use crate::provider::{Failure, Lookup, Provider};

pub struct LookupClient {
    http: Client,
    provider: Provider,
    base_url: String,
}

impl LookupClient {
    /// Build a client for `provider`. `base_url` overrides the provider's
    /// public host (used to point tests at a mock server).
    pub fn new(
        provider: Provider,
        base_url: Option<String>,
        config: &HttpConfig,
    ) -> Result<Self> {
        let mut builder = Client::builder().timeout(config.timeout);

        if let Some(url) = &config.proxy_url {
            let proxy = reqwest::Proxy::all(url).map_err(|e| Error::InvalidProxy {
                url: url.clone(),
                details: e.to_string(),
            })?;
            builder = builder.proxy(proxy);
        }

        if !config.verify_tls {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder.build()?;
        let base_url = base_url
            .unwrap_or_else(|| provider.default_base_url().to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            http,
            provider,
            base_url,
        })
    }

    /// Look up one CEP value as it appears in the spreadsheet.
    ///
    /// Values that do not normalize to 8 digits short-circuit to
    /// `Failed(InvalidFormat)` without touching the network.
    pub async fn lookup(&self, raw: &str) -> Lookup {
        let Some(key) = cep::normalize(raw) else {
            return Lookup::Failed(Failure::InvalidFormat);
        };

        let url = format!("{}{}", self.base_url, self.provider.lookup_path(&key));
        debug!(%url, "lookup request");

        let response = match self.http.get(&url).send().await {
            Ok(r) => r,
            Err(e) => return Lookup::Failed(classify(e)),
        };

        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(b) => b,
            Err(e) => return Lookup::Failed(classify(e)),
        };

        debug!(status, bytes = body.len(), "lookup response");
        self.provider.interpret(status, &body)
    }
}

fn classify(e: reqwest::Error) -> Failure {
    if e.is_timeout() || e.is_connect() || e.is_request() || e.is_body() {
        Failure::Transport(e.to_string())
    } else {
        Failure::Unexpected(e.to_string())
    }
}
