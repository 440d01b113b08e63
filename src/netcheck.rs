//! General network reachability probe.
//!
//! Fires a handful of sequential GETs at a public test API. When the
//! lookup providers are unreachable, this tells apart "no internet /
//! firewall" from "provider down".

use std::time::Duration;
use tracing::debug;

use crate::config::HttpConfig;
use crate::error::Result;
use crate::pace::Pacer;

pub const DEFAULT_TARGET: &str = "https://jsonplaceholder.typicode.com";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NetcheckReport {
    pub ok: usize,
    pub failed: usize,
}

pub async fn run(
    base_url: &str,
    count: usize,
    http: &HttpConfig,
    delay: Duration,
) -> Result<NetcheckReport> {
    let mut builder = reqwest::Client::builder().timeout(http.timeout);
    if let Some(url) = &http.proxy_url {
        if let Ok(proxy) = reqwest::Proxy::all(url) {
            builder = builder.proxy(proxy);
        }
    }
    if !http.verify_tls {
        builder = builder.danger_accept_invalid_certs(true);
    }
    let client = builder.build()?;

    let base = base_url.trim_end_matches('/');
    let pacer = Pacer::new(delay);
    let mut report = NetcheckReport::default();

    println!("--- network reachability check against {} ---", base);

    for attempt in 1..=count {
        let url = format!("{}/posts/{}", base, attempt);
        debug!(%url, "netcheck request");

        match client.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                println!("attempt {:02}: ok ({})", attempt, url);
                report.ok += 1;
            }
            Ok(response) => {
                println!(
                    "attempt {:02}: server responded {}",
                    attempt,
                    response.status().as_u16()
                );
                report.failed += 1;
            }
            Err(e) => {
                println!("attempt {:02}: connection failed ({})", attempt, e);
                report.failed += 1;
            }
        }

        if attempt < count {
            pacer.pause().await;
        }
    }

    println!("netcheck finished: {} ok, {} failed", report.ok, report.failed);
    Ok(report)
}
