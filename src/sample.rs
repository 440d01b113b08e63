//! Terminal test queries: look up the first few rows of the input and
//! print the results, writing nothing. Useful to check connectivity and
//! column configuration before a long batch run.

use std::path::Path;
use std::time::Duration;

use crate::client::LookupClient;
use crate::config::HttpConfig;
use crate::enrich::STATUS_SUCCESS;
use crate::error::{Error, Result};
use crate::pace::Pacer;
use crate::provider::{Lookup, Provider};
use crate::reader;

pub async fn run(
    provider: Provider,
    base_url: Option<String>,
    input: &Path,
    cep_column: &str,
    count: usize,
    http: &HttpConfig,
    delay: Duration,
) -> Result<()> {
    let table = reader::read_table(input)?;

    let cep_col = table
        .column_index(cep_column)
        .ok_or_else(|| Error::ColumnNotFound {
            path: input.to_path_buf(),
            column: cep_column.to_string(),
            available: table.columns().join(", "),
        })?;

    let rows = &table.rows()[..table.len().min(count)];
    println!("--- sampling the first {} rows of {} ---", rows.len(), input.display());

    let client = LookupClient::new(provider, base_url, http)?;
    let pacer = Pacer::new(delay);

    for (index, row) in rows.iter().enumerate() {
        let raw = row.get(cep_col).map(String::as_str).unwrap_or("");

        match client.lookup(raw).await {
            Lookup::Found(addr) => println!(
                "{}/{} - CEP: {} - Status: {} ({}, {}, {}, {})",
                index + 1,
                rows.len(),
                raw,
                STATUS_SUCCESS,
                addr.street,
                addr.neighborhood,
                addr.city,
                addr.state
            ),
            Lookup::Failed(failure) => println!(
                "{}/{} - CEP: {} - Status: {}",
                index + 1,
                rows.len(),
                raw,
                failure
            ),
        }

        if index + 1 < rows.len() {
            pacer.pause().await;
        }
    }

    Ok(())
}
