//! Resumable batch enrichment.
//!
//! The output file is the only progress record: on startup the rows
//! already marked `Sucesso` are skipped, and every flush rewrites the
//! file as prior rows + the in-memory batch. An interrupted run loses at
//! most one unflushed batch, which the next run re-processes.

use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

use crate::cep::{self, CepKey};
use crate::client::LookupClient;
use crate::config::EnrichConfig;
use crate::error::{Error, Result};
use crate::pace::Pacer;
use crate::provider::{Lookup, Provider};
use crate::reader;
use crate::table::Table;
use crate::writer;

pub const STATUS_SUCCESS: &str = "Sucesso";
pub const STATUS_COLUMN: &str = "Status";

/// Columns appended to the input columns, in output order.
pub const ENRICHMENT_COLUMNS: [&str; 5] = ["Logradouro", "Bairro", "Cidade", "UF", STATUS_COLUMN];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EnrichReport {
    pub total_input: usize,
    pub already_done: usize,
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
}

pub async fn run(
    provider: Provider,
    base_url: Option<String>,
    config: &EnrichConfig,
) -> Result<EnrichReport> {
    let input = reader::read_table(&config.input)?;

    let cep_col = input
        .column_index(&config.cep_column)
        .ok_or_else(|| Error::ColumnNotFound {
            path: config.input.clone(),
            column: config.cep_column.clone(),
            available: input.columns().join(", "),
        })?;

    let (mut output, progress) = load_prior_output(config)?;
    if output.columns().is_empty() {
        output = Table::new(input.columns().to_vec());
    }

    // Output columns: prior/input columns first, enrichment columns after.
    let col_map: Vec<usize> = input
        .columns()
        .iter()
        .map(|name| output.ensure_column(name))
        .collect();
    let enrich_idx: Vec<usize> = ENRICHMENT_COLUMNS
        .iter()
        .map(|name| output.ensure_column(name))
        .collect();

    let mut report = EnrichReport {
        total_input: input.len(),
        ..Default::default()
    };

    let pending: Vec<&Vec<String>> = input
        .rows()
        .iter()
        .filter(|row| {
            let key = row.get(cep_col).and_then(|v| cep::normalize(v));
            let done = key.map(|k| progress.contains(&k)).unwrap_or(false);
            if done {
                report.already_done += 1;
            }
            !done
        })
        .collect();

    if pending.is_empty() {
        println!("all {} rows already enriched, nothing to do", report.total_input);
        return Ok(report);
    }

    println!(
        "enriching {} of {} rows ({} already done)",
        pending.len(),
        report.total_input,
        report.already_done
    );

    let client = LookupClient::new(provider, base_url, &config.http)?;
    let pacer = Pacer::new(config.delay);
    let total = pending.len();
    let mut batch: Vec<Vec<String>> = Vec::new();

    for (index, row) in pending.into_iter().enumerate() {
        let raw = row.get(cep_col).map(String::as_str).unwrap_or("");
        let lookup = client.lookup(raw).await;

        let mut out_row = vec![String::new(); output.columns().len()];
        for (src, value) in row.iter().enumerate() {
            if let Some(&slot) = col_map.get(src) {
                out_row[slot] = value.clone();
            }
        }

        let status = match lookup {
            Lookup::Found(addr) => {
                out_row[enrich_idx[0]] = addr.street;
                out_row[enrich_idx[1]] = addr.neighborhood;
                out_row[enrich_idx[2]] = addr.city;
                out_row[enrich_idx[3]] = addr.state;
                report.succeeded += 1;
                STATUS_SUCCESS.to_string()
            }
            Lookup::Failed(failure) => {
                report.failed += 1;
                failure.to_string()
            }
        };
        out_row[enrich_idx[4]] = status.clone();

        println!("{}/{} - CEP: {} - Status: {}", index + 1, total, raw, status);

        batch.push(out_row);
        report.processed += 1;

        if index + 1 < total {
            pacer.pause().await;
        }

        if batch.len() >= config.flush_size {
            flush(&mut output, &mut batch, &config.output)?;
        }
    }

    flush(&mut output, &mut batch, &config.output)?;

    println!(
        "done: {} processed ({} ok, {} failed), output: {}",
        report.processed,
        report.succeeded,
        report.failed,
        config.output.display()
    );

    Ok(report)
}

/// Load the existing output file, if any, and derive the set of CEP keys
/// already enriched successfully. A present-but-malformed output is
/// fatal, never a silent restart from zero.
fn load_prior_output(config: &EnrichConfig) -> Result<(Table, HashSet<CepKey>)> {
    if !config.output.exists() {
        return Ok((Table::default(), HashSet::new()));
    }

    let output = reader::read_table(&config.output)?;
    if output.columns().is_empty() {
        return Ok((Table::default(), HashSet::new()));
    }

    let cep_col =
        output
            .column_index(&config.cep_column)
            .ok_or_else(|| Error::OutputSchemaMismatch {
                path: config.output.clone(),
                column: config.cep_column.clone(),
            })?;
    let status_col =
        output
            .column_index(STATUS_COLUMN)
            .ok_or_else(|| Error::OutputSchemaMismatch {
                path: config.output.clone(),
                column: STATUS_COLUMN.to_string(),
            })?;

    let progress = derive_progress_set(&output, cep_col, status_col);
    println!(
        "resuming: {} rows in {}, {} already enriched",
        output.len(),
        config.output.display(),
        progress.len()
    );

    Ok((output, progress))
}

fn derive_progress_set(output: &Table, cep_col: usize, status_col: usize) -> HashSet<CepKey> {
    output
        .rows()
        .iter()
        .filter(|row| row.get(status_col).map(String::as_str) == Some(STATUS_SUCCESS))
        .filter_map(|row| row.get(cep_col).and_then(|v| cep::normalize(v)))
        .collect()
}

/// Persist prior rows + batch and clear the batch. Empty batch: no-op,
/// the file is not rewritten.
fn flush(output: &mut Table, batch: &mut Vec<Vec<String>>, path: &Path) -> Result<()> {
    if batch.is_empty() {
        return Ok(());
    }

    println!("--- flushing {} rows to {} ---", batch.len(), path.display());
    debug!(rows = batch.len(), total = output.len() + batch.len(), "flush");

    for row in batch.drain(..) {
        output.push_row(row);
    }
    writer::write_table(path, output)
}
