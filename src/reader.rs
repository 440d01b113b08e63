//! Input loading: a spreadsheet (or CSV) becomes a [`Table`], first row
//! as column names.

use ssfmt::{FormatOptions, NumberFormat};
use std::path::Path;
use tracing::debug;
use umya_spreadsheet::structs::Worksheet;

use crate::error::{Error, Result};
use crate::table::Table;

pub fn read_table(path: &Path) -> Result<Table> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let table = match extension.as_str() {
        "xlsx" | "xlsm" => read_xlsx(path),
        "csv" => read_csv(path),
        _ => Err(Error::UnsupportedFormat(extension)),
    }?;

    debug!(path = %path.display(), rows = table.len(), columns = table.columns().len(), "table loaded");
    Ok(table)
}

fn read_xlsx(path: &Path) -> Result<Table> {
    let book = umya_spreadsheet::reader::xlsx::read(path).map_err(|e| Error::InvalidSheet {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;

    // The first sheet carries the dataset, as in the spreadsheets this
    // tool was built for.
    let sheet = book.get_sheet(&0).ok_or_else(|| Error::InvalidSheet {
        path: path.to_path_buf(),
        details: "workbook has no sheets".to_string(),
    })?;

    let (max_col, max_row) = sheet.get_highest_column_and_row();
    let opts = FormatOptions::default();

    if max_row == 0 {
        return Ok(Table::default());
    }

    let columns: Vec<String> = (1..=max_col)
        .map(|col| get_cell_formatted_value(sheet, col, 1, &opts))
        .collect();

    let mut table = Table::new(columns);
    for row in 2..=max_row {
        let record: Vec<String> = (1..=max_col)
            .map(|col| get_cell_formatted_value(sheet, col, row, &opts))
            .collect();
        table.push_row(record);
    }

    Ok(table)
}

fn read_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::Reader::from_path(path)?;

    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut table = Table::new(columns);
    for record in reader.records() {
        let record = record?;
        table.push_row(record.iter().map(|v| v.to_string()).collect());
    }

    Ok(table)
}

/// Get a cell's formatted value using ssfmt for proper Excel format code
/// support. A CEP stored as a number under the General format comes back
/// as "1001000", not "1001000.0".
fn get_cell_formatted_value(sheet: &Worksheet, col: u32, row: u32, opts: &FormatOptions) -> String {
    let Some(cell) = sheet.get_cell((col, row)) else {
        return String::new();
    };

    let raw_value = cell.get_value();
    if raw_value.is_empty() {
        return String::new();
    }

    let format_code = cell
        .get_style()
        .get_number_format()
        .map(|nf| nf.get_format_code())
        .unwrap_or("General");

    let fmt = match NumberFormat::parse(format_code) {
        Ok(f) => f,
        Err(_) => return raw_value.to_string(),
    };

    if let Ok(num) = raw_value.parse::<f64>() {
        return fmt.format(num, opts);
    }

    fmt.format_text(&raw_value, opts)
}
