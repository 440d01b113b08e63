//! Output persistence: a [`Table`] is written whole to a spreadsheet (or
//! CSV) file, header row first. Each flush overwrites the previous file.

use std::path::Path;

use crate::error::{Error, Result};
use crate::table::Table;

pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "xlsx" => write_xlsx(path, table),
        "csv" => write_csv(path, table),
        _ => Err(Error::UnsupportedFormat(extension)),
    }
}

fn write_xlsx(path: &Path, table: &Table) -> Result<()> {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book.get_sheet_mut(&0).ok_or_else(|| Error::SheetWrite {
        path: path.to_path_buf(),
        details: "workbook has no sheets".to_string(),
    })?;

    for (idx, name) in table.columns().iter().enumerate() {
        sheet
            .get_cell_mut((idx as u32 + 1, 1))
            .set_value(name.as_str());
    }

    for (row_idx, row) in table.rows().iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            sheet
                .get_cell_mut((col_idx as u32 + 1, row_idx as u32 + 2))
                .set_value(value.as_str());
        }
    }

    umya_spreadsheet::writer::xlsx::write(&book, path).map_err(|e| Error::SheetWrite {
        path: path.to_path_buf(),
        details: e.to_string(),
    })
}

fn write_csv(path: &Path, table: &Table) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().from_path(path)?;

    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row)?;
    }

    writer.flush()?;
    Ok(())
}
