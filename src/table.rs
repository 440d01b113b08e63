//! In-memory tabular dataset: ordered columns, string cells.
//!
//! Rows are kept aligned to the column list; pushing a short row pads it
//! with empty cells, appending a column backfills existing rows.

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Index of `name`, appending it as a new column (and backfilling
    /// existing rows with empty cells) if absent.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(idx) = self.column_index(name) {
            return idx;
        }
        self.columns.push(name.to_string());
        for row in &mut self.rows {
            row.push(String::new());
        }
        self.columns.len() - 1
    }

    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
    }

    pub fn value(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut t = Table::new(vec!["CEP".into(), "Nome".into()]);
        t.push_row(vec!["01001000".into(), "Ana".into()]);
        t.push_row(vec!["02002000".into(), "Bia".into()]);
        t
    }

    #[test]
    fn test_column_index() {
        let t = sample();
        assert_eq!(t.column_index("CEP"), Some(0));
        assert_eq!(t.column_index("Nome"), Some(1));
        assert_eq!(t.column_index("Status"), None);
    }

    #[test]
    fn test_ensure_column_backfills_existing_rows() {
        let mut t = sample();
        let idx = t.ensure_column("Status");
        assert_eq!(idx, 2);
        assert_eq!(t.value(0, 2), "");
        assert_eq!(t.value(1, 2), "");

        // Already present: same index, no growth.
        assert_eq!(t.ensure_column("Status"), 2);
        assert_eq!(t.columns().len(), 3);
    }

    #[test]
    fn test_push_row_pads_to_width() {
        let mut t = sample();
        t.push_row(vec!["03003000".into()]);
        assert_eq!(t.value(2, 0), "03003000");
        assert_eq!(t.value(2, 1), "");
    }
}
