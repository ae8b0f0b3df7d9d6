//! Table rendering utilities for CLI outputs.

use super::formatting::{pad_right, truncate_display};

pub struct Column {
    pub header: String,
    pub width: usize,
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table whose column widths fit the headers and the rows,
    /// capped at `max_width` columns each.
    pub fn fitted(headers: &[String], rows: Vec<Vec<String>>, max_width: usize) -> Self {
        let columns = headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let widest = rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|c| unicode_width::UnicodeWidthStr::width(c.as_str()))
                    .chain(std::iter::once(h.len()))
                    .max()
                    .unwrap_or(0);
                Column {
                    header: h.clone(),
                    width: widest.min(max_width),
                }
            })
            .collect();

        Self { columns, rows }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        // Header
        for col in &self.columns {
            out.push_str(&pad_right(&col.header, col.width));
            out.push(' ');
        }
        out.push('\n');

        // Rows (short rows are padded with blanks)
        for row in &self.rows {
            for (i, col) in self.columns.iter().enumerate() {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                let cell = truncate_display(&cell.replace('\n', " "), col.width);
                out.push_str(&pad_right(&cell, col.width));
                out.push(' ');
            }
            out.push('\n');
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fitted_table_renders_short_rows() {
        let t = Table::fitted(
            &["Date".to_string(), "Diary".to_string()],
            vec![vec!["2025-01-01".to_string()]],
            20,
        );
        let out = t.render();
        assert!(out.starts_with("Date       Diary"));
        assert!(out.contains("2025-01-01"));
    }
}
