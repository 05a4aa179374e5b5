//! Plain-text tables for tool observations
//!
//! Tables are borderless with a labelled index column, close to what a
//! dataframe prints, which is what the model reads best.

use comfy_table::{Cell, CellAlignment, Row, Table, presets};

/// An index column plus value columns, rendered as plain text
#[derive(Debug, Clone, Default)]
pub struct TextTable {
    index_label: String,
    columns: Vec<String>,
    rows: Vec<(String, Vec<String>)>,
}

impl TextTable {
    pub fn new<I, S>(index_label: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            index_label: index_label.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; missing trailing cells render blank
    pub fn push_row(&mut self, index: impl Into<String>, cells: Vec<String>) {
        self.rows.push((index.into(), cells));
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table
    pub fn render(&self) -> String {
        let mut table = Table::new();
        table.load_preset(presets::NOTHING);

        let mut header = Row::new();
        header.add_cell(Cell::new(&self.index_label).set_alignment(CellAlignment::Left));
        for column in &self.columns {
            header.add_cell(Cell::new(column).set_alignment(CellAlignment::Right));
        }
        table.set_header(header);

        for (index, cells) in &self.rows {
            let mut row = Row::new();
            row.add_cell(Cell::new(index).set_alignment(CellAlignment::Left));
            for cell in cells {
                row.add_cell(Cell::new(cell).set_alignment(CellAlignment::Right));
            }
            table.add_row(row);
        }

        table.to_string()
    }
}

impl std::fmt::Display for TextTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_has_index_label_and_columns() {
        let mut table = TextTable::new("Date", ["Close", "Volume"]);
        table.push_row("2024-01-02", vec!["248.419998".to_string(), "125000000".to_string()]);
        table.push_row("2024-01-03", vec!["238.449997".to_string(), "121000000".to_string()]);

        let rendered = table.render();
        let header = rendered.lines().find(|line| line.contains("Date")).unwrap();

        assert!(header.contains("Date"));
        assert!(header.contains("Close"));
        assert!(header.contains("Volume"));
        assert!(rendered.contains("2024-01-03"));
        assert!(rendered.contains("238.449997"));
        assert!(!rendered.contains('|'));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_empty_table() {
        let table = TextTable::new("Date", ["Close"]);
        assert!(table.is_empty());
        assert!(table.render().contains("Close"));
    }
}
