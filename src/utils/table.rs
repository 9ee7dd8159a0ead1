//! Fixed-width table rendering for CLI output.

pub struct Column {
    pub header: String,
    pub width: usize,
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn render_line(&self, cells: &[String]) -> String {
        let line: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                format!("{:<width$}", cell, width = col.width)
            })
            .collect();
        line.join(" ").trim_end().to_string()
    }

    pub fn render(&self) -> String {
        let headers: Vec<String> = self.columns.iter().map(|c| c.header.clone()).collect();
        let total_width = self.columns.iter().map(|c| c.width + 1).sum::<usize>();

        let mut out = self.render_line(&headers);
        out.push('\n');
        out.push_str(&"-".repeat(total_width.saturating_sub(1)));
        out.push('\n');

        for row in &self.rows {
            out.push_str(&self.render_line(row));
            out.push('\n');
        }

        out
    }
}
