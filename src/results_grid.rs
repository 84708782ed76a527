/// Results Grid Module for sqlprint
///
/// Renders a query result as a bordered ASCII table:
///
/// ```text
/// +----+------+
/// | id | name |
/// +----+------+
/// | 1  | a    |
/// +----+------+
/// ```
use std::io::Write;

/// A header row plus the body rows of a result, all cells already strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultsGrid {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ResultsGrid {
    /// Creates a new, empty ResultsGrid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the headers for the grid.
    pub fn set_headers(&mut self, headers: Vec<String>) {
        self.headers = headers;
    }

    /// Appends a row. Rows keep the order they were added in.
    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Appends every row of `rows`.
    pub fn add_rows(&mut self, rows: impl IntoIterator<Item = Vec<String>>) {
        self.rows.extend(rows);
    }

    /// Width of every column: the longest of the header and its cells.
    fn column_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    fn separator(widths: &[usize]) -> String {
        let mut line = String::from("+");
        for width in widths {
            line.push_str(&"-".repeat(width + 2));
            line.push('+');
        }
        line.push('\n');
        line
    }

    fn line<'a>(widths: &[usize], mut cells: impl Iterator<Item = &'a str>) -> String {
        let mut line = String::from("|");
        for width in widths {
            // Missing cells render empty; cells past the last header are dropped.
            let cell = cells.next().unwrap_or("");
            let pad = width - cell.chars().count();
            line.push(' ');
            line.push_str(cell);
            line.push_str(&" ".repeat(pad + 1));
            line.push('|');
        }
        line.push('\n');
        line
    }

    /// Renders the grid. A grid without headers renders as the empty string.
    pub fn render(&self) -> String {
        if self.headers.is_empty() {
            return String::new();
        }

        let widths = self.column_widths();
        let separator = Self::separator(&widths);

        let mut output = String::new();
        output.push_str(&separator);
        output.push_str(&Self::line(&widths, self.headers.iter().map(String::as_str)));
        output.push_str(&separator);
        for row in &self.rows {
            output.push_str(&Self::line(&widths, row.iter().map(String::as_str)));
        }
        output.push_str(&separator);
        output
    }

    /// Renders the grid into `out`.
    pub fn write_to<W: Write + ?Sized>(&self, out: &mut W) -> std::io::Result<()> {
        out.write_all(self.render().as_bytes())
    }
}
