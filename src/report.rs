//! Formatting of search results for console tables and CSV export.

use tabled::{Table, Tabled, settings::Style};

/// A result record that every output format knows how to render.
pub trait Formattable: Tabled {
    /// Convert the record to a row of strings for CSV output
    fn to_csv_row(&self) -> Vec<String>;

    /// Get CSV headers for this type
    fn csv_headers() -> Vec<&'static str>;
}

/// Pretty table formatter using the tabled library
pub struct PrettyFormatter;

impl PrettyFormatter {
    /// Format a collection of formattable items as a pretty table
    pub fn format<T: Formattable>(items: &[T]) -> String {
        if items.is_empty() {
            return String::new();
        }

        let mut table = Table::new(items);
        table.with(Style::rounded());

        table.to_string()
    }
}

/// CSV formatter
pub struct CsvFormatter;

impl CsvFormatter {
    /// Format a collection of formattable items as CSV
    pub fn format<T: Formattable>(items: &[T]) -> String {
        let mut csv = String::new();

        let headers = T::csv_headers();
        csv.push_str(&headers.join(","));
        csv.push('\n');

        for item in items {
            csv.push_str(&item.to_csv_row().join(","));
            csv.push('\n');
        }

        csv
    }
}
