use crate::core::{CurrencyCode, CurrencyList};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Rate,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Rate => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Lays the codes out row by row, `columns` per row. A `highlight` code is
/// shown in bold cyan.
pub fn currency_table(
    currencies: &CurrencyList,
    columns: usize,
    highlight: Option<&CurrencyCode>,
) -> Table {
    let mut table = new_styled_table();
    for row in currencies.as_slice().chunks(columns.max(1)) {
        table.add_row(row.iter().map(|code| {
            let cell = Cell::new(code.as_str()).set_alignment(CellAlignment::Center);
            if Some(code) == highlight {
                cell.fg(Color::Cyan).add_attribute(Attribute::Bold)
            } else {
                cell
            }
        }));
    }
    table
}

/// Spinner shown while a request is in flight.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Whether a display message is a rate rather than a status or error text.
pub fn is_rate(message: &str) -> bool {
    message.parse::<f64>().is_ok()
}

/// Styles a service message: rates in green, anything else as an error.
pub fn format_message(message: &str) -> String {
    if is_rate(message) {
        style_text(message, StyleType::Rate)
    } else {
        style_text(message, StyleType::Error)
    }
}
