use super::ui;
use crate::core::{CurrencyCode, RateQuote, RateService};
use anyhow::Result;

/// Fetches one rate and prints it.
pub async fn run(service: &RateService, base: &CurrencyCode, target: &CurrencyCode) -> Result<()> {
    let spinner = ui::new_spinner(&format!("Fetching {base} -> {target}..."));
    let quote = service.fetch_quote(base, target).await;
    spinner.finish_and_clear();

    match quote_line(base, target, &quote) {
        Some(line) => println!("{}", ui::style_text(&line, ui::StyleType::Rate)),
        None => println!("{}", ui::style_text(&quote.message, ui::StyleType::Error)),
    }
    Ok(())
}

/// `1 USD = 0.91 EUR (2018-02-09)`, or `None` when the quote holds an error text.
fn quote_line(base: &CurrencyCode, target: &CurrencyCode, quote: &RateQuote) -> Option<String> {
    if !ui::is_rate(&quote.message) {
        return None;
    }
    let mut line = format!("1 {base} = {} {target}", quote.message);
    if let Some(date) = quote.date {
        line.push_str(&format!(" ({})", date.format("%Y-%m-%d")));
    }
    Some(line)
}
