use super::ui;
use crate::core::{RateQueryResult, RateService};
use anyhow::Result;

const COLUMNS: usize = 8;

/// Fetches the currency list once and prints it.
pub async fn run(service: &RateService) -> Result<()> {
    let spinner = ui::new_spinner("Fetching currencies...");
    let result = service.fetch_all_currency_codes().await;
    spinner.finish_and_clear();

    match result {
        RateQueryResult::Currencies(list) => {
            println!(
                "{} {}",
                ui::style_text("Currencies", ui::StyleType::Title),
                ui::style_text(&format!("({})", list.len()), ui::StyleType::Subtle)
            );
            println!("{}", ui::currency_table(&list, COLUMNS, None));
        }
        RateQueryResult::Message(text) => {
            println!("{}", ui::style_text(&text, ui::StyleType::Error));
        }
    }
    Ok(())
}
