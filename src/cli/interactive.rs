use super::ui;
use crate::core::{Converter, ConverterMode, CurrencyCode, CurrencyList, SelectedPair, Update};
use anyhow::{Context, Result, anyhow, bail};
use indicatif::ProgressBar;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::debug;

const COLUMNS: usize = 8;

/// Commands listed by `help`, each with its description.
const HELP: &[(&str, &str)] = &[
    ("base <CODE>", "change the base currency"),
    ("target <CODE>", "change the target currency"),
    ("refresh", "reload the currency list"),
    ("list", "show base and target currencies"),
    ("help", "show this list (also h or ?)"),
    ("quit", "exit"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Base(CurrencyCode),
    Target(CurrencyCode),
    Refresh,
    List,
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let mut words = line.split_whitespace();
    let Some(word) = words.next() else {
        return Ok(None);
    };
    let arg = words.next().map(|code| CurrencyCode::new(code.to_uppercase()));

    let command = match (word.to_lowercase().as_str(), arg) {
        ("b" | "base", Some(code)) => Command::Base(code),
        ("t" | "target", Some(code)) => Command::Target(code),
        ("b" | "base", None) => bail!("Usage: base <CODE>"),
        ("t" | "target", None) => bail!("Usage: target <CODE>"),
        ("r" | "refresh", _) => Command::Refresh,
        ("l" | "list", _) => Command::List,
        ("h" | "help" | "?", _) => Command::Help,
        ("q" | "quit" | "exit", _) => Command::Quit,
        (other, _) => bail!("Unknown command \"{other}\", type help for a list of commands"),
    };
    Ok(Some(command))
}

/// New selection after the base changes. The current target is kept unless it
/// is the new base, in which case the first remaining code is used.
pub fn select_base(
    currencies: &CurrencyList,
    current: Option<&SelectedPair>,
    base: CurrencyCode,
) -> Result<SelectedPair> {
    if !currencies.contains(&base) {
        bail!("Unknown currency \"{base}\"");
    }
    let targets = currencies.without(&base);
    let target = current
        .map(|pair| &pair.target)
        .filter(|target| targets.contains(target))
        .or_else(|| targets.get(0))
        .cloned()
        .ok_or_else(|| anyhow!("No target currency available for {base}"))?;
    Ok(SelectedPair::new(base, target))
}

/// New selection after the target changes; the target may not be the base.
pub fn select_target(
    currencies: &CurrencyList,
    current: Option<&SelectedPair>,
    target: CurrencyCode,
) -> Result<SelectedPair> {
    let base = current
        .map(|pair| pair.base.clone())
        .ok_or_else(|| anyhow!("Select a base currency first"))?;
    if !currencies.without(&base).contains(&target) {
        bail!("Currency \"{target}\" is not available against {base}");
    }
    Ok(SelectedPair::new(base, target))
}

/// Loads the currency list, then reads commands from stdin until `quit` or
/// end of input.
pub async fn run(converter: Converter) -> Result<()> {
    let (tx, rx) = mpsc::unbounded_channel();
    let renderer = tokio::spawn(render(rx));

    print_help();
    converter.spawn(ConverterMode::AllCurrencies, tx.clone());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", ui::style_text(&e.to_string(), ui::StyleType::Error));
                continue;
            }
        };
        debug!(?command, "Received command");

        let service = converter.service();
        let currencies = service.currencies().await;
        let selected = service.selected().await;

        let selection = match command {
            Command::Quit => break,
            Command::Help => {
                print_help();
                continue;
            }
            Command::Refresh => {
                converter.spawn(ConverterMode::AllCurrencies, tx.clone());
                continue;
            }
            Command::List => {
                print_lists(&currencies, selected.as_ref());
                continue;
            }
            Command::Base(code) => select_base(&currencies, selected.as_ref(), code),
            Command::Target(code) => select_target(&currencies, selected.as_ref(), code),
        };

        match selection {
            Ok(pair) => {
                println!("{}", ui::style_text(&pair.to_string(), ui::StyleType::Subtle));
                converter.spawn(ConverterMode::Exchange(pair), tx.clone());
            }
            Err(e) => println!("{}", ui::style_text(&e.to_string(), ui::StyleType::Error)),
        }
    }

    drop(tx);
    renderer.abort();
    Ok(())
}

async fn render(mut updates: UnboundedReceiver<Update>) {
    let mut spinner: Option<ProgressBar> = None;
    while let Some(update) = updates.recv().await {
        match update {
            Update::Busy(true) => {
                if let Some(previous) = spinner.replace(ui::new_spinner("Loading...")) {
                    previous.finish_and_clear();
                }
            }
            Update::Busy(false) => {
                if let Some(current) = spinner.take() {
                    current.finish_and_clear();
                }
            }
            Update::Currencies(list) => {
                println!(
                    "{}",
                    ui::style_text(
                        &format!("{} currencies loaded", list.len()),
                        ui::StyleType::Subtle
                    )
                );
            }
            Update::Label(text) if text.is_empty() => {}
            Update::Label(text) => println!("{}", ui::format_message(&text)),
        }
    }
}

fn print_lists(currencies: &CurrencyList, selected: Option<&SelectedPair>) {
    if currencies.is_empty() {
        println!(
            "{}",
            ui::style_text("No currencies loaded, try refresh", ui::StyleType::Error)
        );
        return;
    }

    let base = selected.map(|pair| &pair.base);
    println!("{}", ui::style_text("Base", ui::StyleType::Title));
    println!("{}", ui::currency_table(currencies, COLUMNS, base));

    if let Some(pair) = selected {
        println!("{}", ui::style_text("Target", ui::StyleType::Title));
        println!(
            "{}",
            ui::currency_table(&currencies.without(&pair.base), COLUMNS, Some(&pair.target))
        );
    }
}

fn print_help() {
    println!("{}", ui::style_text("Commands", ui::StyleType::Title));
    for (command, description) in HELP {
        println!(
            "  {:<14} {}",
            command,
            ui::style_text(description, ui::StyleType::Subtle)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> CurrencyList {
        CurrencyList::from_codes(["EUR", "GBP", "USD"].map(Into::into))
    }

    fn pair(base: &str, target: &str) -> SelectedPair {
        SelectedPair::new(base.into(), target.into())
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(
            parse_command("base usd").unwrap(),
            Some(Command::Base("USD".into()))
        );
        assert_eq!(
            parse_command("  T eur ").unwrap(),
            Some(Command::Target("EUR".into()))
        );
        assert_eq!(parse_command("r").unwrap(), Some(Command::Refresh));
        assert_eq!(parse_command("list").unwrap(), Some(Command::List));
        assert_eq!(parse_command("quit").unwrap(), Some(Command::Quit));
        assert_eq!(parse_command("   ").unwrap(), None);
    }

    #[test]
    fn test_help_lists_every_command() {
        let parsed: Vec<Command> = HELP
            .iter()
            .map(|(usage, _)| parse_command(&usage.replace("<CODE>", "usd")).unwrap().unwrap())
            .collect();
        assert_eq!(
            parsed,
            vec![
                Command::Base("USD".into()),
                Command::Target("USD".into()),
                Command::Refresh,
                Command::List,
                Command::Help,
                Command::Quit,
            ]
        );
        assert_eq!(parse_command("?").unwrap(), Some(Command::Help));
        assert_eq!(parse_command("h").unwrap(), Some(Command::Help));
    }

    #[test]
    fn test_parse_command_errors() {
        assert!(
            parse_command("base")
                .unwrap_err()
                .to_string()
                .contains("Usage")
        );
        assert!(
            parse_command("convert 10")
                .unwrap_err()
                .to_string()
                .contains("Unknown command")
        );
    }

    #[test]
    fn test_select_base_keeps_target() {
        let current = pair("EUR", "USD");
        let selected = select_base(&list(), Some(&current), "GBP".into()).unwrap();
        assert_eq!(selected, pair("GBP", "USD"));
    }

    #[test]
    fn test_select_base_moves_clashing_target() {
        let current = pair("EUR", "USD");
        let selected = select_base(&list(), Some(&current), "USD".into()).unwrap();
        assert_eq!(selected, pair("USD", "EUR"));

        let selected = select_base(&list(), None, "EUR".into()).unwrap();
        assert_eq!(selected, pair("EUR", "GBP"));
    }

    #[test]
    fn test_select_base_unknown_or_alone() {
        assert!(select_base(&list(), None, "JPY".into()).is_err());

        let single = CurrencyList::from_codes(["EUR".into()]);
        assert!(select_base(&single, None, "EUR".into()).is_err());
    }

    #[test]
    fn test_select_target() {
        let current = pair("EUR", "USD");
        assert_eq!(
            select_target(&list(), Some(&current), "GBP".into()).unwrap(),
            pair("EUR", "GBP")
        );
        // The base is never a valid target
        assert!(select_target(&list(), Some(&current), "EUR".into()).is_err());
        assert!(select_target(&list(), Some(&current), "JPY".into()).is_err());
        assert!(select_target(&list(), None, "GBP".into()).is_err());
    }
}
