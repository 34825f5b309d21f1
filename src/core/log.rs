//! Diagnostics on stderr, so they never mix with rates printed on stdout.
//!
//! `RUST_LOG` wins when set; otherwise `--verbose` turns on debug output for
//! this crate only and everything stays silent without it.

use tracing_subscriber::EnvFilter;

const CRATE_TARGET: &str = env!("CARGO_CRATE_NAME");

fn default_directives(verbose: bool) -> String {
    if verbose {
        format!("{CRATE_TARGET}=debug")
    } else {
        "off".to_string()
    }
}

fn log_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

pub fn init_logging(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose))
        .with_writer(std::io::stderr)
        .without_time()
        .pretty()
        .init();
}
