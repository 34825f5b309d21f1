//! Core business logic abstractions

pub mod config;
pub mod converter;
pub mod currency;
pub mod error;
pub mod log;
pub mod rate;
pub mod service;

// Re-export main types for cleaner imports
pub use converter::{Converter, ConverterMode, Update};
pub use currency::{CurrencyCode, CurrencyList, RateQueryResult, SelectedPair};
pub use error::RateError;
pub use rate::{Rate, RateProvider, RateQuote, RateTable};
pub use service::RateService;
