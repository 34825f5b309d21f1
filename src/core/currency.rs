//! Currency codes, code lists and the selected pair

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::Display;

/// Short uppercase currency identifier as returned by the rates API, e.g. `USD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for CurrencyCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

/// Sorted list of unique currency codes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrencyList(Vec<CurrencyCode>);

impl CurrencyList {
    pub fn from_codes<I>(codes: I) -> Self
    where
        I: IntoIterator<Item = CurrencyCode>,
    {
        let unique: BTreeSet<CurrencyCode> = codes.into_iter().collect();
        Self(unique.into_iter().collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CurrencyCode> {
        self.0.get(index)
    }

    pub fn contains(&self, code: &CurrencyCode) -> bool {
        self.0.binary_search(code).is_ok()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CurrencyCode> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[CurrencyCode] {
        &self.0
    }

    /// The list with `code` removed; used for the target list, which never
    /// offers the base currency.
    pub fn without(&self, code: &CurrencyCode) -> CurrencyList {
        Self(self.0.iter().filter(|c| *c != code).cloned().collect())
    }

    /// Default selection: the first code as base and the first remaining
    /// code as target.
    pub fn first_pair(&self) -> Option<SelectedPair> {
        match self.0.as_slice() {
            [base, target, ..] => Some(SelectedPair::new(base.clone(), target.clone())),
            _ => None,
        }
    }
}

impl<'a> IntoIterator for &'a CurrencyList {
    type Item = &'a CurrencyCode;
    type IntoIter = std::slice::Iter<'a, CurrencyCode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedPair {
    pub base: CurrencyCode,
    pub target: CurrencyCode,
}

impl SelectedPair {
    pub fn new(base: CurrencyCode, target: CurrencyCode) -> Self {
        Self { base, target }
    }
}

impl Display for SelectedPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.base, self.target)
    }
}

/// Outcome of a currency list request: either the list or a message to show.
#[derive(Debug, Clone, PartialEq)]
pub enum RateQueryResult {
    Currencies(CurrencyList),
    Message(String),
}
