//! Various modules for getting data from the portal's HTML.
//!
//! Every CSS selector the scrapers rely on lives in
//! `selectors/moneyforward.toml`. That file is embedded into the crate and
//! is what `SelectorConfig::builtin()` returns; pass your own TOML to
//! `SelectorConfig::from_toml_str` if the markup moves before this crate
//! catches up.

pub mod cash_flow;
pub mod home;

use crate::error::*;
use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

const BUILTIN_SELECTORS_STR: &str = include_str!("../../selectors/moneyforward.toml");

/// Format of the date part of a row's sort attribute (`2023/05/01-0`).
const SORT_DATE_FORMAT: &str = "%Y/%m/%d";

/// Selector strings and page paths, as written in the TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SelectorConfig {
    pub pages: PagePaths,
    pub auth: AuthSelectorConfig,
    pub transactions: TransactionSelectorConfig,
    pub total_assets: TotalAssetSelectorConfig
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PagePaths {
    pub cash_flow: String,
    pub home: String
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthSelectorConfig {
    pub marker: String
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TransactionSelectorConfig {
    pub rows: String,
    pub date: String,
    pub date_sort_attr: String,
    pub content: String,
    pub amount: String
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TotalAssetSelectorConfig {
    pub heading: String
}

impl SelectorConfig {
    /// The selectors shipped with this crate.
    #[inline]
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_SELECTORS_STR)
    }

    #[inline]
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Parses every selector string, failing on the first one that is invalid.
    pub fn compile(&self) -> Result<Selectors> {
        let t = &self.transactions;

        Ok(Selectors {
            pages: self.pages.clone(),
            auth_marker: sel("auth.marker", &self.auth.marker)?,
            transactions: TransactionSelectors {
                rows: sel("transactions.rows", &t.rows)?,
                date: sel("transactions.date", &t.date)?,
                date_sort_attr: t.date_sort_attr.clone(),
                content: sel("transactions.content", &t.content)?,
                amount: sel("transactions.amount", &t.amount)?
            },
            total_assets: TotalAssetSelectors {
                heading: sel("total_assets.heading", &self.total_assets.heading)?
            }
        })
    }
}

/// A `SelectorConfig` with every selector parsed and ready to use.
#[derive(Debug, Clone)]
pub struct Selectors {
    pub pages: PagePaths,
    pub auth_marker: Selector,
    pub transactions: TransactionSelectors,
    pub total_assets: TotalAssetSelectors
}

#[derive(Debug, Clone)]
pub struct TransactionSelectors {
    pub rows: Selector,
    pub date: Selector,
    pub date_sort_attr: String,
    pub content: Selector,
    pub amount: Selector
}

#[derive(Debug, Clone)]
pub struct TotalAssetSelectors {
    pub heading: Selector
}

impl Selectors {
    /// Compiled form of `SelectorConfig::builtin()`.
    #[inline]
    pub fn builtin() -> Result<Self> {
        SelectorConfig::builtin()?.compile()
    }
}

/// Fails with `NotAuthenticated` unless `doc` contains the logged in marker.
pub fn ensure_authenticated(doc: &Html, selectors: &Selectors) -> Result<()> {
    if doc.select(&selectors.auth_marker).next().is_none() {
        warn!("authenticated marker not found in fetched page");
        bail!(ErrorKind::NotAuthenticated);
    }

    Ok(())
}

fn sel(name: &str, selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|_| ErrorKind::InvalidSelector(name.into(), selector.into()).into())
}

/// Concatenated text of every element under `scope` matching `selector`.
fn text_of(scope: ElementRef, selector: &Selector) -> String {
    scope.select(selector).flat_map(|e| e.text()).collect()
}

/// Reads the date out of a sort attribute such as `2023/05/01-0`.
///
/// Only the part before the first `-` is looked at, and it must be exactly
/// `YYYY/MM/DD` with zero padding.
pub fn parse_sort_date(val: &str) -> Option<NaiveDate> {
    let date_part = val.split('-').next().unwrap_or_default();
    let well_formed = date_part.len() == 10 && date_part.bytes().enumerate().all(|(i, b)| {
        match i {
            4 | 7 => b == b'/',
            _ => b.is_ascii_digit()
        }
    });

    if !well_formed {
        return None;
    }

    NaiveDate::parse_from_str(date_part, SORT_DATE_FORMAT).ok()
}

/// Parses a row amount such as `-1,234`.
pub fn parse_amount(text: &str) -> Option<i64> {
    text.trim().replace(',', "").parse().ok()
}

/// Joins every run of ASCII digits in `text`, so `¥1,234,567 total` becomes
/// `1234567`.
pub fn concat_digits(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}
