//! Handles extraction of content from the portal's home page (`/`).

use super::{concat_digits, Selectors};
use crate::data_structs::TotalAsset;
use crate::error::*;
use scraper::Html;
use std::sync::Arc;

/// Handles extraction of content from the portal's home page (`/`).
pub struct HomePageScraper {
    doc: Html,
    selectors: Arc<Selectors>
}

impl HomePageScraper {
    #[inline]
    pub fn new(html: &str, selectors: Arc<Selectors>) -> Self {
        Self::from_document(Html::parse_document(html), selectors)
    }

    #[inline]
    pub fn from_document(doc: Html, selectors: Arc<Selectors>) -> Self {
        HomePageScraper {
            doc,
            selectors
        }
    }

    /// Reads the total assets figure from the first matching heading.
    ///
    /// Any currency symbol, separator or unit label mixed in with the digits is
    /// dropped. Unlike row amounts there is no fallback: a heading without a
    /// readable figure is an `AmountParseError`.
    pub fn total_asset(&self) -> Result<TotalAsset> {
        let text = match self.doc.select(&self.selectors.total_assets.heading).next() {
            Some(elem) => elem.text().collect::<String>(),
            None => String::new()
        };

        match concat_digits(&text).parse() {
            Ok(amount) => Ok(TotalAsset { amount }),
            Err(_) => bail!(ErrorKind::AmountParseError(text.trim().into()))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils::*;

    fn scraper(html: &str) -> HomePageScraper {
        HomePageScraper::new(html, Arc::new(builtin_selectors()))
    }

    fn assert_amount_error(result: Result<TotalAsset>) {
        match result {
            Err(Error(ErrorKind::AmountParseError(_), _)) => {}
            other => panic!("expected AmountParseError, got {:?}", other)
        }
    }

    #[test]
    fn total_asset_from_home_page() {
        let asset = scraper(fixture(HOME_PAGE)).total_asset().unwrap();

        assert_eq!(asset.amount, 1_234_567);
    }

    #[test]
    fn total_asset_strips_symbols_and_labels() {
        let html = r#"
            <section class="total-assets">
              <div class="heading-radius-box">¥1,234,567 total</div>
            </section>
        "#;

        assert_eq!(scraper(html).total_asset().unwrap().amount, 1_234_567);
    }

    #[test]
    fn only_first_heading_is_read() {
        let html = r#"
            <section class="total-assets">
              <div class="heading-radius-box">総資産 42円</div>
              <div class="heading-radius-box">99円</div>
            </section>
        "#;

        assert_eq!(scraper(html).total_asset().unwrap().amount, 42);
    }

    #[test]
    fn heading_without_digits_is_an_error() {
        let html = r#"
            <section class="total-assets">
              <div class="heading-radius-box">unavailable</div>
            </section>
        "#;

        assert_amount_error(scraper(html).total_asset());
    }

    #[test]
    fn missing_heading_is_an_error() {
        assert_amount_error(scraper(fixture(CASH_FLOW_PAGE)).total_asset());
    }

    #[test]
    fn overflowing_figure_is_an_error() {
        let html = r#"
            <section class="total-assets">
              <div class="heading-radius-box">99999999999999999999999</div>
            </section>
        "#;

        assert_amount_error(scraper(html).total_asset());
    }
}
