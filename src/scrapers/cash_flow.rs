//! Handles extraction of content from the cash flow page (`/cf`).

use super::{parse_amount, parse_sort_date, text_of, Selectors};
use crate::data_structs::{TransactionRecord, TransactionReport};
use scraper::Html;
use std::sync::Arc;
use tracing::warn;

/// Handles extraction of content from the cash flow page (`/cf`).
///
/// You can either provide your own HTML string (see `CashFlowPageScraper::new`)
/// or use the `http_client::SessionClient`.
pub struct CashFlowPageScraper {
    doc: Html,
    selectors: Arc<Selectors>
}

impl CashFlowPageScraper {
    #[inline]
    pub fn new(html: &str, selectors: Arc<Selectors>) -> Self {
        Self::from_document(Html::parse_document(html), selectors)
    }

    #[inline]
    pub fn from_document(doc: Html, selectors: Arc<Selectors>) -> Self {
        CashFlowPageScraper {
            doc,
            selectors
        }
    }

    /// Gets every active row of the detail table, in document order.
    #[inline]
    pub fn transactions(&self) -> Vec<TransactionRecord> {
        self.transaction_report().records
    }

    /**
    Gets every active row of the detail table along with the number of rows
    that were degraded.

    A row is degraded when its date or its amount could not be read and the
    fallback value (1900-01-01, zero) was used instead. Such a row is still
    returned; one bad row never drops the rest of the table.
    */
    pub fn transaction_report(&self) -> TransactionReport {
        let sels = &self.selectors.transactions;
        let mut report = TransactionReport::default();

        for (index, row) in self.doc.select(&sels.rows).enumerate() {
            let mut record = TransactionRecord::default();
            let mut degraded = false;

            // Date
            if_chain! {
                if let Some(elem) = row.select(&sels.date).next();
                if let Some(val) = elem.value().attr(&sels.date_sort_attr);
                if let Some(date) = parse_sort_date(val);

            then {
                record.date = date;
            } else {
                degraded = true;
            }}

            // Content
            record.content = text_of(row, &sels.content).trim().into();

            // Amount
            let amount_text = text_of(row, &sels.amount);
            match parse_amount(&amount_text) {
                Some(amount) => record.amount = amount,
                None => degraded = true
            }

            if degraded {
                warn!(
                    row = index,
                    amount = amount_text.trim(),
                    "transaction row fell back to default values"
                );
                report.degraded_rows += 1;
            }

            report.records.push(record);
        }

        report
    }
}
