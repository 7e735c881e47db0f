use chrono::NaiveDate;

/// Fallback date used for rows whose date cell could not be read.
#[inline]
pub fn sentinel_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// One row of the cash flow detail table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "derive-serde", derive(Serialize, Deserialize))]
pub struct TransactionRecord {
    /// Booking date, or `sentinel_date()` if the row did not carry a readable one.
    pub date: NaiveDate,
    pub content: String,
    /// Signed amount in currency units. Zero if the cell was unreadable.
    pub amount: i64
}

impl TransactionRecord {
    /// Whether the date of this record is the fallback value.
    #[inline]
    pub fn has_sentinel_date(&self) -> bool {
        self.date == sentinel_date()
    }
}

impl Default for TransactionRecord {
    fn default() -> Self {
        TransactionRecord {
            date: sentinel_date(),
            content: String::new(),
            amount: 0
        }
    }
}

/// The records found on a cash flow page along with how many of them had to
/// fall back to a default date or amount.
///
/// A sudden jump in `degraded_rows` usually means the portal changed its markup.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "derive-serde", derive(Serialize, Deserialize))]
pub struct TransactionReport {
    pub records: Vec<TransactionRecord>,
    pub degraded_rows: usize
}

/// Aggregate holdings shown on the portal's home page at fetch time.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "derive-serde", derive(Serialize, Deserialize))]
pub struct TotalAsset {
    pub amount: i64
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_record_uses_sentinel_date() {
        let record = TransactionRecord::default();

        assert!(record.has_sentinel_date());
        assert_eq!(record.date, NaiveDate::from_ymd_opt(1900, 1, 1).unwrap());
        assert_eq!(record.amount, 0);
    }

    #[test]
    #[cfg(feature = "derive-serde")]
    fn record_serializes_with_iso_date() {
        let record = TransactionRecord {
            date: NaiveDate::from_ymd_opt(2023, 5, 1).unwrap(),
            content: "Coffee".into(),
            amount: -450
        };
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["date"], "2023-05-01");
        assert_eq!(json["content"], "Coffee");
        assert_eq!(json["amount"], -450);
    }
}
