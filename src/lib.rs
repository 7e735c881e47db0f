//! Scrapes a MoneyForward account for its transaction history and total assets.
//!
//! The session is never established by this crate: log in with a browser and
//! hand the value of the `_moneybook_session` cookie to `ClientOptions::new`.
//!
//! ```no_run
//! # async fn run() -> moneyforward_scraper::error::Result<()> {
//! use moneyforward_scraper::{ClientOptions, Context, SessionClient};
//!
//! let options = ClientOptions::new("https://moneyforward.com", "session-token")?;
//! let client = SessionClient::new(options)?;
//! let ctx = Context::background();
//!
//! for record in client.transaction_histories(&ctx).await? {
//!     println!("{} {} {}", record.date, record.content, record.amount);
//! }
//! println!("total: {}", client.total_asset(&ctx).await?.amount);
//! # Ok(())
//! # }
//! ```
//!
//! The scrapers also work on HTML you saved yourself; see `scrapers`.

#![recursion_limit = "1024"]

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate if_chain;
#[macro_use]
extern crate serde_derive;

pub mod error;
pub mod data_structs;
pub mod credential;
pub mod scrapers;
#[cfg(feature = "http-client")]
pub mod context;
#[cfg(feature = "http-client")]
pub mod http_client;
#[cfg(test)]
mod test_utils;

pub use crate::credential::Credential;
pub use crate::data_structs::{TotalAsset, TransactionRecord, TransactionReport};
pub use crate::scrapers::{SelectorConfig, Selectors};
#[cfg(feature = "http-client")]
pub use crate::context::{CancelHandle, Context};
#[cfg(feature = "http-client")]
pub use crate::http_client::{ClientOptions, SessionClient};
