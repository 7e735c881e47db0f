//! Prints the transaction history and total assets of a logged in account.
//!
//! Log in with a browser, copy the `_moneybook_session` cookie and run:
//!
//! ```text
//! MF_SESSION=... cargo run --example basic_usage
//! ```

extern crate moneyforward_scraper;

use std::time::Duration;

// You may want your own error setup in your own code; here we just use the scraper's
// error types.
use moneyforward_scraper::error::*;
use moneyforward_scraper::{ClientOptions, Context, SessionClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match actual_main().await {
        Ok(()) => {},
        Err(e) => println!("\n{}\n", e)
    }
}

// We write a function so that we can return a `Result` and use `?`
async fn actual_main() -> Result<()> {
    let token = std::env::var("MF_SESSION").chain_err(|| "MF_SESSION is not set")?;
    let host = std::env::var("MF_HOST").unwrap_or_else(|_| "https://moneyforward.com".into());

    let client = SessionClient::new(ClientOptions::new(host, token)?)?;
    let ctx = Context::background().with_timeout(Duration::from_secs(30));

    // Get the data...
    let report = client.transaction_report(&ctx).await?;
    let total = client.total_asset(&ctx).await?;

    // ...use the data.
    println!();

    for record in &report.records {
        println!("{}  {:>10}  {}", record.date, record.amount, record.content);
    }

    if report.degraded_rows > 0 {
        println!("\n{} row(s) could not be read completely", report.degraded_rows);
    }

    println!("\nTotal assets: {}", total.amount);
    println!();

    Ok(())
}
