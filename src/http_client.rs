//! Fetches pages from the portal with a logged in session.
//!
//! This module can be disabled by building this crate without default features.

use crate::context::Context;
use crate::credential::Credential;
use crate::data_structs::{TotalAsset, TransactionRecord, TransactionReport};
use crate::error::*;
use crate::scrapers::cash_flow::CashFlowPageScraper;
use crate::scrapers::home::HomePageScraper;
use crate::scrapers::{ensure_authenticated, SelectorConfig, Selectors};
use reqwest::{Client, StatusCode, Url};
use scraper::Html;
use std::sync::Arc;
use tracing::debug;

/// User-Agent sent with every request unless `ClientOptions::user_agent` says otherwise.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 6.3; WOW64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/36.0.1985.125 Safari/537.73";

/// Everything a `SessionClient` needs to know about the session it acts for.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Base URL of the portal, such as `https://moneyforward.com`.
    pub host: String,
    pub credential: Credential,
    pub user_agent: String,
    pub selectors: SelectorConfig
}

impl ClientOptions {
    /// Options for `host` using the portal's session cookie set to `session_token`.
    pub fn new(host: impl Into<String>, session_token: impl Into<String>) -> Result<Self> {
        Ok(ClientOptions {
            host: host.into(),
            credential: Credential::session(session_token),
            user_agent: DEFAULT_USER_AGENT.into(),
            selectors: SelectorConfig::builtin()?
        })
    }
}

/// Issues authenticated GET requests to the portal and hands the pages to
/// the scrapers.
///
/// The client holds no mutable state, so one instance can serve any number of
/// concurrent calls.
#[derive(Debug, Clone)]
pub struct SessionClient {
    client: Client,
    host: String,
    credential: Credential,
    user_agent: String,
    selectors: Arc<Selectors>
}

impl SessionClient {
    /// Create a client using reqwest's default `Client` config.
    #[inline]
    pub fn new(options: ClientOptions) -> Result<Self> {
        Self::with_client(Client::builder().build()?, options)
    }

    /// Provide your own reqwest client for use by this struct.
    ///
    /// This means you can configure timeouts, proxies and pooling as you wish.
    pub fn with_client(client: Client, options: ClientOptions) -> Result<Self> {
        let host = options.host.trim_end_matches('/').to_string();
        match Url::parse(&host) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            _ => bail!(ErrorKind::InvalidHost(options.host))
        }

        Ok(SessionClient {
            client,
            host,
            credential: options.credential,
            user_agent: options.user_agent,
            selectors: Arc::new(options.selectors.compile()?)
        })
    }

    /// Full URL for `path`, which is taken relative to the host.
    #[inline]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.host, path.trim_start_matches('/'))
    }

    /// Fetches `path` and checks that the page belongs to a logged in session.
    pub async fn fetch(&self, ctx: &Context, path: &str) -> Result<Html> {
        let body = ctx.run(self.get_string(path)).await?;
        let doc = Html::parse_document(&body);
        ensure_authenticated(&doc, &self.selectors)?;

        Ok(doc)
    }

    /// Obtain a scraper for the cash flow page.
    #[inline]
    pub async fn cash_flow_page(&self, ctx: &Context) -> Result<CashFlowPageScraper> {
        let doc = self.fetch(ctx, &self.selectors.pages.cash_flow).await?;
        Ok(CashFlowPageScraper::from_document(doc, self.selectors.clone()))
    }

    /// Obtain a scraper for the home page.
    #[inline]
    pub async fn home_page(&self, ctx: &Context) -> Result<HomePageScraper> {
        let doc = self.fetch(ctx, &self.selectors.pages.home).await?;
        Ok(HomePageScraper::from_document(doc, self.selectors.clone()))
    }

    /// Every transaction listed on the cash flow page, in page order.
    #[inline]
    pub async fn transaction_histories(&self, ctx: &Context) -> Result<Vec<TransactionRecord>> {
        Ok(self.cash_flow_page(ctx).await?.transactions())
    }

    /// Like `transaction_histories`, plus the number of rows that fell back to
    /// default values.
    #[inline]
    pub async fn transaction_report(&self, ctx: &Context) -> Result<TransactionReport> {
        Ok(self.cash_flow_page(ctx).await?.transaction_report())
    }

    #[inline]
    pub async fn total_asset(&self, ctx: &Context) -> Result<TotalAsset> {
        self.home_page(ctx).await?.total_asset()
    }

    /// The fetched page at `path` serialized back to HTML. Meant for debugging
    /// selectors against the live site.
    pub async fn html(&self, ctx: &Context, path: &str) -> Result<String> {
        let doc = self.fetch(ctx, path).await?;
        Ok(doc.html())
    }

    /// Helper to get the body of the given path.
    async fn get_string(&self, path: &str) -> Result<String> {
        let url = self.url_for(path);
        debug!(url = %url, "fetching page");

        let req = self.client
            .get(&url)
            .header(reqwest::header::USER_AGENT, &self.user_agent);
        let resp = self.credential.apply(req).send().await?;
        let status = resp.status();
        debug!(url = %url, status = status.as_u16(), "received response");

        if status != StatusCode::OK {
            bail!(ErrorKind::UnexpectedStatus(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default().into()
            ));
        }

        let bytes = resp.bytes().await?;
        match String::from_utf8(bytes.to_vec()) {
            Ok(content) => Ok(content),
            Err(e) => bail!(ErrorKind::ParseError(e.to_string()))
        }
    }
}
