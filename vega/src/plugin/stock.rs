//! Stock quote plugin.
//!
//! This plugin allows users to look up trading information for a ticker symbol via the `.stock`
//! command. Quotes are fetched from the IEX trading API and rendered as a single line.

use std::fmt;

use serde::Deserialize;
use tracing::{debug, error, warn};
use url::Url;

use crate::{http, plugin::prelude::*};

/// The base URL of the quote API.
const API_BASE_URL: &str = "https://api.iextrading.com/1.0";

/// Plugin for querying stock quotes.
pub struct Stock {
    /// HTTP client for making API requests.
    client: reqwest::Client,
    /// Command handler for the `.stock` command.
    command: VegaCommand,
}

/// Errors that can occur during quote lookups.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An error occurred while performing the HTTP request.
    #[error("request error: {0}")]
    Request(#[source] reqwest::Error),
    /// The API returned a non-success status.
    #[error("{0}")]
    Status(reqwest::StatusCode),
    /// The response body could not be decoded.
    #[error("could not deserialize response: {0}")]
    Deserialize(#[source] serde_path_to_error::Error<serde_json::Error>),
}

/// A quote for a single ticker symbol.
///
/// Decoding is tolerant: unknown fields are ignored and missing fields are left at their zero
/// value, since the upstream API omits fields outside trading hours.
#[allow(dead_code)]
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Quote {
    /// The ticker symbol, e.g. "AAPL".
    pub symbol: String,
    /// The name of the company.
    pub company_name: String,
    /// The primary listing exchange.
    pub primary_exchange: String,
    /// The sector the company belongs to.
    pub sector: String,
    /// Which price source `latest_price` was calculated from, e.g. "tops" or "close".
    pub calculation_price: String,
    /// The official open price.
    pub open: f64,
    /// The timestamp of the official open, in epoch milliseconds.
    pub open_time: i64,
    /// The official close price.
    pub close: f64,
    /// The timestamp of the official close, in epoch milliseconds.
    pub close_time: i64,
    /// The market-wide high from the SIP.
    pub high: f64,
    /// The market-wide low from the SIP.
    pub low: f64,
    /// The latest price.
    pub latest_price: f64,
    /// A human-readable description of the source of `latest_price`.
    pub latest_source: String,
    /// A human-readable time of when `latest_price` was updated.
    pub latest_time: String,
    /// The timestamp of when `latest_price` was updated, in epoch milliseconds.
    pub latest_update: i64,
    /// The volume behind `latest_price`.
    pub latest_volume: i64,
    /// The latest realtime price from IEX.
    pub iex_realtime_price: f64,
    /// The size of the latest realtime trade on IEX.
    pub iex_realtime_size: i64,
    /// The timestamp of the last IEX update, in epoch milliseconds.
    pub iex_last_updated: i64,
    /// The 15-minute delayed market price.
    pub delayed_price: f64,
    /// The timestamp of the delayed price, in epoch milliseconds.
    pub delayed_price_time: i64,
    /// The 15-minute delayed extended-hours price.
    pub extended_price: f64,
    /// The price change of `extended_price` from `latest_price`.
    pub extended_change: f64,
    /// The percentage change of `extended_price`, as a fraction.
    pub extended_change_percent: f64,
    /// The timestamp of the extended price, in epoch milliseconds.
    pub extended_price_time: i64,
    /// The previous trading day's close.
    pub previous_close: f64,
    /// The price change from the previous close.
    pub change: f64,
    /// The percentage change from the previous close, as a fraction.
    pub change_percent: f64,
    /// IEX's share of the traded market volume.
    pub iex_market_percent: f64,
    /// Shares traded on IEX.
    pub iex_volume: i64,
    /// The 30-day average total volume.
    pub avg_total_volume: i64,
    /// The best bid price on IEX.
    pub iex_bid_price: f64,
    /// The size of the best bid on IEX.
    pub iex_bid_size: i64,
    /// The best ask price on IEX.
    pub iex_ask_price: f64,
    /// The size of the best ask on IEX.
    pub iex_ask_size: i64,
    /// The market capitalization.
    pub market_cap: i64,
    /// The price-to-earnings ratio.
    pub pe_ratio: f64,
    /// The adjusted 52-week high.
    pub week52_high: f64,
    /// The adjusted 52-week low.
    pub week52_low: f64,
    /// The year-to-date change, as a fraction.
    pub ytd_change: f64,
}

impl fmt::Display for Quote {
    /// Formats the quote as a single line.
    ///
    /// Positive changes get an explicit `+` prefix; negative values carry their own sign. The
    /// stored change fraction is shown as a percentage with two decimals.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plus = if self.change > 0.0 { "+" } else { "" };

        write!(
            f,
            "{} ({}): {} {} ({plus}{}, {plus}{:.2}%), {} market cap, {} volume, {:.2} P/E - https://iextrading.com/apps/stocks/{}",
            self.symbol,
            self.company_name,
            self.latest_source,
            self.latest_price,
            self.change,
            self.change_percent * 100.0,
            humanize(self.market_cap),
            humanize(self.latest_volume),
            self.pe_ratio,
            self.symbol
        )
    }
}

/// Abbreviates an integer magnitude with a K/M/B unit suffix.
///
/// The scaled value keeps at most 3 significant digits: 2 decimals below 10, 1 decimal below
/// 100, none above. Negative magnitudes mirror the rendering of their absolute value with a
/// leading `-`.
#[must_use]
pub fn humanize(magnitude: i64) -> String {
    let sign = if magnitude < 0 { "-" } else { "" };
    let magnitude = magnitude.unsigned_abs();

    let scaled = |unit: u64| {
        #[allow(clippy::cast_precision_loss)]
        let value = magnitude as f64 / unit as f64;

        if magnitude < 10 * unit {
            format!("{value:.2}")
        } else if magnitude < 100 * unit {
            format!("{value:.1}")
        } else {
            format!("{value:.0}")
        }
    };

    match magnitude {
        1_000_000_000.. => format!("{sign}{}B$", scaled(1_000_000_000)),
        1_000_000.. => format!("{sign}{}M$", scaled(1_000_000)),
        1_000.. => format!("{sign}{}K$", scaled(1_000)),
        _ => format!("{sign}{magnitude}$"),
    }
}

/// Builds the quote endpoint URL for a symbol, escaping it into a path segment.
fn quote_url(symbol: &str) -> Url {
    let mut url = Url::parse(API_BASE_URL).expect("quote api base url");
    url.path_segments_mut()
        .expect("quote api base url can be a base")
        .extend(["stock", symbol, "quote"]);

    url
}

#[async_trait]
impl Plugin for Stock {
    fn new() -> Self {
        let client = http::build_client();
        let command = VegaCommand::new(".stock", "get trading stock information like price");

        Stock { client, command }
    }

    fn name() -> Name {
        Name::from("stock")
    }

    fn author() -> Author {
        Author::from("Mikkel Kroman <mk@maero.dk>")
    }

    fn version() -> Version {
        Version::from("0.1")
    }

    fn commands(&self) -> Vec<&VegaCommand> {
        vec![&self.command]
    }

    async fn handle_message(&self, message: &Message, client: &Client) -> Result<(), VegaError> {
        if let Command::PRIVMSG(ref target, ref user_message) = message.command
            && let Some(args) = self.command.parse(user_message)
        {
            if !self.command.allowed_in(Scope::of(target)) {
                return Ok(());
            }

            let symbol = args.trim();
            // An empty symbol is a no-op rather than an error.
            if symbol.is_empty() {
                return Ok(());
            }

            let Some(reply_to) = message.response_target() else {
                return Ok(());
            };

            match self.quote(symbol).await {
                Ok(quote) => {
                    client.send_privmsg(reply_to, quote.to_string())?;
                }
                Err(err) => {
                    warn!(error = ?err, "stock quote lookup failed");
                    client.send_privmsg(reply_to, format!("error: {err}"))?;
                }
            }
        }

        Ok(())
    }
}

impl Stock {
    /// Fetches the quote for the given symbol.
    async fn quote(&self, symbol: &str) -> Result<Quote, Error> {
        let url = quote_url(symbol);
        debug!(%url, "requesting quote");

        let response = self.client.get(url).send().await.map_err(Error::Request)?;
        let status = response.status();

        if !status.is_success() {
            return Err(Error::Status(status));
        }

        let text = response.text().await.map_err(Error::Request)?;
        let jd = &mut serde_json::Deserializer::from_str(&text);
        let quote: Quote = serde_path_to_error::deserialize(jd)
            .inspect_err(|err| error!(?err, %text, "could not parse quote response"))
            .map_err(Error::Deserialize)?;

        Ok(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humanize_picks_largest_unit() {
        assert_eq!(humanize(0), "0$");
        assert_eq!(humanize(999), "999$");
        assert_eq!(humanize(1000), "1.00K$");
        assert_eq!(humanize(15000), "15.0K$");
        assert_eq!(humanize(250_000), "250K$");
        assert_eq!(humanize(1_000_000), "1.00M$");
        assert_eq!(humanize(2_500_000_000), "2.50B$");
    }

    #[test]
    fn humanize_precision_decreases_within_unit() {
        assert_eq!(humanize(9_999), "10.00K$");
        assert_eq!(humanize(10_000), "10.0K$");
        assert_eq!(humanize(99_999), "100.0K$");
        assert_eq!(humanize(100_000), "100K$");
        assert_eq!(humanize(999_999), "1000K$");
    }

    #[test]
    fn humanize_mirrors_negative_sign() {
        assert_eq!(humanize(-999), "-999$");
        assert_eq!(humanize(-15000), "-15.0K$");
        assert_eq!(humanize(-2_500_000_000), "-2.50B$");
    }

    #[test]
    fn format_negative_change_keeps_own_sign() {
        let quote = Quote {
            symbol: "AAPL".to_string(),
            company_name: "Apple Inc.".to_string(),
            latest_source: "Close".to_string(),
            latest_price: 174.79,
            change: -1.23,
            change_percent: -0.0087,
            market_cap: 2_500_000_000_000,
            latest_volume: 15_000_000,
            pe_ratio: 28.5,
            ..Quote::default()
        };

        assert_eq!(
            quote.to_string(),
            "AAPL (Apple Inc.): Close 174.79 (-1.23, -0.87%), 2500B$ market cap, \
             15.0M$ volume, 28.50 P/E - https://iextrading.com/apps/stocks/AAPL"
        );
    }

    #[test]
    fn format_positive_change_gets_plus_prefix() {
        let quote = Quote {
            symbol: "F".to_string(),
            company_name: "Ford Motor Company".to_string(),
            latest_source: "IEX real time price".to_string(),
            latest_price: 11.0,
            change: 2.5,
            change_percent: 0.013,
            ..Quote::default()
        };

        let formatted = quote.to_string();

        assert!(formatted.contains("(+2.5, +1.30%)"), "{formatted}");
    }

    #[test]
    fn format_zero_change_has_no_sign() {
        let quote = Quote {
            symbol: "X".to_string(),
            ..Quote::default()
        };

        assert!(quote.to_string().contains("(0, 0.00%)"));
    }

    #[test]
    fn deserialize_is_tolerant() {
        let json = r#"{
            "symbol": "AAPL",
            "companyName": "Apple Inc.",
            "latestPrice": 174.79,
            "latestSource": "Close",
            "change": -1.23,
            "changePercent": -0.0087,
            "marketCap": 2500000000000,
            "latestVolume": 15000000,
            "peRatio": 28.5,
            "someFutureField": {"ignored": true}
        }"#;

        let quote: Quote = serde_json::from_str(json).expect("failed to deserialize");

        assert_eq!(quote.symbol, "AAPL");
        assert_eq!(quote.company_name, "Apple Inc.");
        assert_eq!(quote.market_cap, 2_500_000_000_000);
        // missing fields are left at their zero value
        assert_eq!(quote.sector, "");
        assert_eq!(quote.week52_high, 0.0);
        assert_eq!(quote.iex_volume, 0);
    }

    #[test]
    fn quote_url_escapes_path_segment() {
        assert_eq!(
            quote_url("AAPL").as_str(),
            "https://api.iextrading.com/1.0/stock/AAPL/quote"
        );
        assert_eq!(
            quote_url("A/B C").as_str(),
            "https://api.iextrading.com/1.0/stock/A%2FB%20C/quote"
        );
    }
}
