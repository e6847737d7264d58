//! Daily-average resolvers over exchange candle APIs.
//!
//! Both resolvers key their lookup on a currency name rather than a raw pair
//! code, fetch one day-granularity series, and locate the bucket whose
//! timestamp exactly equals midnight UTC of the requested day. A near-miss
//! bucket is `DataNotFound`, never silently substituted; exact equality is
//! the guard against timezone-induced off-by-one-day answers.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use time::Duration;

use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::{QueryError, UtcDay};

/// Candle cell that may arrive as a JSON number or a decimal string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }

    fn as_timestamp(&self) -> Option<i64> {
        let value = self.as_f64()?;
        (value.fract() == 0.0).then_some(value as i64)
    }
}

/// GDAX daily candle: `[time, low, high, open, close, volume]`.
#[derive(Debug, Clone, Deserialize)]
struct GdaxDailyCandle(
    RawNumber,
    RawNumber,
    RawNumber,
    RawNumber,
    RawNumber,
    RawNumber,
);

impl GdaxDailyCandle {
    fn timestamp(&self) -> Option<i64> {
        self.0.as_timestamp()
    }

    fn open(&self) -> Option<f64> {
        self.3.as_f64()
    }

    fn close(&self) -> Option<f64> {
        self.4.as_f64()
    }
}

/// Kraken OHLC bucket: `[time, open, high, low, close, vwap, volume, count]`.
#[derive(Debug, Clone, Deserialize)]
struct KrakenOhlcBucket(
    RawNumber,
    RawNumber,
    RawNumber,
    RawNumber,
    RawNumber,
    RawNumber,
    RawNumber,
    RawNumber,
);

impl KrakenOhlcBucket {
    fn timestamp(&self) -> Option<i64> {
        self.0.as_timestamp()
    }

    fn vwap(&self) -> Option<f64> {
        self.5.as_f64()
    }
}

/// Resolves single-day average prices from exchange candle endpoints.
#[derive(Clone)]
pub struct HistoryClient {
    http: Arc<dyn HttpClient>,
}

impl HistoryClient {
    pub fn new() -> Self {
        Self {
            http: Arc::new(ReqwestHttpClient::new()),
        }
    }

    pub fn with_http_client(http: Arc<dyn HttpClient>) -> Self {
        Self { http }
    }

    /// Plain (open + close) / 2 average against USD for one day, from GDAX
    /// daily candles.
    ///
    /// `currency` is a display name, not a pair code; `"USD"` is an identity
    /// rate and returns 1 without a network call.
    pub async fn daily_average_simple(
        &self,
        day: UtcDay,
        currency: &str,
    ) -> Result<f64, QueryError> {
        let code = match currency {
            "Bitcoin" => "BTC-USD",
            "Ether" => "ETH-USD",
            "EtherBitcoin" => "ETH-BTC",
            "USD" => return Ok(1.0),
            other => return Err(QueryError::invalid_currency(other)),
        };

        let expected = day.unix_timestamp();
        // 26h window: the requested day plus a buffer so daylight-saving
        // shifts cannot push the bucket outside the range.
        let end = UtcDay::from_datetime(day.midnight_utc() + Duration::hours(26));
        let url = format!(
            "https://api.gdax.com/products/{code}/candles?granularity=86400&start={}&end={}",
            day.format_iso(),
            end.format_iso()
        );

        let body = self.fetch_json(url, "gdax").await?;
        let candles: Vec<GdaxDailyCandle> = serde_json::from_value(body).map_err(|error| {
            QueryError::malformed(format!("gdax candle series did not parse: {error}"))
        })?;

        let bucket = candles
            .iter()
            .find(|candle| candle.timestamp() == Some(expected))
            .ok_or_else(|| {
                QueryError::data_not_found(format!("gdax returned no daily candle for {day}"))
            })?;

        let open = bucket
            .open()
            .ok_or_else(|| QueryError::malformed("gdax candle open cell is not numeric"))?;
        let close = bucket
            .close()
            .ok_or_else(|| QueryError::malformed("gdax candle close cell is not numeric"))?;
        Ok((open + close) / 2.0)
    }

    /// Volume-weighted average against EUR for one day, from Kraken OHLC
    /// buckets.
    ///
    /// `"Euro"` is an identity rate. `"Tether"` is served by the USD-quoted
    /// USDTZUSD pair, so it requires `eur_usd_rate`; the rate is injected by
    /// the caller and never fetched here.
    pub async fn daily_average_volume_weighted(
        &self,
        day: UtcDay,
        currency: &str,
        eur_usd_rate: Option<f64>,
    ) -> Result<f64, QueryError> {
        let code = match currency {
            "Bitcoin" => "XXBTZEUR",
            "Ether" => "XETHZEUR",
            "EtherBitcoin" => "XETHXXBT",
            "Tether" => "USDTZUSD",
            "Euro" => return Ok(1.0),
            other => return Err(QueryError::invalid_currency(other)),
        };

        let rate = if code == "USDTZUSD" {
            let rate = eur_usd_rate.ok_or_else(|| {
                QueryError::invalid_request("Tether lookups require an injected EUR/USD rate")
            })?;
            if !rate.is_finite() || rate <= 0.0 {
                return Err(QueryError::invalid_request(format!(
                    "EUR/USD rate {rate} is not a positive number"
                )));
            }
            Some(rate)
        } else {
            None
        };

        let expected = day.unix_timestamp();
        let url = format!("https://api.kraken.com/0/public/OHLC?pair={code}&interval=1440");
        let body = self.fetch_json(url, "kraken").await?;

        let series = body
            .get("result")
            .and_then(|result| result.get(code))
            .cloned()
            .ok_or_else(|| match body.get("error") {
                Some(errors) if errors.as_array().is_some_and(|list| !list.is_empty()) => {
                    QueryError::malformed(format!(
                        "kraken response is missing the {code} series; upstream error: {errors}"
                    ))
                }
                _ => QueryError::malformed(format!(
                    "kraken response is missing the {code} series"
                )),
            })?;
        let buckets: Vec<KrakenOhlcBucket> = serde_json::from_value(series).map_err(|error| {
            QueryError::malformed(format!("kraken OHLC series did not parse: {error}"))
        })?;

        // The endpoint offers no date filtering; scan the full series.
        let bucket = buckets
            .iter()
            .find(|bucket| bucket.timestamp() == Some(expected))
            .ok_or_else(|| {
                QueryError::data_not_found(format!("kraken returned no daily bucket for {day}"))
            })?;

        let vwap = bucket
            .vwap()
            .ok_or_else(|| QueryError::malformed("kraken vwap cell is not numeric"))?;
        Ok(match rate {
            Some(rate) => vwap / rate,
            None => vwap,
        })
    }

    async fn fetch_json(&self, url: String, exchange: &str) -> Result<Value, QueryError> {
        let response = self
            .http
            .execute(HttpRequest::get(url))
            .await
            .map_err(|error| {
                QueryError::transport(format!("{exchange} transport error: {}", error.message()))
            })?;

        if !response.is_success() {
            return Err(QueryError::transport(format!(
                "{exchange} returned status {}",
                response.status
            )));
        }

        serde_json::from_str(&response.body).map_err(|error| {
            QueryError::transport(format!("{exchange} returned a non-JSON body: {error}"))
        })
    }
}

impl Default for HistoryClient {
    fn default() -> Self {
        Self::new()
    }
}
