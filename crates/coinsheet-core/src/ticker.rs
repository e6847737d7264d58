//! Current-value ticker resolver.

use std::sync::Arc;

use serde_json::Value;

use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::registry;
use crate::{Exchange, Metric, Pair, QueryError};

/// Resolves (exchange, metric, pair) queries against the live exchange APIs.
///
/// Each call is one registry lookup plus one HTTP GET; nothing is cached or
/// retried, so identical calls against an unchanged upstream body return
/// identical numbers.
#[derive(Clone)]
pub struct TickerClient {
    http: Arc<dyn HttpClient>,
}

impl TickerClient {
    pub fn new() -> Self {
        Self {
            http: Arc::new(ReqwestHttpClient::new()),
        }
    }

    pub fn with_http_client(http: Arc<dyn HttpClient>) -> Self {
        Self { http }
    }

    /// Fetch one ticker metric.
    ///
    /// Exchange and metric names are case-insensitive and synonym-aware; the
    /// pair is interpolated into the request URL verbatim, so callers supply
    /// it in the exchange's native format.
    pub async fn ticker(
        &self,
        exchange: &str,
        metric: &str,
        pair: &str,
    ) -> Result<f64, QueryError> {
        let exchange_id: Exchange = exchange.parse()?;
        let metric_id: Metric = metric.parse()?;
        let pair = Pair::parse(pair)?;

        let entry = registry::resolve(exchange_id, metric_id)
            .ok_or_else(|| QueryError::unsupported_metric(exchange_id, metric))?;

        let url = entry.endpoint.build(&pair);
        let response = self
            .http
            .execute(HttpRequest::get(url))
            .await
            .map_err(|error| {
                QueryError::transport(format!("{exchange_id} transport error: {}", error.message()))
            })?;

        if !response.is_success() {
            return Err(QueryError::transport(format!(
                "{exchange_id} returned status {}",
                response.status
            )));
        }

        let body: Value = serde_json::from_str(&response.body).map_err(|error| {
            QueryError::transport(format!("{exchange_id} returned a non-JSON body: {error}"))
        })?;

        let node = registry::walk(&body, entry.path, &pair).ok_or_else(|| {
            QueryError::malformed(format!(
                "{exchange_id} response is missing the {metric_id} field for pair '{pair}'"
            ))
        })?;

        entry.derive.apply(node).ok_or_else(|| {
            QueryError::malformed(format!(
                "{exchange_id} returned a non-numeric {metric_id} value for pair '{pair}'"
            ))
        })
    }

    /// Last traded ETH/USD price on GDAX. Shorthand for
    /// `ticker("GDAX", "last", "ETH-USD")`.
    pub async fn eth_usd_last(&self) -> Result<f64, QueryError> {
        self.ticker("GDAX", "last", "ETH-USD").await
    }
}

impl Default for TickerClient {
    fn default() -> Self {
        Self::new()
    }
}
