//! Behavior-driven tests for the daily-average resolvers.
//!
//! These tests verify HOW historical lookups behave: day-boundary
//! normalization, exact-timestamp bucket matching, currency tables, and the
//! injected EUR/USD conversion for the synthetic Tether pair.

use coinsheet_tests::{Arc, HistoryClient, MockHttpClient, QueryErrorKind, UtcDay};
use time::macros::{date, datetime};

const MAR_FIRST: i64 = 1_614_556_800; // 2021-03-01T00:00:00Z
const MAR_SECOND: i64 = 1_614_643_200; // 2021-03-02T00:00:00Z

// =============================================================================
// Simple Daily Average (GDAX candles)
// =============================================================================

#[tokio::test]
async fn when_the_exact_day_bucket_exists_the_open_close_midpoint_is_returned() {
    // Given: A candle series containing the requested day
    // Candle layout: [time, low, high, open, close, volume]
    let mock = Arc::new(MockHttpClient::with_body(format!(
        "[[{MAR_SECOND}, 4.0, 40.0, 35.0, 31.0, 900.0], [{MAR_FIRST}, 5.0, 35.0, 30.0, 20.0, 1200.5]]"
    )));
    let client = HistoryClient::with_http_client(mock.clone());

    // When: The average for 2021-03-01 is requested
    let value = client
        .daily_average_simple(UtcDay::from_date(date!(2021 - 03 - 01)), "Bitcoin")
        .await;

    // Then: (open + close) / 2 of the matching bucket is returned
    assert_eq!(value.expect("must resolve"), 25.0);

    // And: The query spans the day plus the daylight-saving buffer
    assert_eq!(
        mock.recorded_urls(),
        vec![String::from(
            "https://api.gdax.com/products/BTC-USD/candles?granularity=86400&start=2021-03-01&end=2021-03-02"
        )]
    );
}

#[tokio::test]
async fn when_only_a_neighboring_day_exists_the_lookup_reports_data_not_found() {
    // Given: A series whose nearest bucket is the following day
    let mock = Arc::new(MockHttpClient::with_body(format!(
        "[[{MAR_SECOND}, 4.0, 40.0, 35.0, 31.0, 900.0]]"
    )));
    let client = HistoryClient::with_http_client(mock);

    // When: 2021-03-01 is requested
    let error = client
        .daily_average_simple(UtcDay::from_date(date!(2021 - 03 - 01)), "Bitcoin")
        .await
        .expect_err("a near-miss bucket must not be substituted");

    // Then: The mismatch is a distinct error, never the wrong day's value
    assert_eq!(error.kind(), QueryErrorKind::DataNotFound);
    assert!(error.message().contains("2021-03-01"));
}

#[tokio::test]
async fn the_requested_day_is_taken_from_the_civil_date_of_the_input() {
    // Given: A caller whose local midnight sits in a UTC+5 zone
    let mock = Arc::new(MockHttpClient::with_body(format!(
        "[[{MAR_FIRST}, 5.0, 35.0, 30.0, 20.0, 1200.5]]"
    )));
    let client = HistoryClient::with_http_client(mock);

    // When: The day is built from that local instant
    let day = UtcDay::from_datetime(datetime!(2021-03-01 00:00 +5));
    let value = client.daily_average_simple(day, "Ether").await;

    // Then: The lookup still matches the midnight-UTC bucket of 2021-03-01
    assert_eq!(value.expect("must resolve"), 25.0);
}

#[tokio::test]
async fn currency_names_map_to_fixed_gdax_pairs() {
    // Given: A matching candle for each fetched currency
    for (currency, code) in [
        ("Bitcoin", "BTC-USD"),
        ("Ether", "ETH-USD"),
        ("EtherBitcoin", "ETH-BTC"),
    ] {
        let mock = Arc::new(MockHttpClient::with_body(format!(
            "[[{MAR_FIRST}, 5.0, 35.0, 30.0, 20.0, 1200.5]]"
        )));
        let client = HistoryClient::with_http_client(mock.clone());

        // When: The currency's average is requested
        client
            .daily_average_simple(UtcDay::from_date(date!(2021 - 03 - 01)), currency)
            .await
            .expect("must resolve");

        // Then: The fixed pair code appears in the URL
        assert!(
            mock.recorded_urls()[0].contains(&format!("/products/{code}/")),
            "{currency} should query {code}"
        );
    }
}

#[tokio::test]
async fn usd_is_an_identity_rate_with_no_network_call() {
    // Given: A mock that would fail if contacted
    let mock = Arc::new(MockHttpClient::failing("must not be called"));
    let client = HistoryClient::with_http_client(mock.clone());

    // When: The USD rate is requested
    let value = client
        .daily_average_simple(UtcDay::from_date(date!(2021 - 03 - 01)), "USD")
        .await;

    // Then: 1 is returned without touching the transport
    assert_eq!(value.expect("must resolve"), 1.0);
    assert!(mock.recorded_requests().is_empty());
}

// =============================================================================
// Volume-Weighted Daily Average (Kraken OHLC)
// =============================================================================

fn kraken_body(pair: &str, vwap: &str) -> String {
    // Bucket layout: [time, open, high, low, close, vwap, volume, count]
    format!(
        r#"{{"error":[],"result":{{"{pair}":[
            [{MAR_FIRST}, "230.1", "245.9", "228.4", "241.0", "{vwap}", "18000.2", 941],
            [{MAR_SECOND}, "241.0", "250.5", "238.0", "249.9", "246.13", "16500.8", 872]
        ],"last":{MAR_SECOND}}}}}"#
    )
}

#[tokio::test]
async fn when_the_exact_day_bucket_exists_the_vwap_cell_is_returned() {
    // Given: A full OHLC history (the endpoint offers no date filtering)
    let mock = Arc::new(MockHttpClient::with_body(kraken_body("XXBTZEUR", "237.55")));
    let client = HistoryClient::with_http_client(mock.clone());

    // When: The Bitcoin average for 2021-03-01 is requested
    let value = client
        .daily_average_volume_weighted(UtcDay::from_date(date!(2021 - 03 - 01)), "Bitcoin", None)
        .await;

    // Then: The vwap cell of the matching bucket is returned
    assert_eq!(value.expect("must resolve"), 237.55);
    assert_eq!(
        mock.recorded_urls(),
        vec![String::from(
            "https://api.kraken.com/0/public/OHLC?pair=XXBTZEUR&interval=1440"
        )]
    );
}

#[tokio::test]
async fn a_near_miss_kraken_bucket_is_data_not_found() {
    // Given: A history that skips the requested day
    let mock = Arc::new(MockHttpClient::with_body(format!(
        r#"{{"error":[],"result":{{"XETHZEUR":[[{MAR_SECOND}, "1", "2", "0.5", "1.5", "1.2", "10", 3]],"last":{MAR_SECOND}}}}}"#
    )));
    let client = HistoryClient::with_http_client(mock);

    // When: 2021-03-01 is requested
    let error = client
        .daily_average_volume_weighted(UtcDay::from_date(date!(2021 - 03 - 01)), "Ether", None)
        .await
        .expect_err("must fail");

    // Then: The lookup refuses the nearest bucket
    assert_eq!(error.kind(), QueryErrorKind::DataNotFound);
}

#[tokio::test]
async fn tether_results_are_converted_with_the_injected_rate() {
    // Given: A USD-quoted Tether history and an external EUR/USD rate
    let mock = Arc::new(MockHttpClient::with_body(kraken_body("USDTZUSD", "1.2006")));
    let client = HistoryClient::with_http_client(mock);

    // When: The Tether average is requested with the rate injected
    let value = client
        .daily_average_volume_weighted(
            UtcDay::from_date(date!(2021 - 03 - 01)),
            "Tether",
            Some(1.2),
        )
        .await;

    // Then: The USD vwap is divided by the rate
    assert_eq!(value.expect("must resolve"), 1.2006 / 1.2);
}

#[tokio::test]
async fn tether_without_an_injected_rate_fails_before_any_network_call() {
    // Given: A mock that would fail if contacted
    let mock = Arc::new(MockHttpClient::failing("must not be called"));
    let client = HistoryClient::with_http_client(mock.clone());

    // When: A Tether lookup omits the rate
    let error = client
        .daily_average_volume_weighted(UtcDay::from_date(date!(2021 - 03 - 01)), "Tether", None)
        .await
        .expect_err("must fail");

    // Then: The caller contract violation is reported without a fetch
    assert_eq!(error.kind(), QueryErrorKind::InvalidRequest);
    assert!(mock.recorded_requests().is_empty());
}

#[tokio::test]
async fn an_in_band_kraken_error_surfaces_as_malformed_response() {
    // Given: A 200 body whose result lacks the pair series
    let mock = Arc::new(MockHttpClient::with_body(
        r#"{"error":["EQuery:Unknown asset pair"],"result":{}}"#,
    ));
    let client = HistoryClient::with_http_client(mock);

    // When: The lookup runs
    let error = client
        .daily_average_volume_weighted(UtcDay::from_date(date!(2021 - 03 - 01)), "Bitcoin", None)
        .await
        .expect_err("must fail");

    // Then: The upstream error text is carried in the message
    assert_eq!(error.kind(), QueryErrorKind::MalformedResponse);
    assert!(error.message().contains("EQuery:Unknown asset pair"));
}

#[tokio::test]
async fn euro_is_an_identity_rate_and_unknown_currencies_are_rejected() {
    // Given: A mock that would fail if contacted
    let mock = Arc::new(MockHttpClient::failing("must not be called"));
    let client = HistoryClient::with_http_client(mock.clone());
    let day = UtcDay::from_date(date!(2021 - 03 - 01));

    // When / Then: Euro returns 1 directly
    let value = client.daily_average_volume_weighted(day, "Euro", None).await;
    assert_eq!(value.expect("must resolve"), 1.0);

    // When / Then: An unknown name is a distinct error, not NaN
    let error = client
        .daily_average_volume_weighted(day, "Dogecoin", None)
        .await
        .expect_err("must fail");
    assert_eq!(error.kind(), QueryErrorKind::InvalidCurrency);
    assert!(mock.recorded_requests().is_empty());
}
