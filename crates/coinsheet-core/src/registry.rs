//! Static lookup table from (exchange, metric) to endpoint, response path,
//! and derivation.
//!
//! Each supported combination resolves to exactly one [`RegistryEntry`];
//! unsupported combinations resolve to `None` and are surfaced by the ticker
//! resolver as `UnsupportedQuery`. Endpoints, field names, and array indices
//! vary per exchange and sometimes per metric, which is why the table rather
//! than the control flow carries them.

use serde_json::Value;

use crate::{Exchange, Metric, Pair};

/// How the trading pair is substituted into the endpoint URL.
///
/// Substitution is verbatim: the pair code is inserted with no escaping or
/// re-casing, so callers supply it in the exchange's native format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointTemplate {
    /// The pair is interpolated between `base` and `suffix`.
    Interpolated {
        base: &'static str,
        suffix: &'static str,
    },
    /// Fixed URL; the pair selects a key inside the response instead.
    Fixed(&'static str),
}

impl EndpointTemplate {
    pub fn build(&self, pair: &Pair) -> String {
        match self {
            Self::Interpolated { base, suffix } => format!("{base}{}{suffix}", pair.as_str()),
            Self::Fixed(url) => (*url).to_owned(),
        }
    }
}

/// One step of the accessor path into a parsed response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStep {
    /// Fixed object key.
    Key(&'static str),
    /// Object key equal to the request's pair code.
    PairKey,
    /// Object key equal to the lowercased pair code.
    PairKeyLower,
    /// Positional array element.
    Index(usize),
}

/// Closed set of value computations applied to the node at the end of the
/// accessor path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Derivation {
    /// The node is the value itself.
    Identity,
    /// The node is a positional array; take one cell.
    IndexedLookup { index: usize },
    /// The node is an object; average two of its fields, rounded to 8
    /// decimal places.
    AverageOfHighLow {
        high: &'static str,
        low: &'static str,
    },
}

impl Derivation {
    /// Apply the derivation, interpreting cells as numbers-or-decimal-strings.
    pub fn apply(&self, node: &Value) -> Option<f64> {
        match self {
            Self::Identity => coerce_number(node),
            Self::IndexedLookup { index } => coerce_number(node.get(*index)?),
            Self::AverageOfHighLow { high, low } => {
                let high = coerce_number(node.get(*high)?)?;
                let low = coerce_number(node.get(*low)?)?;
                Some(round8((high + low) / 2.0))
            }
        }
    }
}

/// Static descriptor of how to query and parse one exchange's response for
/// one metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryEntry {
    pub endpoint: EndpointTemplate,
    pub path: &'static [PathStep],
    pub derive: Derivation,
}

const GDAX_TICKER: EndpointTemplate = EndpointTemplate::Interpolated {
    base: "https://api.gdax.com/products/",
    suffix: "/ticker",
};
const GDAX_STATS: EndpointTemplate = EndpointTemplate::Interpolated {
    base: "https://api.gdax.com/products/",
    suffix: "/stats",
};
const POLONIEX_TICKER: EndpointTemplate =
    EndpointTemplate::Fixed("https://poloniex.com/public?command=returnTicker");
const KRAKEN_TICKER: EndpointTemplate = EndpointTemplate::Interpolated {
    base: "https://api.kraken.com/0/public/Ticker?pair=",
    suffix: "",
};
const LIQUI_TICKER: EndpointTemplate = EndpointTemplate::Interpolated {
    base: "https://api.liqui.io/api/3/ticker/",
    suffix: "",
};
const BITTREX_SUMMARY: EndpointTemplate = EndpointTemplate::Interpolated {
    base: "https://bittrex.com/api/v1.1/public/getmarketsummary?market=",
    suffix: "",
};
const ETHERSCAN_PRICE: EndpointTemplate =
    EndpointTemplate::Fixed("https://api.etherscan.io/api?module=stats&action=ethprice");
const CMC_TICKER: EndpointTemplate = EndpointTemplate::Interpolated {
    base: "https://api.coinmarketcap.com/v1/ticker/",
    suffix: "",
};

const fn entry(
    endpoint: EndpointTemplate,
    path: &'static [PathStep],
    derive: Derivation,
) -> RegistryEntry {
    RegistryEntry {
        endpoint,
        path,
        derive,
    }
}

use Derivation::{AverageOfHighLow, Identity, IndexedLookup};
use PathStep::{Index, Key, PairKey, PairKeyLower};

/// The full support matrix. Kraken serves every metric as a positional array
/// where cell 0 is the current value and cell 1 the 24h value; its `average`
/// is the 24h volume-weighted price. GDAX splits metrics across two
/// endpoints. Liqui is the one exchange with a literal `avg` field.
const ENTRIES: &[(Exchange, Metric, RegistryEntry)] = &[
    // GDAX: flat objects, /ticker for current values, /stats for 24h stats.
    (Exchange::Gdax, Metric::Last, entry(GDAX_TICKER, &[Key("price")], Identity)),
    (Exchange::Gdax, Metric::Ask, entry(GDAX_TICKER, &[Key("ask")], Identity)),
    (Exchange::Gdax, Metric::Bid, entry(GDAX_TICKER, &[Key("bid")], Identity)),
    (Exchange::Gdax, Metric::Volume, entry(GDAX_TICKER, &[Key("volume")], Identity)),
    (Exchange::Gdax, Metric::High, entry(GDAX_STATS, &[Key("high")], Identity)),
    (Exchange::Gdax, Metric::Low, entry(GDAX_STATS, &[Key("low")], Identity)),
    (
        Exchange::Gdax,
        Metric::Volume30Day,
        entry(GDAX_STATS, &[Key("volume_30day")], Identity),
    ),
    (
        Exchange::Gdax,
        Metric::Average,
        entry(GDAX_STATS, &[], AverageOfHighLow { high: "high", low: "low" }),
    ),
    // Poloniex: one fixed endpoint returning every market keyed by pair.
    (Exchange::Poloniex, Metric::Last, entry(POLONIEX_TICKER, &[PairKey, Key("last")], Identity)),
    (
        Exchange::Poloniex,
        Metric::Ask,
        entry(POLONIEX_TICKER, &[PairKey, Key("lowestAsk")], Identity),
    ),
    (
        Exchange::Poloniex,
        Metric::Bid,
        entry(POLONIEX_TICKER, &[PairKey, Key("highestBid")], Identity),
    ),
    (
        Exchange::Poloniex,
        Metric::High,
        entry(POLONIEX_TICKER, &[PairKey, Key("high24hr")], Identity),
    ),
    (
        Exchange::Poloniex,
        Metric::Low,
        entry(POLONIEX_TICKER, &[PairKey, Key("low24hr")], Identity),
    ),
    (
        Exchange::Poloniex,
        Metric::Volume,
        entry(POLONIEX_TICKER, &[PairKey, Key("baseVolume")], Identity),
    ),
    (
        Exchange::Poloniex,
        Metric::QuoteVolume,
        entry(POLONIEX_TICKER, &[PairKey, Key("quoteVolume")], Identity),
    ),
    (
        Exchange::Poloniex,
        Metric::PercentChange,
        entry(POLONIEX_TICKER, &[PairKey, Key("percentChange")], Identity),
    ),
    (
        Exchange::Poloniex,
        Metric::Average,
        entry(
            POLONIEX_TICKER,
            &[PairKey],
            AverageOfHighLow { high: "high24hr", low: "low24hr" },
        ),
    ),
    // Kraken: result.{pair}.{field} is a positional array, index 0 current,
    // index 1 last 24h.
    (
        Exchange::Kraken,
        Metric::Last,
        entry(KRAKEN_TICKER, &[Key("result"), PairKey, Key("c")], IndexedLookup { index: 0 }),
    ),
    (
        Exchange::Kraken,
        Metric::Ask,
        entry(KRAKEN_TICKER, &[Key("result"), PairKey, Key("a")], IndexedLookup { index: 0 }),
    ),
    (
        Exchange::Kraken,
        Metric::Bid,
        entry(KRAKEN_TICKER, &[Key("result"), PairKey, Key("b")], IndexedLookup { index: 0 }),
    ),
    (
        Exchange::Kraken,
        Metric::High,
        entry(KRAKEN_TICKER, &[Key("result"), PairKey, Key("h")], IndexedLookup { index: 1 }),
    ),
    (
        Exchange::Kraken,
        Metric::Low,
        entry(KRAKEN_TICKER, &[Key("result"), PairKey, Key("l")], IndexedLookup { index: 1 }),
    ),
    // 24h volume-weighted price, not a high/low midpoint.
    (
        Exchange::Kraken,
        Metric::Average,
        entry(KRAKEN_TICKER, &[Key("result"), PairKey, Key("p")], IndexedLookup { index: 1 }),
    ),
    (
        Exchange::Kraken,
        Metric::Volume,
        entry(KRAKEN_TICKER, &[Key("result"), PairKey, Key("v")], IndexedLookup { index: 1 }),
    ),
    // Liqui: response keyed by pair, lowercase field names, literal avg field.
    (Exchange::Liqui, Metric::Last, entry(LIQUI_TICKER, &[PairKey, Key("last")], Identity)),
    (Exchange::Liqui, Metric::Ask, entry(LIQUI_TICKER, &[PairKey, Key("sell")], Identity)),
    (Exchange::Liqui, Metric::Bid, entry(LIQUI_TICKER, &[PairKey, Key("buy")], Identity)),
    (Exchange::Liqui, Metric::High, entry(LIQUI_TICKER, &[PairKey, Key("high")], Identity)),
    (Exchange::Liqui, Metric::Low, entry(LIQUI_TICKER, &[PairKey, Key("low")], Identity)),
    (Exchange::Liqui, Metric::Average, entry(LIQUI_TICKER, &[PairKey, Key("avg")], Identity)),
    (Exchange::Liqui, Metric::Volume, entry(LIQUI_TICKER, &[PairKey, Key("vol")], Identity)),
    (
        Exchange::Liqui,
        Metric::QuoteVolume,
        entry(LIQUI_TICKER, &[PairKey, Key("vol_cur")], Identity),
    ),
    // Bittrex: market summary array with a single element.
    (
        Exchange::Bittrex,
        Metric::Last,
        entry(BITTREX_SUMMARY, &[Key("result"), Index(0), Key("Last")], Identity),
    ),
    (
        Exchange::Bittrex,
        Metric::Ask,
        entry(BITTREX_SUMMARY, &[Key("result"), Index(0), Key("Ask")], Identity),
    ),
    (
        Exchange::Bittrex,
        Metric::Bid,
        entry(BITTREX_SUMMARY, &[Key("result"), Index(0), Key("Bid")], Identity),
    ),
    (
        Exchange::Bittrex,
        Metric::High,
        entry(BITTREX_SUMMARY, &[Key("result"), Index(0), Key("High")], Identity),
    ),
    (
        Exchange::Bittrex,
        Metric::Low,
        entry(BITTREX_SUMMARY, &[Key("result"), Index(0), Key("Low")], Identity),
    ),
    (
        Exchange::Bittrex,
        Metric::Volume,
        entry(BITTREX_SUMMARY, &[Key("result"), Index(0), Key("BaseVolume")], Identity),
    ),
    // Bittrex names the quote-currency volume plain "Volume".
    (
        Exchange::Bittrex,
        Metric::QuoteVolume,
        entry(BITTREX_SUMMARY, &[Key("result"), Index(0), Key("Volume")], Identity),
    ),
    (
        Exchange::Bittrex,
        Metric::Average,
        entry(
            BITTREX_SUMMARY,
            &[Key("result"), Index(0)],
            AverageOfHighLow { high: "High", low: "Low" },
        ),
    ),
    // Etherscan price oracle: the pair itself is the field name, lowercased.
    (
        Exchange::Etherscan,
        Metric::Last,
        entry(ETHERSCAN_PRICE, &[Key("result"), PairKeyLower], Identity),
    ),
    // Coinmarketcap: one currency slug per request, single-element array.
    (
        Exchange::Coinmarketcap,
        Metric::Last,
        entry(CMC_TICKER, &[Index(0), Key("price_usd")], Identity),
    ),
    (
        Exchange::Coinmarketcap,
        Metric::Volume,
        entry(CMC_TICKER, &[Index(0), Key("24h_volume_usd")], Identity),
    ),
    (
        Exchange::Coinmarketcap,
        Metric::PercentChange,
        entry(CMC_TICKER, &[Index(0), Key("percent_change_24h")], Identity),
    ),
];

/// Resolve the registry entry for an (exchange, metric) combination.
pub fn resolve(exchange: Exchange, metric: Metric) -> Option<&'static RegistryEntry> {
    ENTRIES
        .iter()
        .find(|(e, m, _)| *e == exchange && *m == metric)
        .map(|(_, _, entry)| entry)
}

/// Every (exchange, metric, entry) row, for coverage checks.
pub fn entries() -> impl Iterator<Item = (Exchange, Metric, &'static RegistryEntry)> {
    ENTRIES.iter().map(|(e, m, entry)| (*e, *m, entry))
}

/// Follow the accessor path into a parsed response body.
pub fn walk<'a>(body: &'a Value, path: &[PathStep], pair: &Pair) -> Option<&'a Value> {
    let mut node = body;
    for step in path {
        node = match step {
            PathStep::Key(key) => node.get(key)?,
            PathStep::PairKey => node.get(pair.as_str())?,
            PathStep::PairKeyLower => node.get(pair.as_str().to_ascii_lowercase().as_str())?,
            PathStep::Index(index) => node.get(index)?,
        };
    }
    Some(node)
}

/// Interpret a JSON node as a price/volume number. Exchanges mix JSON
/// numbers and decimal strings for the same fields.
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Round to 8 decimal places. Applied to derived averages only; looked-up
/// values pass through unrounded.
pub fn round8(value: f64) -> f64 {
    (value * 1e8).round() / 1e8
}
