use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Logical ticker metrics understood by the registry.
///
/// Parsing is case-insensitive and synonym-aware; every synonym of a metric
/// resolves to the same variant and therefore the same registry entry. Which
/// metrics an exchange actually serves is decided by the registry, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Last,
    Ask,
    Bid,
    High,
    Low,
    /// Daily average. Literal field on some exchanges, (high+low)/2 on others.
    Average,
    /// Volume in the base currency over the last 24h.
    Volume,
    /// Volume in the quote currency over the last 24h.
    QuoteVolume,
    Volume30Day,
    PercentChange,
}

impl Metric {
    pub const ALL: [Self; 10] = [
        Self::Last,
        Self::Ask,
        Self::Bid,
        Self::High,
        Self::Low,
        Self::Average,
        Self::Volume,
        Self::QuoteVolume,
        Self::Volume30Day,
        Self::PercentChange,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Last => "last",
            Self::Ask => "ask",
            Self::Bid => "bid",
            Self::High => "high",
            Self::Low => "low",
            Self::Average => "average",
            Self::Volume => "volume",
            Self::QuoteVolume => "quote_volume",
            Self::Volume30Day => "volume_30day",
            Self::PercentChange => "percent_change",
        }
    }
}

impl Display for Metric {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "LAST" | "PRICE" => Ok(Self::Last),
            "ASK" | "SELL" => Ok(Self::Ask),
            "BID" | "BUY" => Ok(Self::Bid),
            "HIGH" => Ok(Self::High),
            "LOW" => Ok(Self::Low),
            "AVG" | "AVERAGE" => Ok(Self::Average),
            "VOL" | "VOLUME" | "BASEVOLUME" => Ok(Self::Volume),
            "QUOTEVOLUME" | "VOLUME_CURRENCY" | "VOL_CUR" => Ok(Self::QuoteVolume),
            "VOL_30D" | "VOLUME_30DAY" => Ok(Self::Volume30Day),
            "PERCENTCHANGE" => Ok(Self::PercentChange),
            other => Err(ValidationError::UnknownMetric {
                value: other.to_owned(),
            }),
        }
    }
}
