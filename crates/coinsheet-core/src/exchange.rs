use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Canonical identifiers of the supported exchanges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exchange {
    Gdax,
    Poloniex,
    Kraken,
    Liqui,
    Bittrex,
    Etherscan,
    Coinmarketcap,
}

impl Exchange {
    pub const ALL: [Self; 7] = [
        Self::Gdax,
        Self::Poloniex,
        Self::Kraken,
        Self::Liqui,
        Self::Bittrex,
        Self::Etherscan,
        Self::Coinmarketcap,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gdax => "gdax",
            Self::Poloniex => "poloniex",
            Self::Kraken => "kraken",
            Self::Liqui => "liqui",
            Self::Bittrex => "bittrex",
            Self::Etherscan => "etherscan",
            Self::Coinmarketcap => "coinmarketcap",
        }
    }
}

impl Display for Exchange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Exchange {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "gdax" => Ok(Self::Gdax),
            "poloniex" => Ok(Self::Poloniex),
            "kraken" => Ok(Self::Kraken),
            "liqui" => Ok(Self::Liqui),
            "bittrex" => Ok(Self::Bittrex),
            "etherscan" => Ok(Self::Etherscan),
            "coinmarketcap" | "cmc" => Ok(Self::Coinmarketcap),
            other => Err(ValidationError::UnknownExchange {
                value: other.to_owned(),
            }),
        }
    }
}
