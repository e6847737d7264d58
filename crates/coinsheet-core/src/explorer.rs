//! Block-explorer link classification for spreadsheet cell values.
//!
//! Cell reading and writing belong to the hosting spreadsheet; this module is
//! the pure part: deciding what kind of ledger identifier a cell value is and
//! rendering the `=HYPERLINK(...)` formula that replaces it. Classification
//! is length-based: a `0x` prefix plus 66 characters is an Ethereum
//! transaction hash, 42 an Ethereum address, and a bare 64-character value a
//! Bitcoin transaction hash.

use std::fmt::{Display, Formatter};

/// A cell value recognized as a ledger identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExplorerLink {
    EthereumTransaction(String),
    EthereumAddress(String),
    BitcoinTransaction(String),
}

impl ExplorerLink {
    /// Classify a cell value. Values that match no known identifier shape
    /// (including blanks) return `None` and are left untouched by the host.
    pub fn classify(value: &str) -> Option<Self> {
        if let Some(stripped) = value.strip_prefix("0x") {
            match stripped.len() {
                64 => Some(Self::EthereumTransaction(value.to_owned())),
                40 => Some(Self::EthereumAddress(value.to_owned())),
                _ => None,
            }
        } else if value.len() == 64 {
            Some(Self::BitcoinTransaction(value.to_owned()))
        } else {
            None
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::EthereumTransaction(id) | Self::EthereumAddress(id) | Self::BitcoinTransaction(id) => id,
        }
    }

    pub fn url(&self) -> String {
        match self {
            Self::EthereumTransaction(id) => format!("https://etherscan.io/tx/{id}"),
            Self::EthereumAddress(id) => format!("https://etherscan.io/address/{id}"),
            Self::BitcoinTransaction(id) => format!("https://tradeblock.com/bitcoin/tx/{id}"),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::EthereumTransaction(id) => format!("ETH-TXID: {id}"),
            Self::EthereumAddress(id) => format!("ETH-ADDR: {id}"),
            Self::BitcoinTransaction(id) => format!("BTC-TXID: {id}"),
        }
    }

    /// Render the spreadsheet formula replacing the cell value.
    ///
    /// `separator` is the host locale's argument separator (`,` in most
    /// locales, `;` where the comma is the decimal mark).
    pub fn hyperlink_formula(&self, separator: char) -> String {
        format!(
            "=HYPERLINK(\"{}\"{separator}\"{}\")",
            self.url(),
            self.label()
        )
    }
}

impl Display for ExplorerLink {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}
