use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::exchange::Exchange;

/// Input validation errors surfaced before any network call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("trading pair cannot be empty")]
    EmptyPair,
    #[error("trading pair contains invalid character '{ch}' at index {index}")]
    PairInvalidChar { ch: char, index: usize },

    #[error("unknown exchange '{value}', expected one of gdax, poloniex, kraken, liqui, bittrex, etherscan, coinmarketcap")]
    UnknownExchange { value: String },
    #[error("unknown metric '{value}'")]
    UnknownMetric { value: String },
}

/// Classification of a failed ticker or history query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryErrorKind {
    /// Exchange or metric name the registry does not know. Detected before
    /// any network call.
    UnsupportedQuery,
    /// Non-success HTTP status, transport failure, or a body that is not JSON.
    Transport,
    /// JSON parsed, but the field the registry expects is absent. Usually
    /// means the upstream API shape changed.
    MalformedResponse,
    /// The requested day's bucket is absent from the returned series.
    DataNotFound,
    /// Currency name the history resolvers do not know.
    InvalidCurrency,
    /// Caller contract violation (bad pair string, missing injected rate).
    InvalidRequest,
}

/// Structured error returned by the ticker and history resolvers.
///
/// Errors are surfaced synchronously to the caller; nothing is retried or
/// swallowed internally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError {
    kind: QueryErrorKind,
    message: String,
    retryable: bool,
}

impl QueryError {
    pub fn unsupported_exchange(name: &str) -> Self {
        Self {
            kind: QueryErrorKind::UnsupportedQuery,
            message: format!("exchange '{name}' is not supported"),
            retryable: false,
        }
    }

    pub fn unsupported_metric(exchange: Exchange, name: &str) -> Self {
        Self {
            kind: QueryErrorKind::UnsupportedQuery,
            message: format!("metric '{name}' is not supported on {exchange}"),
            retryable: false,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: QueryErrorKind::Transport,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            kind: QueryErrorKind::MalformedResponse,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn data_not_found(message: impl Into<String>) -> Self {
        Self {
            kind: QueryErrorKind::DataNotFound,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn invalid_currency(name: &str) -> Self {
        Self {
            kind: QueryErrorKind::InvalidCurrency,
            message: format!("currency '{name}' is not supported"),
            retryable: false,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: QueryErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> QueryErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            QueryErrorKind::UnsupportedQuery => "query.unsupported",
            QueryErrorKind::Transport => "query.transport",
            QueryErrorKind::MalformedResponse => "query.malformed_response",
            QueryErrorKind::DataNotFound => "query.data_not_found",
            QueryErrorKind::InvalidCurrency => "query.invalid_currency",
            QueryErrorKind::InvalidRequest => "query.invalid_request",
        }
    }
}

impl Display for QueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for QueryError {}

impl From<ValidationError> for QueryError {
    fn from(error: ValidationError) -> Self {
        match error {
            ValidationError::UnknownExchange { value } => Self::unsupported_exchange(&value),
            ValidationError::UnknownMetric { value } => Self {
                kind: QueryErrorKind::UnsupportedQuery,
                message: format!("metric '{value}' is not supported"),
                retryable: false,
            },
            other => Self::invalid_request(other.to_string()),
        }
    }
}
