//! Core contracts for coinsheet.
//!
//! This crate contains:
//! - The static (exchange, metric) registry and its derivation rules
//! - Ticker and daily-average resolvers over a pluggable HTTP transport
//! - Domain newtypes for trading pairs and UTC-pinned calendar days
//! - Block-explorer link classification for spreadsheet hosts

pub mod domain;
pub mod error;
pub mod exchange;
pub mod explorer;
pub mod history;
pub mod http_client;
pub mod metric;
pub mod registry;
pub mod ticker;

pub use domain::{Pair, UtcDay};
pub use error::{QueryError, QueryErrorKind, ValidationError};
pub use exchange::Exchange;
pub use explorer::ExplorerLink;
pub use history::HistoryClient;
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient,
};
pub use metric::Metric;
pub use registry::{Derivation, EndpointTemplate, PathStep, RegistryEntry};
pub use ticker::TickerClient;
