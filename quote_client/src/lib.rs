//! Market time-series client for the Alpha Vantage query API.
//!
//! The crate turns the provider's newest-first, string-keyed JSON payloads into
//! uniform [`Series`](models::series::Series) ordered oldest to newest. The five
//! supported functions live in [`catalog`] as data; [`request`] builds the
//! query, a [`Transport`](providers::Transport) performs the GET, and
//! [`response`] reshapes the result.
//!
//! ```no_run
//! use quote_client::{models::interval::Interval, providers::alpha_vantage::AlphaVantageClient};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AlphaVantageClient::from_env()?;
//! let bars = client.time_series_intraday("IBM", Interval::FiveMinutes).await?;
//! println!("{} bars, last close {:?}", bars.times.len(), bars.close.last());
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "cli")]
pub mod cli;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod models;
pub mod providers;
pub mod request;
pub mod response;

pub use catalog::{OperationSpec, operation};
pub use config::ClientConfig;
pub use providers::{ProviderError, ProviderInitError, alpha_vantage::AlphaVantageClient};
