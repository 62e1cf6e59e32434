//! Provider abstraction for the quote service.
//!
//! This module defines the [`Transport`] trait, the single I/O boundary of the
//! client, together with the error types shared by every layer above it.
//!
//! A transport only performs the GET and reports I/O failures. Classifying the
//! status code, decoding JSON and reshaping the payload all happen in
//! [`alpha_vantage::AlphaVantageClient`], so a canned transport exercises every
//! error path without touching the network.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use quote_client::providers::{ProviderError, RawResponse, Transport};
//! use reqwest::StatusCode;
//! use url::Url;
//!
//! struct Canned(&'static str);
//!
//! #[async_trait]
//! impl Transport for Canned {
//!     async fn get(&self, _url: &Url) -> Result<RawResponse, ProviderError> {
//!         Ok(RawResponse {
//!             status: StatusCode::OK,
//!             body: self.0.to_string(),
//!         })
//!     }
//! }
//! ```

pub mod alpha_vantage;
pub mod http;

use std::{error::Error as StdError, io};

use async_trait::async_trait;
use reqwest::StatusCode;
use snafu::{Backtrace, IntoError, Snafu};
use url::Url;

use crate::errors::ConfigError;

/// Source of a [`ProviderError::Transport`], whatever the transport's client library.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// A response as received from the wire, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Performs one GET against a fully built query URL.
///
/// Implementations must only fail with [`ProviderError::Transport`] errors,
/// built with [`ProviderError::transport`]. A non-success status is still `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &Url) -> Result<RawResponse, ProviderError>;
}

/// Errors that can occur during the creation of a client instance.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// configuration could not be loaded.
    #[snafu(display("Invalid configuration: {source}"))]
    Config {
        source: ConfigError,
        backtrace: Backtrace,
    },

    /// the configured base URL cannot carry a path.
    #[snafu(display("Invalid base URL {url:?}: {message}"))]
    InvalidBaseUrl {
        url: String,
        message: String,
        backtrace: Backtrace,
    },

    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },
}

/// Errors surfaced by a single quote request.
///
/// Every failure is detected at the boundary where it happens and reported
/// with its own variant; nothing is collapsed into an empty result.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// The request never produced a response (connection failure, timeout, body read).
    #[snafu(display("API request failed: {source}"))]
    Transport {
        source: BoxError,
        backtrace: Backtrace,
    },

    /// The provider answered with a non-success status code.
    #[snafu(display("API returned HTTP {status}: {body}"))]
    HttpStatus {
        status: StatusCode,
        body: String,
        backtrace: Backtrace,
    },

    /// A success response whose body is not valid JSON.
    #[snafu(display("Failed to decode response body: {source}"))]
    Decode {
        source: serde_json::Error,
        backtrace: Backtrace,
    },

    /// Valid JSON that does not have the expected shape.
    #[snafu(display("Unexpected response shape: {message}"))]
    Schema {
        message: String,
        backtrace: Backtrace,
    },

    /// The provider reported an error in-band (invalid call, rate limit notice).
    #[snafu(display("API error: {message}"))]
    Api {
        message: String,
        backtrace: Backtrace,
    },

    /// The request parameters were invalid for the requested operation.
    #[snafu(display("Invalid parameters for provider: {message}"))]
    Validation {
        message: String,
        backtrace: Backtrace,
    },

    /// An internal error occurred while processing data within the client.
    #[snafu(display("Internal provider error: {message}"))]
    Internal {
        message: String,
        backtrace: Backtrace,
    },
}

impl ProviderError {
    /// Wraps a connection, timeout or body-read failure from any transport.
    pub fn transport(source: impl Into<BoxError>) -> Self {
        TransportSnafu.into_error(source.into())
    }

    /// Whether a [`Transport`](ProviderError::Transport) error was a timeout.
    pub fn is_timeout(&self) -> bool {
        let ProviderError::Transport { source, .. } = self else {
            return false;
        };
        if let Some(err) = source.downcast_ref::<reqwest::Error>() {
            return err.is_timeout();
        }
        source
            .downcast_ref::<io::Error>()
            .is_some_and(|err| err.kind() == io::ErrorKind::TimedOut)
    }

    /// Whether repeating the same request later may succeed.
    ///
    /// The client never retries on its own; this only informs the caller.
    pub fn is_transient(&self) -> bool {
        match self {
            ProviderError::Transport { .. } => true,
            ProviderError::HttpStatus { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            _ => false,
        }
    }

    /// Status code carried by an [`HttpStatus`](ProviderError::HttpStatus) error.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ProviderError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
