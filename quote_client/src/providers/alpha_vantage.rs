use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use snafu::{OptionExt, ResultExt};
use tracing::{info, warn};
use url::Url;

use crate::{
    catalog::{self, OperationSpec},
    config::ClientConfig,
    models::{
        bar::{DailyAdjustedBars, IntradayBars},
        indicator::{BollingerBands, IndicatorSeries},
        interval::{Interval, SeriesType},
        request_params::QueryParams,
        series::Series,
    },
    providers::{
        ConfigSnafu, HttpStatusSnafu, InvalidBaseUrlSnafu, ProviderError,
        ProviderInitError, RawResponse, Transport, http::HttpTransport,
    },
    request::{build_url, query_endpoint, redact, validate},
    response::{decode, normalize},
};

/// Quote client for the Alpha Vantage query API.
///
/// Every call is one stateless round trip: validate, build the query, GET it,
/// classify the response, and normalize the payload. Nothing is cached,
/// retried or throttled; the provider's per-minute quota is the caller's concern.
pub struct AlphaVantageClient<T = HttpTransport> {
    transport: T,
    endpoint: Url,
    api_key: SecretString,
}

impl<T> fmt::Debug for AlphaVantageClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlphaVantageClient")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl AlphaVantageClient<HttpTransport> {
    /// Creates a client that talks HTTP with the configured timeout.
    pub fn new(config: &ClientConfig) -> Result<Self, ProviderInitError> {
        let transport = HttpTransport::new(config.timeout)?;
        Self::with_transport(transport, config)
    }

    /// Creates a client from `ALPHAVANTAGE_*` environment variables.
    pub fn from_env() -> Result<Self, ProviderInitError> {
        let config = ClientConfig::from_env().context(ConfigSnafu)?;
        Self::new(&config)
    }
}

impl<T: Transport> AlphaVantageClient<T> {
    /// Creates a client over any [`Transport`].
    pub fn with_transport(transport: T, config: &ClientConfig) -> Result<Self, ProviderInitError> {
        let base_url = Url::parse(config.base_url.trim()).map_err(|e| {
            InvalidBaseUrlSnafu {
                url: config.base_url.as_str(),
                message: e.to_string(),
            }
            .build()
        })?;
        let endpoint = query_endpoint(&base_url).context(InvalidBaseUrlSnafu {
            url: config.base_url.as_str(),
            message: "URL cannot have a path",
        })?;

        Ok(Self {
            transport,
            endpoint,
            api_key: SecretString::new(config.api_key.expose_secret().into()),
        })
    }

    /// The `/query` endpoint every request is sent to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Runs one catalog operation and returns its normalized series.
    pub async fn fetch(
        &self,
        spec: &OperationSpec,
        params: &QueryParams,
    ) -> Result<Series, ProviderError> {
        validate(spec, params)?;
        let url = build_url(&self.endpoint, spec, params, self.api_key.expose_secret());

        info!(
            function = spec.function,
            symbol = %params.symbol,
            request = %redact(&url),
            "sending quote request"
        );
        let RawResponse { status, body } = self.transport.get(&url).await?;

        if !status.is_success() {
            warn!(function = spec.function, %status, "quote request rejected");
            return HttpStatusSnafu { status, body }.fail();
        }

        normalize(spec, params, decode(&body)?)
    }

    /// Intraday OHLCV bars at a minute `interval`.
    pub async fn time_series_intraday(
        &self,
        symbol: &str,
        interval: Interval,
    ) -> Result<IntradayBars, ProviderError> {
        let params = QueryParams::new(symbol).interval(interval);
        self.fetch(&catalog::TIME_SERIES_INTRADAY, &params)
            .await?
            .try_into()
    }

    /// Daily bars with adjusted close, dividends and split coefficients.
    pub async fn time_series_daily_adjusted(
        &self,
        symbol: &str,
    ) -> Result<DailyAdjustedBars, ProviderError> {
        let params = QueryParams::new(symbol);
        self.fetch(&catalog::TIME_SERIES_DAILY_ADJUSTED, &params)
            .await?
            .try_into()
    }

    /// Simple moving average.
    pub async fn sma(
        &self,
        symbol: &str,
        interval: Interval,
        time_period: u32,
        series_type: SeriesType,
    ) -> Result<IndicatorSeries, ProviderError> {
        let params = indicator_params(symbol, interval, time_period, series_type);
        self.fetch(&catalog::SMA, &params).await?.try_into()
    }

    /// Bollinger bands.
    pub async fn bbands(
        &self,
        symbol: &str,
        interval: Interval,
        time_period: u32,
        series_type: SeriesType,
    ) -> Result<BollingerBands, ProviderError> {
        let params = indicator_params(symbol, interval, time_period, series_type);
        self.fetch(&catalog::BBANDS, &params).await?.try_into()
    }

    /// Relative strength index.
    pub async fn rsi(
        &self,
        symbol: &str,
        interval: Interval,
        time_period: u32,
        series_type: SeriesType,
    ) -> Result<IndicatorSeries, ProviderError> {
        let params = indicator_params(symbol, interval, time_period, series_type);
        self.fetch(&catalog::RSI, &params).await?.try_into()
    }
}

fn indicator_params(
    symbol: &str,
    interval: Interval,
    time_period: u32,
    series_type: SeriesType,
) -> QueryParams {
    QueryParams::new(symbol)
        .interval(interval)
        .time_period(time_period)
        .series_type(series_type)
}
