use serde::{Deserialize, Serialize};

use crate::models::interval::{Interval, OutputSize, SeriesType};

/// Caller-supplied parameters for one provider query.
///
/// Which of the optional fields an operation accepts is declared by its
/// [`OperationSpec`](crate::catalog::OperationSpec); validation against that
/// declaration happens in [`request::validate`](crate::request::validate).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    /// Ticker symbol (e.g. `"IBM"`, `"MSFT"`).
    pub symbol: String,

    /// Spacing between observations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<Interval>,

    /// Number of data points used for each indicator value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_period: Option<u32>,

    /// Price the indicator is computed from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_type: Option<SeriesType>,

    /// Compact (latest 100) or full history.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_size: Option<OutputSize>,
}

impl QueryParams {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            interval: None,
            time_period: None,
            series_type: None,
            output_size: None,
        }
    }

    pub fn interval(mut self, interval: Interval) -> Self {
        self.interval = Some(interval);
        self
    }

    pub fn time_period(mut self, time_period: u32) -> Self {
        self.time_period = Some(time_period);
        self
    }

    pub fn series_type(mut self, series_type: SeriesType) -> Self {
        self.series_type = Some(series_type);
        self
    }

    pub fn output_size(mut self, output_size: OutputSize) -> Self {
        self.output_size = Some(output_size);
        self
    }
}
