//! Declarative catalog of the provider functions this client supports.
//!
//! Each supported function is one [`OperationSpec`] constant: the parameters it
//! takes, the key its series is nested under, and how each per-observation field
//! maps to an output column. Request building and normalization are driven
//! entirely by this data, so supporting another indicator means adding one entry
//! to [`OPERATIONS`].

use crate::models::{interval::Interval, request_params::QueryParams};

/// A caller-supplied parameter an operation may take in addition to `symbol`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    Interval,
    TimePeriod,
    SeriesType,
    OutputSize,
}

impl Param {
    /// Query-string name used by the provider.
    pub fn query_name(&self) -> &'static str {
        match self {
            Param::Interval => "interval",
            Param::TimePeriod => "time_period",
            Param::SeriesType => "series_type",
            Param::OutputSize => "outputsize",
        }
    }

    pub(crate) fn value(&self, params: &QueryParams) -> Option<String> {
        match self {
            Param::Interval => params.interval.map(|v| v.to_string()),
            Param::TimePeriod => params.time_period.map(|v| v.to_string()),
            Param::SeriesType => params.series_type.map(|v| v.to_string()),
            Param::OutputSize => params.output_size.map(|v| v.to_string()),
        }
    }

    pub(crate) const ALL: [Param; 4] = [
        Param::Interval,
        Param::TimePeriod,
        Param::SeriesType,
        Param::OutputSize,
    ];
}

/// Numeric type a field is coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Float,
    Integer,
}

/// Maps one per-observation JSON key to an output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Key inside each observation object, e.g. `"1. open"`.
    pub key: &'static str,
    /// Output column name, e.g. `"open"`.
    pub column: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    const fn float(key: &'static str, column: &'static str) -> Self {
        Self {
            key,
            column,
            kind: FieldKind::Float,
        }
    }

    const fn integer(key: &'static str, column: &'static str) -> Self {
        Self {
            key,
            column,
            kind: FieldKind::Integer,
        }
    }
}

/// Declarative description of one provider function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationSpec {
    /// Provider function identifier, sent as `function=`.
    pub function: &'static str,
    /// Parameters that must be supplied.
    pub required: &'static [Param],
    /// Parameters that may be supplied.
    pub optional: &'static [Param],
    /// Accepted intervals. Empty when the operation takes no interval.
    pub intervals: &'static [Interval],
    /// Key of the nested series object. `{interval}` and `{function}` are substituted.
    pub series_key: &'static str,
    /// Fields extracted from every observation, in output column order.
    pub fields: &'static [FieldSpec],
}

impl OperationSpec {
    /// Resolves [`series_key`](Self::series_key) for a concrete request.
    pub fn series_key(&self, params: &QueryParams) -> String {
        let interval = params.interval.map(|i| i.as_str()).unwrap_or_default();
        self.series_key
            .replace("{interval}", interval)
            .replace("{function}", self.function)
    }

    pub fn accepts(&self, param: Param) -> bool {
        self.required.contains(&param) || self.optional.contains(&param)
    }
}

pub mod columns {
    pub const OPEN: &str = "open";
    pub const HIGH: &str = "high";
    pub const LOW: &str = "low";
    pub const CLOSE: &str = "close";
    pub const ADJUSTED_CLOSE: &str = "adjusted_close";
    pub const VOLUME: &str = "volume";
    pub const DIVIDEND_AMOUNT: &str = "dividend_amount";
    pub const SPLIT_COEFFICIENT: &str = "split_coefficient";
    pub const SMA: &str = "sma";
    pub const RSI: &str = "rsi";
    pub const REAL_MIDDLE_BAND: &str = "real_middle_band";
    pub const REAL_UPPER_BAND: &str = "real_upper_band";
    pub const REAL_LOWER_BAND: &str = "real_lower_band";
}

const INDICATOR_PARAMS: &[Param] = &[Param::Interval, Param::TimePeriod, Param::SeriesType];
const TECHNICAL_ANALYSIS_KEY: &str = "Technical Analysis: {function}";

pub const TIME_SERIES_INTRADAY: OperationSpec = OperationSpec {
    function: "TIME_SERIES_INTRADAY",
    required: &[Param::Interval],
    optional: &[Param::OutputSize],
    intervals: Interval::INTRADAY,
    series_key: "Time Series ({interval})",
    fields: &[
        FieldSpec::float("1. open", columns::OPEN),
        FieldSpec::float("2. high", columns::HIGH),
        FieldSpec::float("3. low", columns::LOW),
        FieldSpec::float("4. close", columns::CLOSE),
        FieldSpec::integer("5. volume", columns::VOLUME),
    ],
};

pub const TIME_SERIES_DAILY_ADJUSTED: OperationSpec = OperationSpec {
    function: "TIME_SERIES_DAILY_ADJUSTED",
    required: &[],
    optional: &[Param::OutputSize],
    intervals: &[],
    series_key: "Time Series (Daily)",
    fields: &[
        FieldSpec::float("1. open", columns::OPEN),
        FieldSpec::float("2. high", columns::HIGH),
        FieldSpec::float("3. low", columns::LOW),
        FieldSpec::float("4. close", columns::CLOSE),
        FieldSpec::float("5. adjusted close", columns::ADJUSTED_CLOSE),
        FieldSpec::integer("6. volume", columns::VOLUME),
        FieldSpec::float("7. dividend amount", columns::DIVIDEND_AMOUNT),
        FieldSpec::float("8. split coefficient", columns::SPLIT_COEFFICIENT),
    ],
};

pub const SMA: OperationSpec = OperationSpec {
    function: "SMA",
    required: INDICATOR_PARAMS,
    optional: &[],
    intervals: Interval::ALL,
    series_key: TECHNICAL_ANALYSIS_KEY,
    fields: &[FieldSpec::float("SMA", columns::SMA)],
};

pub const BBANDS: OperationSpec = OperationSpec {
    function: "BBANDS",
    required: INDICATOR_PARAMS,
    optional: &[],
    intervals: Interval::ALL,
    series_key: TECHNICAL_ANALYSIS_KEY,
    fields: &[
        FieldSpec::float("Real Middle Band", columns::REAL_MIDDLE_BAND),
        FieldSpec::float("Real Upper Band", columns::REAL_UPPER_BAND),
        FieldSpec::float("Real Lower Band", columns::REAL_LOWER_BAND),
    ],
};

pub const RSI: OperationSpec = OperationSpec {
    function: "RSI",
    required: INDICATOR_PARAMS,
    optional: &[],
    intervals: Interval::ALL,
    series_key: TECHNICAL_ANALYSIS_KEY,
    fields: &[FieldSpec::float("RSI", columns::RSI)],
};

/// Every supported operation.
pub const OPERATIONS: &[OperationSpec] = &[
    TIME_SERIES_INTRADAY,
    TIME_SERIES_DAILY_ADJUSTED,
    SMA,
    BBANDS,
    RSI,
];

/// Looks up an operation by provider function name, ignoring case.
pub fn operation(function: &str) -> Option<&'static OperationSpec> {
    OPERATIONS
        .iter()
        .find(|spec| spec.function.eq_ignore_ascii_case(function.trim()))
}
