//! Typed views over price time series.
//!
//! Each struct is a set of parallel, index-aligned sequences ordered oldest
//! first, built from the generic [`Series`] a time series operation produces.

use serde::Serialize;

use crate::{
    catalog::columns,
    models::series::Series,
    providers::{InternalSnafu, ProviderError},
};

/// Intraday OHLCV bars.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntradayBars {
    pub times: Vec<String>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub volume: Vec<u64>,
}

/// Daily bars with split/dividend adjustment data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyAdjustedBars {
    pub times: Vec<String>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub adjusted_close: Vec<f64>,
    pub volume: Vec<u64>,
    pub dividend_amount: Vec<f64>,
    pub split_coefficient: Vec<f64>,
}

impl TryFrom<Series> for IntradayBars {
    type Error = ProviderError;

    fn try_from(mut series: Series) -> Result<Self, Self::Error> {
        Ok(Self {
            open: take_floats(&mut series, columns::OPEN)?,
            high: take_floats(&mut series, columns::HIGH)?,
            low: take_floats(&mut series, columns::LOW)?,
            close: take_floats(&mut series, columns::CLOSE)?,
            volume: take_integers(&mut series, columns::VOLUME)?,
            times: series.timestamps,
        })
    }
}

impl TryFrom<Series> for DailyAdjustedBars {
    type Error = ProviderError;

    fn try_from(mut series: Series) -> Result<Self, Self::Error> {
        Ok(Self {
            open: take_floats(&mut series, columns::OPEN)?,
            high: take_floats(&mut series, columns::HIGH)?,
            low: take_floats(&mut series, columns::LOW)?,
            close: take_floats(&mut series, columns::CLOSE)?,
            adjusted_close: take_floats(&mut series, columns::ADJUSTED_CLOSE)?,
            volume: take_integers(&mut series, columns::VOLUME)?,
            dividend_amount: take_floats(&mut series, columns::DIVIDEND_AMOUNT)?,
            split_coefficient: take_floats(&mut series, columns::SPLIT_COEFFICIENT)?,
            times: series.timestamps,
        })
    }
}

pub(crate) fn take_floats(series: &mut Series, column: &str) -> Result<Vec<f64>, ProviderError> {
    let function = series.function;
    series.take_floats(column).ok_or_else(|| {
        InternalSnafu {
            message: format!("{function} series has no decimal column `{column}`"),
        }
        .build()
    })
}

pub(crate) fn take_integers(series: &mut Series, column: &str) -> Result<Vec<u64>, ProviderError> {
    let function = series.function;
    series.take_integers(column).ok_or_else(|| {
        InternalSnafu {
            message: format!("{function} series has no integer column `{column}`"),
        }
        .build()
    })
}
