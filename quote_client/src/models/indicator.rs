//! Typed views over technical indicator series.

use serde::Serialize;

use crate::{
    catalog::columns,
    models::{
        bar::take_floats,
        series::{Column, Series},
    },
    providers::{InternalSnafu, ProviderError},
};

/// A single-valued indicator such as SMA or RSI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSeries {
    pub times: Vec<String>,
    pub values: Vec<f64>,
}

/// Takes the only column of a single-valued indicator series.
impl TryFrom<Series> for IndicatorSeries {
    type Error = ProviderError;

    fn try_from(mut series: Series) -> Result<Self, Self::Error> {
        let function = series.function;
        let count = series.columns.len();
        match series.columns.pop() {
            Some((_, Column::Float(values))) if count == 1 => Ok(Self {
                times: series.timestamps,
                values,
            }),
            _ => InternalSnafu {
                message: format!(
                    "{function} series is not a single decimal indicator ({count} columns)"
                ),
            }
            .fail(),
        }
    }
}

/// Middle, upper and lower Bollinger bands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BollingerBands {
    pub times: Vec<String>,
    pub middle: Vec<f64>,
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
}

impl TryFrom<Series> for BollingerBands {
    type Error = ProviderError;

    fn try_from(mut series: Series) -> Result<Self, Self::Error> {
        Ok(Self {
            middle: take_floats(&mut series, columns::REAL_MIDDLE_BAND)?,
            upper: take_floats(&mut series, columns::REAL_UPPER_BAND)?,
            lower: take_floats(&mut series, columns::REAL_LOWER_BAND)?,
            times: series.timestamps,
        })
    }
}
