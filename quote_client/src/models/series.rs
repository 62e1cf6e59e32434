//! Uniform, chronologically ordered columnar series.
//!
//! Every operation in the [`catalog`](crate::catalog) produces a [`Series`]: one
//! timestamp sequence plus one [`Column`] per declared field, all index-aligned
//! and ordered oldest observation first.

use indexmap::IndexMap;
use serde::Serialize;

/// One output column of a [`Series`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Column {
    /// Prices and indicator values.
    Float(Vec<f64>),
    /// Volumes.
    Integer(Vec<u64>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Float(values) => values.len(),
            Column::Integer(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        match self {
            Column::Float(values) => values.get(index).copied().map(Value::Float),
            Column::Integer(values) => values.get(index).copied().map(Value::Integer),
        }
    }

    pub(crate) fn reverse(&mut self) {
        match self {
            Column::Float(values) => values.reverse(),
            Column::Integer(values) => values.reverse(),
        }
    }
}

/// A single numeric field of an [`Observation`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Float(f64),
    Integer(u64),
}

/// One timestamped record, borrowed from a [`Series`].
#[derive(Debug, Clone, PartialEq)]
pub struct Observation<'a> {
    /// Provider-supplied timestamp (`YYYY-MM-DD` or `YYYY-MM-DD HH:MM[:SS]`).
    pub timestamp: &'a str,
    /// Field values keyed by output column name, in catalog order.
    pub values: IndexMap<&'static str, Value>,
}

/// Normalized result of one provider call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    /// Provider function that produced this series (e.g. `"SMA"`).
    pub function: &'static str,
    /// The symbol this data represents.
    pub symbol: String,
    /// Flattened `Meta Data` block of the response. Empty when the provider omits it.
    pub metadata: IndexMap<String, String>,
    /// Observation timestamps, strictly increasing.
    pub timestamps: Vec<String>,
    /// Output columns, each the same length as `timestamps`.
    pub columns: IndexMap<&'static str, Column>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    pub fn floats(&self, name: &str) -> Option<&[f64]> {
        match self.columns.get(name)? {
            Column::Float(values) => Some(values),
            Column::Integer(_) => None,
        }
    }

    pub fn integers(&self, name: &str) -> Option<&[u64]> {
        match self.columns.get(name)? {
            Column::Integer(values) => Some(values),
            Column::Float(_) => None,
        }
    }

    pub fn observation(&self, index: usize) -> Option<Observation<'_>> {
        let timestamp = self.timestamps.get(index)?;
        let values = self
            .columns
            .iter()
            .filter_map(|(name, column)| column.get(index).map(|value| (*name, value)))
            .collect();
        Some(Observation {
            timestamp: timestamp.as_str(),
            values,
        })
    }

    pub fn observations(&self) -> impl Iterator<Item = Observation<'_>> + '_ {
        (0..self.len()).filter_map(|index| self.observation(index))
    }

    /// Moves a float column out of the series.
    pub(crate) fn take_floats(&mut self, name: &str) -> Option<Vec<f64>> {
        if !matches!(self.columns.get(name)?, Column::Float(_)) {
            return None;
        }
        match self.columns.shift_remove(name)? {
            Column::Float(values) => Some(values),
            Column::Integer(_) => None,
        }
    }

    /// Moves an integer column out of the series.
    pub(crate) fn take_integers(&mut self, name: &str) -> Option<Vec<u64>> {
        if !matches!(self.columns.get(name)?, Column::Integer(_)) {
            return None;
        }
        match self.columns.shift_remove(name)? {
            Column::Integer(values) => Some(values),
            Column::Float(_) => None,
        }
    }
}
