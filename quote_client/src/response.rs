//! Reshaping of provider JSON into a [`Series`].
//!
//! The provider nests each series under a key such as `Time Series (5min)`.
//! The nested object maps timestamp strings to per-observation objects of
//! string-encoded numbers, newest first. [`normalize`] pulls out every field the
//! [`OperationSpec`] declares, coerces it to the declared numeric type, and
//! reverses the result so that index 0 is the oldest observation.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::{
    Deserialize, Deserializer,
    de::{self, MapAccess, SeqAccess, Visitor},
};
use serde_json::{Map, Number, Value};
use snafu::{OptionExt, ResultExt, ensure};
use tracing::{debug, warn};

use crate::{
    catalog::{FieldKind, FieldSpec, OperationSpec},
    models::{
        request_params::QueryParams,
        series::{Column, Series},
    },
    providers::{ApiSnafu, DecodeSnafu, ProviderError, SchemaSnafu},
};

const META_DATA_KEY: &str = "Meta Data";

/// In-band messages the provider sends with a success status instead of data.
const PROVIDER_MESSAGE_KEYS: &[&str] = &["Error Message", "Note", "Information"];

/// Parses a response body, rejecting objects that repeat a key.
///
/// A repeated timestamp would otherwise collapse two observations into one.
/// Malformed JSON is a `Decode` error; a repeated key is a `Schema` error.
pub fn decode(body: &str) -> Result<Value, ProviderError> {
    match serde_json::from_str::<UniqueKeys>(body) {
        Ok(UniqueKeys(document)) => Ok(document),
        Err(e) if e.is_data() => SchemaSnafu {
            message: e.to_string(),
        }
        .fail(),
        Err(e) => Err(e).context(DecodeSnafu),
    }
}

/// A JSON value whose objects were checked for repeated keys while parsing.
struct UniqueKeys(Value);

impl<'de> Deserialize<'de> for UniqueKeys {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(UniqueKeysVisitor).map(UniqueKeys)
    }
}

struct UniqueKeysVisitor;

impl<'de> Visitor<'de> for UniqueKeysVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_bool<E>(self, value: bool) -> Result<Value, E> {
        Ok(Value::Bool(value))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Value, E> {
        Ok(Value::from(value))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Value, E> {
        Ok(Value::from(value))
    }

    fn visit_f64<E>(self, value: f64) -> Result<Value, E> {
        Ok(Number::from_f64(value).map_or(Value::Null, Value::Number))
    }

    fn visit_str<E>(self, value: &str) -> Result<Value, E> {
        Ok(Value::String(value.to_owned()))
    }

    fn visit_string<E>(self, value: String) -> Result<Value, E> {
        Ok(Value::String(value))
    }

    fn visit_unit<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut values = Vec::new();
        while let Some(UniqueKeys(value)) = seq.next_element()? {
            values.push(value);
        }
        Ok(Value::Array(values))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut object = Map::new();
        while let Some(key) = map.next_key::<String>()? {
            if object.contains_key(&key) {
                return Err(de::Error::custom(format!("duplicate key `{key}`")));
            }
            let UniqueKeys(value) = map.next_value()?;
            object.insert(key, value);
        }
        Ok(Value::Object(object))
    }
}

/// Converts a decoded response document into an oldest-first [`Series`].
pub fn normalize(
    spec: &OperationSpec,
    params: &QueryParams,
    document: Value,
) -> Result<Series, ProviderError> {
    let mut root = match document {
        Value::Object(root) => root,
        other => {
            return SchemaSnafu {
                message: format!("expected a JSON object, got {}", json_type(&other)),
            }
            .fail();
        }
    };

    let series_key = spec.series_key(params);
    let Some(entries) = root.remove(&series_key) else {
        return Err(missing_series(&series_key, &root));
    };
    let entries = match entries {
        Value::Object(entries) => entries,
        other => {
            return SchemaSnafu {
                message: format!(
                    "`{series_key}` should be an object, got {}",
                    json_type(&other)
                ),
            }
            .fail();
        }
    };

    let mut timestamps = Vec::with_capacity(entries.len());
    let mut columns: Vec<Column> = spec
        .fields
        .iter()
        .map(|field| match field.kind {
            FieldKind::Float => Column::Float(Vec::with_capacity(entries.len())),
            FieldKind::Integer => Column::Integer(Vec::with_capacity(entries.len())),
        })
        .collect();

    for (timestamp, observation) in entries {
        let Value::Object(fields) = observation else {
            return SchemaSnafu {
                message: format!("observation at {timestamp} is not an object"),
            }
            .fail();
        };
        for (field, column) in spec.fields.iter().zip(columns.iter_mut()) {
            let raw = fields.get(field.key).with_context(|| SchemaSnafu {
                message: format!("observation at {timestamp} is missing `{}`", field.key),
            })?;
            push_value(column, field, raw, &timestamp)?;
        }
        timestamps.push(timestamp);
    }

    timestamps.reverse();
    for column in &mut columns {
        column.reverse();
    }
    ensure_increasing(&timestamps)?;

    debug!(
        function = spec.function,
        symbol = %params.symbol,
        observations = timestamps.len(),
        "normalized series"
    );

    Ok(Series {
        function: spec.function,
        symbol: params.symbol.trim().to_string(),
        metadata: metadata(root.remove(META_DATA_KEY)),
        timestamps,
        columns: spec
            .fields
            .iter()
            .map(|field| field.column)
            .zip(columns)
            .collect(),
    })
}

fn missing_series(series_key: &str, root: &Map<String, Value>) -> ProviderError {
    if let Some(message) = PROVIDER_MESSAGE_KEYS
        .iter()
        .find_map(|key| root.get(*key).and_then(Value::as_str))
    {
        warn!(%message, "provider returned a message instead of data");
        return ApiSnafu { message }.build();
    }
    let found: Vec<&str> = root.keys().map(String::as_str).collect();
    SchemaSnafu {
        message: format!("missing series key `{series_key}`; found keys {found:?}"),
    }
    .build()
}

fn push_value(
    column: &mut Column,
    field: &FieldSpec,
    raw: &Value,
    timestamp: &str,
) -> Result<(), ProviderError> {
    let invalid = || SchemaSnafu {
        message: format!(
            "`{}` at {timestamp} is not a valid {} value: {raw}",
            field.key,
            match field.kind {
                FieldKind::Float => "decimal",
                FieldKind::Integer => "integer",
            }
        ),
    };
    match column {
        Column::Float(values) => {
            let value = match raw {
                Value::String(s) => s.trim().parse::<f64>().ok(),
                Value::Number(n) => n.as_f64(),
                _ => None,
            }
            .filter(|v| v.is_finite())
            .with_context(invalid)?;
            values.push(value);
        }
        Column::Integer(values) => {
            let value = match raw {
                Value::String(s) => s.trim().parse::<u64>().ok(),
                Value::Number(n) => n.as_u64(),
                _ => None,
            }
            .with_context(invalid)?;
            values.push(value);
        }
    }
    Ok(())
}

/// Parses the timestamp shapes the provider emits: daily dates and intraday date-times.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

fn ensure_increasing(timestamps: &[String]) -> Result<(), ProviderError> {
    let mut previous: Option<(NaiveDateTime, &str)> = None;
    for raw in timestamps {
        let current = parse_timestamp(raw).with_context(|| SchemaSnafu {
            message: format!("unrecognized timestamp {raw:?}"),
        })?;
        if let Some((before, before_raw)) = previous {
            ensure!(
                current > before,
                SchemaSnafu {
                    message: format!(
                        "timestamps out of order: {before_raw:?} is not before {raw:?}"
                    ),
                }
            );
        }
        previous = Some((current, raw.as_str()));
    }
    Ok(())
}

fn metadata(meta: Option<Value>) -> IndexMap<String, String> {
    let Some(Value::Object(meta)) = meta else {
        return IndexMap::new();
    };
    meta.into_iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            (key, value)
        })
        .collect()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
