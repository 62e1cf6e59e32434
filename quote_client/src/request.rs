//! Query construction for the provider's single `/query` endpoint.

use snafu::ensure;
use url::Url;

use crate::{
    catalog::{OperationSpec, Param},
    models::request_params::QueryParams,
    providers::{ProviderError, ValidationSnafu},
};

const API_KEY_PARAM: &str = "apikey";

/// Checks caller parameters against what `spec` declares.
pub fn validate(spec: &OperationSpec, params: &QueryParams) -> Result<(), ProviderError> {
    ensure!(
        !params.symbol.trim().is_empty(),
        ValidationSnafu {
            message: "symbol must not be empty",
        }
    );

    for param in Param::ALL {
        let supplied = param.value(params).is_some();
        if spec.required.contains(&param) {
            ensure!(
                supplied,
                ValidationSnafu {
                    message: format!("{} requires `{}`", spec.function, param.query_name()),
                }
            );
        } else {
            ensure!(
                !supplied || spec.accepts(param),
                ValidationSnafu {
                    message: format!(
                        "{} does not accept `{}`",
                        spec.function,
                        param.query_name()
                    ),
                }
            );
        }
    }

    if let Some(interval) = params.interval {
        let kind = if interval.is_intraday() {
            "intraday"
        } else {
            "calendar"
        };
        ensure!(
            spec.intervals.contains(&interval),
            ValidationSnafu {
                message: format!(
                    "{} does not support {kind} interval {interval}; expected one of {}",
                    spec.function,
                    spec.intervals
                        .iter()
                        .map(|i| i.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            }
        );
    }

    if let Some(time_period) = params.time_period {
        ensure!(
            time_period > 0,
            ValidationSnafu {
                message: "time_period must be a positive integer",
            }
        );
    }

    Ok(())
}

/// Appends `/query` to the provider root.
pub fn query_endpoint(base_url: &Url) -> Option<Url> {
    let mut endpoint = base_url.clone();
    endpoint
        .path_segments_mut()
        .ok()?
        .pop_if_empty()
        .push("query");
    endpoint.set_query(None);
    Some(endpoint)
}

/// Builds the full GET URL: `function`, `symbol`, declared parameters, then `apikey`.
///
/// Parameters are not validated here; call [`validate`] first.
pub fn build_url(
    endpoint: &Url,
    spec: &OperationSpec,
    params: &QueryParams,
    api_key: &str,
) -> Url {
    let mut url = endpoint.clone();
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("function", spec.function);
        query.append_pair("symbol", params.symbol.trim());
        for param in Param::ALL.iter().filter(|p| spec.accepts(**p)) {
            if let Some(value) = param.value(params) {
                query.append_pair(param.query_name(), &value);
            }
        }
        query.append_pair(API_KEY_PARAM, api_key);
    }
    url
}

/// Copy of `url` safe to log: the access key is masked.
pub fn redact(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(name, value)| {
            let value = if name == API_KEY_PARAM {
                "***".to_string()
            } else {
                value.into_owned()
            };
            (name.into_owned(), value)
        })
        .collect();
    if !pairs.is_empty() {
        redacted.query_pairs_mut().clear().extend_pairs(pairs);
    }
    redacted.to_string()
}
