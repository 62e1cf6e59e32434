mod common;

use common::{API_KEY, CannedTransport, config, intraday_document};
use quote_client::{
    AlphaVantageClient, ProviderError, ProviderInitError,
    catalog,
    models::{
        interval::{Interval, SeriesType},
        request_params::QueryParams,
    },
};
use reqwest::StatusCode;
use serde_json::json;

fn client(transport: CannedTransport) -> AlphaVantageClient<CannedTransport> {
    AlphaVantageClient::with_transport(transport, &config()).expect("valid config")
}

#[tokio::test]
async fn intraday_is_returned_oldest_first_with_exact_values() {
    let document = intraday_document(
        "5min",
        &[
            ("2024-03-01 10:10:00", "103.10", "103.90", "102.80", "103.55", "3300"),
            ("2024-03-01 10:05:00", "102.00", "102.75", "101.50", "102.25", "2200"),
            ("2024-03-01 10:00:00", "101.25", "101.80", "100.90", "101.40", "1100"),
        ],
    );
    let transport = CannedTransport::json(&document);
    let requests = transport.requests();

    let bars = client(transport)
        .time_series_intraday("IBM", Interval::FiveMinutes)
        .await
        .unwrap();

    assert_eq!(
        bars.times,
        ["2024-03-01 10:00:00", "2024-03-01 10:05:00", "2024-03-01 10:10:00"]
    );
    assert_eq!(bars.open, [101.25, 102.00, 103.10]);
    assert_eq!(bars.high, [101.80, 102.75, 103.90]);
    assert_eq!(bars.low, [100.90, 101.50, 102.80]);
    assert_eq!(bars.close, [101.40, 102.25, 103.55]);
    assert_eq!(bars.volume, [1100, 2200, 3300]);

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path(), "/query");
    assert_eq!(
        requests[0].query(),
        Some(
            format!("function=TIME_SERIES_INTRADAY&symbol=IBM&interval=5min&apikey={API_KEY}")
                .as_str()
        )
    );
}

#[tokio::test]
async fn daily_adjusted_maps_all_eight_fields() {
    let document = json!({
        "Meta Data": { "2. Symbol": "IBM" },
        "Time Series (Daily)": {
            "2024-03-04": {
                "1. open": "187.0", "2. high": "189.0", "3. low": "186.0", "4. close": "188.5",
                "5. adjusted close": "188.5", "6. volume": "4000000",
                "7. dividend amount": "0.0000", "8. split coefficient": "1.0"
            },
            "2024-03-01": {
                "1. open": "185.0", "2. high": "186.5", "3. low": "184.0", "4. close": "186.0",
                "5. adjusted close": "184.34", "6. volume": "3500000",
                "7. dividend amount": "1.6600", "8. split coefficient": "1.0"
            }
        }
    });

    let bars = client(CannedTransport::json(&document))
        .time_series_daily_adjusted("IBM")
        .await
        .unwrap();

    assert_eq!(bars.times, ["2024-03-01", "2024-03-04"]);
    assert_eq!(bars.adjusted_close, [184.34, 188.5]);
    assert_eq!(bars.volume, [3_500_000, 4_000_000]);
    assert_eq!(bars.dividend_amount, [1.66, 0.0]);
    assert_eq!(bars.split_coefficient, [1.0, 1.0]);
}

#[tokio::test]
async fn indicators_use_technical_analysis_keys() {
    let sma = json!({
        "Meta Data": { "1: Symbol": "IBM", "2: Indicator": "Simple Moving Average (SMA)" },
        "Technical Analysis: SMA": {
            "2024-03-04": { "SMA": "186.1200" },
            "2024-03-01": { "SMA": "185.5000" }
        }
    });
    let series = client(CannedTransport::json(&sma))
        .sma("IBM", Interval::Daily, 20, SeriesType::Close)
        .await
        .unwrap();
    assert_eq!(series.times, ["2024-03-01", "2024-03-04"]);
    assert_eq!(series.values, [185.5, 186.12]);

    let rsi = json!({
        "Technical Analysis: RSI": {
            "2024-03-01 16:00": { "RSI": "61.2" },
            "2024-03-01 15:00": { "RSI": "58.9" }
        }
    });
    let series = client(CannedTransport::json(&rsi))
        .rsi("IBM", Interval::SixtyMinutes, 14, SeriesType::Close)
        .await
        .unwrap();
    assert_eq!(series.values, [58.9, 61.2]);

    let bbands = json!({
        "Technical Analysis: BBANDS": {
            "2024-03-04": { "Real Upper Band": "190.0", "Real Lower Band": "180.0", "Real Middle Band": "185.0" },
            "2024-03-01": { "Real Upper Band": "189.0", "Real Lower Band": "181.0", "Real Middle Band": "184.0" }
        }
    });
    let transport = CannedTransport::json(&bbands);
    let requests = transport.requests();
    let bands = client(transport)
        .bbands("IBM", Interval::Weekly, 60, SeriesType::High)
        .await
        .unwrap();
    assert_eq!(bands.middle, [184.0, 185.0]);
    assert_eq!(bands.upper, [189.0, 190.0]);
    assert_eq!(bands.lower, [181.0, 180.0]);
    assert!(
        requests.lock().unwrap()[0]
            .as_str()
            .contains("function=BBANDS&symbol=IBM&interval=weekly&time_period=60&series_type=high")
    );
}

#[tokio::test]
async fn generic_fetch_returns_index_aligned_series() {
    let document = intraday_document(
        "1min",
        &[
            ("2024-03-01 10:01:00", "2", "2", "2", "2", "20"),
            ("2024-03-01 10:00:00", "1", "1", "1", "1", "10"),
        ],
    );
    let params = QueryParams::new("IBM").interval(Interval::OneMinute);
    let series = client(CannedTransport::json(&document))
        .fetch(&catalog::TIME_SERIES_INTRADAY, &params)
        .await
        .unwrap();

    assert_eq!(series.function, "TIME_SERIES_INTRADAY");
    assert_eq!(series.symbol, "IBM");
    assert_eq!(series.metadata["4. Interval"], "1min");
    assert!(series.columns.values().all(|c| c.len() == series.len()));
    let first = series.observation(0).unwrap();
    assert_eq!(first.timestamp, "2024-03-01 10:00:00");
}

#[tokio::test]
async fn non_success_status_carries_the_code() {
    let transport = CannedTransport::with_status(StatusCode::SERVICE_UNAVAILABLE, "try later");
    let err = client(transport).time_series_daily_adjusted("IBM").await.unwrap_err();

    match &err {
        ProviderError::HttpStatus { status, body, .. } => {
            assert_eq!(*status, StatusCode::SERVICE_UNAVAILABLE);
            assert_eq!(body, "try later");
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
    assert!(err.is_transient());
}

#[tokio::test]
async fn broken_connection_is_a_transient_transport_error() {
    let transport = CannedTransport::failing(std::io::ErrorKind::ConnectionReset);
    let requests = transport.requests();
    let err = client(transport)
        .rsi("IBM", Interval::Daily, 14, SeriesType::Close)
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Transport { .. }), "{err:?}");
    assert!(err.is_transient());
    assert!(!err.is_timeout());
    assert_eq!(err.status(), None);
    assert_eq!(requests.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn timed_out_foreign_transport_reports_a_timeout() {
    let err = client(CannedTransport::failing(std::io::ErrorKind::TimedOut))
        .time_series_daily_adjusted("IBM")
        .await
        .unwrap_err();
    assert!(err.is_timeout(), "{err:?}");
}

#[tokio::test]
async fn duplicate_timestamps_fail_the_call() {
    let body = r#"{"Time Series (5min)": {
        "2024-03-01 10:05:00": {"1. open": "2", "2. high": "2", "3. low": "2", "4. close": "2", "5. volume": "20"},
        "2024-03-01 10:00:00": {"1. open": "1", "2. high": "1", "3. low": "1", "4. close": "1", "5. volume": "10"},
        "2024-03-01 10:05:00": {"1. open": "9", "2. high": "9", "3. low": "9", "4. close": "9", "5. volume": "90"}
    }}"#;
    let err = client(CannedTransport::ok(body))
        .time_series_intraday("IBM", Interval::FiveMinutes)
        .await
        .unwrap_err();
    assert!(
        matches!(err, ProviderError::Schema { ref message, .. } if message.contains("2024-03-01 10:05:00")),
        "{err:?}"
    );
}

#[tokio::test]
async fn unparsable_success_body_is_a_decode_error() {
    let err = client(CannedTransport::ok("<html>maintenance</html>"))
        .time_series_daily_adjusted("IBM")
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Decode { .. }), "{err:?}");
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn missing_series_key_is_a_schema_error() {
    let document = json!({ "Meta Data": { "2. Symbol": "IBM" } });
    let err = client(CannedTransport::json(&document))
        .time_series_intraday("IBM", Interval::FifteenMinutes)
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Schema { .. }), "{err:?}");
}

#[tokio::test]
async fn observation_missing_a_field_fails_the_call() {
    let document = json!({
        "Technical Analysis: BBANDS": {
            "2024-03-04": { "Real Upper Band": "190.0", "Real Middle Band": "185.0" },
            "2024-03-01": { "Real Upper Band": "189.0", "Real Lower Band": "181.0", "Real Middle Band": "184.0" }
        }
    });
    let err = client(CannedTransport::json(&document))
        .bbands("IBM", Interval::Daily, 20, SeriesType::Close)
        .await
        .unwrap_err();
    assert!(
        matches!(err, ProviderError::Schema { ref message, .. } if message.contains("Real Lower Band")),
        "{err:?}"
    );
}

#[tokio::test]
async fn provider_error_message_is_surfaced() {
    let document = json!({
        "Error Message": "Invalid API call. Please retry or visit the documentation for TIME_SERIES_INTRADAY."
    });
    let err = client(CannedTransport::json(&document))
        .time_series_intraday("NOPE", Interval::FiveMinutes)
        .await
        .unwrap_err();
    assert!(
        matches!(err, ProviderError::Api { ref message, .. } if message.starts_with("Invalid API call"))
    );
}

#[tokio::test]
async fn invalid_parameters_never_reach_the_transport() {
    let transport = CannedTransport::ok("{}");
    let requests = transport.requests();
    let client = client(transport);

    let err = client
        .time_series_intraday("IBM", Interval::Monthly)
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Validation { .. }));

    let err = client
        .sma("IBM", Interval::Daily, 0, SeriesType::Close)
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Validation { .. }));

    let err = client.time_series_daily_adjusted("").await.unwrap_err();
    assert!(matches!(err, ProviderError::Validation { .. }));

    assert!(requests.lock().unwrap().is_empty());
}

#[test]
fn base_url_must_be_hierarchical() {
    let bad = config().with_base_url("not a url");
    let err = AlphaVantageClient::with_transport(CannedTransport::ok(""), &bad).unwrap_err();
    assert!(matches!(err, ProviderInitError::InvalidBaseUrl { .. }));

    let bad = config().with_base_url("mailto:quotes@example.com");
    let err = AlphaVantageClient::with_transport(CannedTransport::ok(""), &bad).unwrap_err();
    assert!(matches!(err, ProviderInitError::InvalidBaseUrl { .. }));
}

#[test]
fn endpoint_is_derived_from_base_url() {
    let cfg = config().with_base_url("http://127.0.0.1:8080/av/");
    let client = AlphaVantageClient::with_transport(CannedTransport::ok(""), &cfg).unwrap();
    assert_eq!(client.endpoint().as_str(), "http://127.0.0.1:8080/av/query");
}

#[tokio::test]
#[ignore]
async fn live_intraday_fetch() {
    // Requires ALPHAVANTAGE_API_KEY; the provider allows 5 calls per minute.
    if std::env::var("ALPHAVANTAGE_API_KEY").is_err() {
        println!("Skipping live_intraday_fetch: API key not set.");
        return;
    }

    let client = AlphaVantageClient::from_env().expect("Failed to create client");
    let bars = client
        .time_series_intraday("IBM", Interval::FiveMinutes)
        .await
        .expect("intraday request failed");

    assert!(!bars.times.is_empty());
    assert!(bars.times.windows(2).all(|w| w[0] < w[1]));
}
