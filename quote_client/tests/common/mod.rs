#![allow(dead_code)]

use std::{
    io,
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use quote_client::{
    ClientConfig,
    providers::{ProviderError, RawResponse, Transport},
};
use reqwest::StatusCode;
use serde_json::{Value, json};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
    sync::oneshot,
};
use url::Url;

pub const API_KEY: &str = "test-key";

pub fn config() -> ClientConfig {
    ClientConfig::new(API_KEY)
}

/// Transport that answers every request with the same canned response.
pub struct CannedTransport {
    reply: Result<(StatusCode, String), io::ErrorKind>,
    requests: Arc<Mutex<Vec<Url>>>,
}

impl CannedTransport {
    pub fn ok(body: impl Into<String>) -> Self {
        Self::with_status(StatusCode::OK, body)
    }

    pub fn json(document: &Value) -> Self {
        Self::ok(document.to_string())
    }

    pub fn with_status(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            reply: Ok((status, body.into())),
            requests: Arc::default(),
        }
    }

    /// Fails every request as if the connection broke with `kind`.
    pub fn failing(kind: io::ErrorKind) -> Self {
        Self {
            reply: Err(kind),
            requests: Arc::default(),
        }
    }

    /// Shared view of every URL requested through this transport.
    pub fn requests(&self) -> Arc<Mutex<Vec<Url>>> {
        Arc::clone(&self.requests)
    }
}

#[async_trait]
impl Transport for CannedTransport {
    async fn get(&self, url: &Url) -> Result<RawResponse, ProviderError> {
        self.requests.lock().unwrap().push(url.clone());
        match &self.reply {
            Ok((status, body)) => Ok(RawResponse {
                status: *status,
                body: body.clone(),
            }),
            Err(kind) => Err(ProviderError::transport(io::Error::from(*kind))),
        }
    }
}

/// Intraday payload in provider order (newest first).
pub fn intraday_document(interval: &str, rows: &[(&str, &str, &str, &str, &str, &str)]) -> Value {
    let mut series = serde_json::Map::new();
    for (time, open, high, low, close, volume) in rows {
        series.insert(
            time.to_string(),
            json!({
                "1. open": open,
                "2. high": high,
                "3. low": low,
                "4. close": close,
                "5. volume": volume,
            }),
        );
    }
    let last_refreshed = rows.first().map(|row| row.0).unwrap_or_default();
    let mut document = serde_json::Map::new();
    document.insert(
        "Meta Data".to_string(),
        json!({
            "1. Information": format!("Intraday ({interval}) open, high, low, close prices and volume"),
            "2. Symbol": "IBM",
            "3. Last Refreshed": last_refreshed,
            "4. Interval": interval,
        }),
    );
    document.insert(format!("Time Series ({interval})"), Value::Object(series));
    Value::Object(document)
}

/// Serves exactly one raw HTTP response on a loopback port.
///
/// The receiver yields the request head the client sent.
pub async fn serve_once(status_line: &str, body: &str) -> (SocketAddr, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let (head_tx, head_rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 8192];
        let read = socket.read(&mut buf).await.unwrap_or(0);
        let _ = head_tx.send(String::from_utf8_lossy(&buf[..read]).into_owned());
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
    });

    (addr, head_rx)
}

/// Accepts one connection and never answers it.
pub async fn serve_silence(hold: Duration) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (_socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(hold).await;
    });
    addr
}

/// A loopback address with nothing listening on it.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}
