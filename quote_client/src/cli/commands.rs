use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::models::interval::{Interval, OutputSize, SeriesType};

#[derive(Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to a TOML config file (api_key, base_url, timeout_secs).
    /// Falls back to ALPHAVANTAGE_* environment variables.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Intraday OHLCV bars
    Intraday {
        /// Ticker symbol (e.g. "IBM")
        #[arg(long)]
        symbol: String,

        /// Bar spacing: 1min, 5min, 15min, 30min or 60min
        #[arg(long, default_value = "5min")]
        interval: Interval,

        /// compact (latest 100) or full
        #[arg(long)]
        output_size: Option<OutputSize>,
    },

    /// Daily bars with adjusted close, dividends and splits
    DailyAdjusted {
        /// Ticker symbol (e.g. "IBM")
        #[arg(long)]
        symbol: String,

        /// compact (latest 100) or full
        #[arg(long)]
        output_size: Option<OutputSize>,
    },

    /// Simple moving average
    Sma(IndicatorArgs),

    /// Bollinger bands
    Bbands(IndicatorArgs),

    /// Relative strength index
    Rsi(IndicatorArgs),
}

#[derive(Args)]
pub struct IndicatorArgs {
    /// Ticker symbol (e.g. "IBM")
    #[arg(long)]
    pub symbol: String,

    /// 1min, 5min, 15min, 30min, 60min, daily, weekly or monthly
    #[arg(long, default_value = "daily")]
    pub interval: Interval,

    /// Number of data points per indicator value
    #[arg(long, default_value_t = 20)]
    pub time_period: u32,

    /// close, open, high or low
    #[arg(long, default_value = "close")]
    pub series_type: SeriesType,
}
