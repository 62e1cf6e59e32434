use crate::{
    catalog::{self, OperationSpec},
    models::request_params::QueryParams,
};

use super::commands::{Commands, IndicatorArgs};

impl IndicatorArgs {
    fn into_params(self) -> QueryParams {
        QueryParams::new(self.symbol)
            .interval(self.interval)
            .time_period(self.time_period)
            .series_type(self.series_type)
    }
}

impl Commands {
    /// Resolves a subcommand to the catalog operation and its parameters.
    pub fn into_request(self) -> (&'static OperationSpec, QueryParams) {
        match self {
            Commands::Intraday {
                symbol,
                interval,
                output_size,
            } => {
                let mut params = QueryParams::new(symbol).interval(interval);
                params.output_size = output_size;
                (&catalog::TIME_SERIES_INTRADAY, params)
            }
            Commands::DailyAdjusted {
                symbol,
                output_size,
            } => {
                let mut params = QueryParams::new(symbol);
                params.output_size = output_size;
                (&catalog::TIME_SERIES_DAILY_ADJUSTED, params)
            }
            Commands::Sma(args) => (&catalog::SMA, args.into_params()),
            Commands::Bbands(args) => (&catalog::BBANDS, args.into_params()),
            Commands::Rsi(args) => (&catalog::RSI, args.into_params()),
        }
    }
}
