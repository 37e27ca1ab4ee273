use clap::{Parser, Subcommand};
use std::path::PathBuf;
use trend_common::PageSize;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base URL of the stocks backend; overrides `TREND_API_URL`.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Key-value file holding the session token; overrides `TREND_STORAGE`.
    #[arg(long, global = true)]
    pub storage: Option<PathBuf>,

    /// Request timeout in seconds; overrides `TREND_TIMEOUT_SECS`.
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse the stocks list interactively.
    Browse,

    /// Print one page of the stocks list.
    List {
        /// Page number, starting at 1.
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Rows per page: 10, 20, 50 or 100.
        #[arg(long, default_value = "20")]
        size: PageSize,

        /// Search by symbol or name; takes priority over `--exchange`.
        #[arg(long)]
        search: Option<String>,

        /// Only list stocks from this exchange.
        #[arg(long)]
        exchange: Option<String>,
    },

    /// Show a single stock with its recent price history.
    Stock { symbol: String },

    /// Open a client route interactively, e.g. `/` or `/stock/AAPL`.
    Open { path: String },

    /// List trending stocks.
    Trending {
        #[arg(long, default_value_t = 10)]
        limit: usize,

        #[arg(long, default_value = "1D")]
        period: String,
    },

    /// Print the analytics of a stock, by id.
    Analytics { id: i64 },

    /// List the exchanges stocks can be filtered by.
    Exchanges,

    /// Add or remove a stock from a watchlist.
    Watchlist {
        #[command(subcommand)]
        action: WatchlistAction,
    },

    /// Store a session token for every following request.
    Login { token: String },

    /// Forget the stored session token.
    Logout,
}

#[derive(Subcommand, Debug)]
pub enum WatchlistAction {
    Add { stock_id: i64, watchlist_id: i64 },
    Remove { stock_id: i64, watchlist_id: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn list_arguments() {
        let cli = Cli::parse_from([
            "trend", "--api-url", "http://h/api", "list", "--size", "50", "--search", "apple",
        ]);
        assert_eq!(cli.api_url.as_deref(), Some("http://h/api"));
        match cli.command {
            Commands::List { page, size, search, exchange } => {
                assert_eq!(page, 1);
                assert_eq!(size, PageSize::Fifty);
                assert_eq!(search.as_deref(), Some("apple"));
                assert_eq!(exchange, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unsupported_page_size() {
        assert!(Cli::try_parse_from(["trend", "list", "--size", "25"]).is_err());
    }
}
