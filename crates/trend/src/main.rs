use anyhow::{Context, Result};
use clap::Parser;
use trend_client::prelude::*;
use trend_common::QueryState;

mod cli;
mod config;
mod controller;
mod detail;
#[cfg(test)]
mod fake;
mod notice;
mod router;
mod session;
mod ui;
mod view;

use cli::{Commands, WatchlistAction};
use config::Config;
use controller::{ListController, Outcome};
use notice::Notice;
use router::Route;

fn preprocess() {
    dotenv::dotenv().ok();
    // keep log lines out of the rendered views unless asked for
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("warn"));
}

#[tokio::main]
async fn main() -> Result<()> {
    preprocess();

    let cli = cli::Cli::parse();
    log::info!("Command line input recorded: {cli:#?}");

    let config = Config::from_env()?.with_overrides(&cli);
    log::debug!("{config:?}");
    let api = build_client(&config.api_url, config.storage.clone(), config.timeout)
        .with_context(|| format!("cannot reach the stocks backend at {}", config.api_url))?;

    match cli.command {
        // interactive, starting from the list
        Commands::Browse => session::browse(&api, Route::List).await?,

        // interactive, starting from any client route
        Commands::Open { path } => {
            let route: Route = path.parse()?;
            session::browse(&api, route).await?;
        }

        Commands::List {
            page,
            size,
            search,
            exchange,
        } => {
            let mut list = ListController::new(QueryState {
                page: page.saturating_sub(1),
                size,
                search_query: search.unwrap_or_default(),
                selected_exchange: exchange.unwrap_or_default(),
            });
            match ui::with_spinner(view::LOADING, list.refresh(&api)).await {
                Outcome::Redirect(_) => println!("{}", view::LOGIN_HINT),
                _ => {
                    println!("{}", view::render_list(&list));
                    for notice in list.take_notices() {
                        eprintln!("{notice}");
                    }
                }
            }
        }

        Commands::Stock { symbol } => {
            let state = ui::with_spinner(view::detail::LOADING, detail::load(&api, &symbol)).await;
            println!("{}", view::detail::render(&state));
        }

        Commands::Trending { limit, period } => {
            let params = TrendingParams { limit, period };
            let stocks = ui::with_spinner(view::LOADING, api.get_trending_stocks(&params))
                .await
                .context("failed to fetch trending stocks")?;
            println!(
                "{}",
                view::table::render(&view::stock_columns(), &stocks, false, view::EMPTY)
            );
        }

        Commands::Analytics { id } => {
            let analytics = api
                .get_stock_analytics(id)
                .await
                .with_context(|| format!("failed to fetch analytics for stock {id}"))?;
            println!("{}", serde_json::to_string_pretty(&analytics)?);
        }

        Commands::Exchanges => {
            let exchanges = api.get_exchanges().await.context("failed to fetch exchanges")?;
            for exchange in exchanges {
                println!("{exchange}");
            }
        }

        Commands::Watchlist { action } => match action {
            WatchlistAction::Add {
                stock_id,
                watchlist_id,
            } => {
                api.add_to_watchlist(stock_id, watchlist_id)
                    .await
                    .with_context(|| {
                        format!("failed to add stock {stock_id} to watchlist {watchlist_id}")
                    })?;
                println!(
                    "{}",
                    Notice::success(format!("Stock {stock_id} added to watchlist {watchlist_id}"))
                );
            }
            WatchlistAction::Remove {
                stock_id,
                watchlist_id,
            } => {
                api.remove_from_watchlist(stock_id, watchlist_id)
                    .await
                    .with_context(|| {
                        format!("failed to remove stock {stock_id} from watchlist {watchlist_id}")
                    })?;
                println!(
                    "{}",
                    Notice::success(format!(
                        "Stock {stock_id} removed from watchlist {watchlist_id}"
                    ))
                );
            }
        },

        Commands::Login { token } => {
            api.login(&token).await?;
            println!(
                "{}",
                Notice::success(format!("Session stored in {}", api.storage().path().display()))
            );
        }

        Commands::Logout => {
            if api.logout().await? {
                println!("{}", Notice::success("Signed out"));
            } else {
                println!("{}", Notice::info("No session was stored"));
            }
        }
    }

    Ok(())
}
