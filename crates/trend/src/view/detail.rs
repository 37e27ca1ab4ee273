use colored::Colorize;
use serde_json::Value;
use trend_common::{format, PriceHistoryEntry, Stock};

use super::table::{self, Column};
use super::LOGIN_HINT;
use crate::detail::{DetailState, StockDetail, HISTORY_ROWS};

pub const LOADING: &str = "Loading stock data...";
const BACK: &str = "‹ Back to Stocks List (b)";

pub fn render(state: &DetailState) -> String {
    match state {
        DetailState::Loading => LOADING.to_string(),
        DetailState::Error { message } => {
            format!("{}\n{message}\n\n{BACK}", "Error".red().bold())
        }
        DetailState::NotFound { symbol } => format!(
            "{}\nThe stock symbol '{symbol}' was not found.\n\n{BACK}",
            "Stock not found".bold()
        ),
        DetailState::Redirect(_) => LOGIN_HINT.to_string(),
        DetailState::Loaded(detail) => loaded(detail),
    }
}

fn loaded(detail: &StockDetail) -> String {
    let stock = &detail.stock;
    let mut sections = vec![
        header(stock),
        price_line(stock),
        facts(stock),
    ];
    if let Some(analytics) = &detail.analytics {
        sections.push(analytics_panel(analytics));
    }
    sections.push(history(&detail.history));
    sections.push(BACK.dimmed().to_string());
    sections.join("\n\n")
}

fn header(stock: &Stock) -> String {
    let title = match &stock.company_name {
        Some(name) => format!("{} - {name}", stock.symbol()),
        None => stock.symbol().to_string(),
    };
    match &stock.exchange {
        Some(exchange) => format!("{}\n{}", title.bold(), exchange.dimmed()),
        None => title.bold().to_string(),
    }
}

/// `$189.84  -1.20 (-0.63%)`, green when the change is non-negative.
fn price_line(stock: &Stock) -> String {
    let price = format::price(stock.current_price).bold().to_string();
    let Some(change) = stock.price_change else {
        return price;
    };

    let mut movement = format::signed(change);
    if let Some(pct) = stock.price_change_percentage {
        movement.push_str(&format!(" ({}%)", format::signed(pct)));
    }
    let movement = if change >= 0.0 {
        movement.green()
    } else {
        movement.red()
    };
    format!("{price}  {movement}")
}

fn facts(stock: &Stock) -> String {
    let text = |value: &Option<String>| {
        value
            .clone()
            .unwrap_or_else(|| format::NOT_AVAILABLE.to_string())
    };
    let rows = [
        ("Sector", text(&stock.sector)),
        ("Industry", text(&stock.industry)),
        ("Market Cap", format::market_cap_billions(stock.market_cap)),
        ("P/E Ratio", format::ratio(stock.pe_ratio)),
        ("52 Week High", format::price(stock.week_high52)),
        ("52 Week Low", format::price(stock.week_low52)),
        ("Volume", format::grouped(stock.volume)),
        ("Avg Volume", format::grouped(stock.average_volume)),
    ];
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or_default();
    rows.iter()
        .map(|(label, value)| format!("{:<width$}  {value}", label.dimmed()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn analytics_panel(analytics: &Value) -> String {
    let body = match analytics {
        Value::Object(fields) => fields
            .iter()
            .map(|(key, value)| match value {
                Value::String(s) => format!("{key}: {s}"),
                other => format!("{key}: {other}"),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        other => other.to_string(),
    };
    format!("{}\n{body}", "Analytics".bold())
}

fn history(entries: &[PriceHistoryEntry]) -> String {
    let columns: [Column<PriceHistoryEntry>; 3] = [
        Column {
            label: "Date",
            cell: |e| format::date(e.date.as_deref()),
            emphasis: false,
        },
        Column {
            label: "Close",
            cell: |e| format::price(e.closing_price),
            emphasis: false,
        },
        Column {
            label: "Volume",
            cell: |e| format::grouped(e.volume),
            emphasis: false,
        },
    ];
    let recent = &entries[..entries.len().min(HISTORY_ROWS)];
    format!(
        "{}\n{}",
        "Recent Price History".bold(),
        table::render(&columns, recent, false, "No price history available.")
    )
}
