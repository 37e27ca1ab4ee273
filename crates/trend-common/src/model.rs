use serde::{Deserialize, Serialize};

/// Snapshot of a single stock, as served by the backend.
///
/// Every field is optional on the wire; a missing field is rendered as `N/A`
/// by the views rather than failing the whole page.
/// ```json
/// {
///     "id": 1,
///     "symbol": "AAPL",
///     "companyName": "Apple Inc.",
///     "exchange": "NASDAQ",
///     "currentPrice": 189.84,
///     "priceChange": -1.2,
///     "priceChangePercentage": -0.63,
///     "marketCap": 2950000000000.0
/// }
/// ```
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    pub id: Option<i64>,
    pub symbol: Option<String>,
    #[serde(alias = "name")]
    pub company_name: Option<String>,
    pub exchange: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    #[serde(alias = "lastPrice")]
    pub current_price: Option<f64>,
    pub price_change: Option<f64>,
    pub price_change_percentage: Option<f64>,
    pub market_cap: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub week_high52: Option<f64>,
    pub week_low52: Option<f64>,
    pub volume: Option<f64>,
    pub average_volume: Option<f64>,
}

impl Stock {
    /// Symbol, or an empty string when the backend omitted it.
    pub fn symbol(&self) -> &str {
        self.symbol.as_deref().unwrap_or_default()
    }
}

/// One row of a stock's price history; the detail view assumes newest-first.
/// ```json
/// { "date": "2024-03-01", "closingPrice": 179.66, "volume": 73563082 }
/// ```
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceHistoryEntry {
    pub date: Option<String>,
    #[serde(alias = "closePrice")]
    pub closing_price: Option<f64>,
    pub volume: Option<f64>,
}
