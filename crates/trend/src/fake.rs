//! In-memory [`StocksApi`] for controller tests.

use serde_json::{json, Value};
use std::sync::Mutex;
use trend_client::prelude::*;
use trend_client::StatusCode;
use trend_common::{ListRequest, PageResult, PageSize, PriceHistoryEntry, Stock};

#[derive(Debug, Default)]
pub struct FakeApi {
    pub stocks: Vec<Stock>,
    pub exchanges: Vec<String>,
    pub history: Vec<PriceHistoryEntry>,
    pub unauthorized: bool,
    pub failing_history: bool,
    pub failing_analytics: bool,
    pub requests: Mutex<Vec<ListRequest>>,
}

impl FakeApi {
    fn check(&self) -> Result<(), ApiError> {
        if self.unauthorized {
            return Err(ApiError::Unauthorized {
                redirect: LOGIN_PATH,
            });
        }
        Ok(())
    }

    fn page(&self, page: usize, size: PageSize) -> PageResult<Stock> {
        let items = self
            .stocks
            .iter()
            .skip(page * size.get())
            .take(size.get())
            .cloned()
            .collect();
        PageResult {
            items,
            total_pages: self.stocks.len().div_ceil(size.get()),
            total_elements: self.stocks.len(),
        }
    }

    pub fn requests(&self) -> Vec<ListRequest> {
        self.requests.lock().unwrap().clone()
    }
}

fn bad_gateway() -> ApiError {
    ApiError::Status {
        status: StatusCode::BAD_GATEWAY,
        body: String::new(),
    }
}

impl StocksApi for FakeApi {
    async fn get_stocks(
        &self,
        page: usize,
        size: PageSize,
        _extra: &[(String, String)],
    ) -> Result<PageResult<Stock>, ApiError> {
        self.check()?;
        Ok(self.page(page, size))
    }

    async fn get_stock_by_id(&self, id: i64) -> Result<Option<Stock>, ApiError> {
        self.check()?;
        Ok(self.stocks.iter().find(|s| s.id == Some(id)).cloned())
    }

    async fn get_stock_by_symbol(&self, symbol: &str) -> Result<Option<Stock>, ApiError> {
        self.check()?;
        Ok(self.stocks.iter().find(|s| s.symbol() == symbol).cloned())
    }

    async fn search_stocks(
        &self,
        query: &str,
        page: usize,
        size: PageSize,
        _extra: &[(String, String)],
    ) -> Result<PageResult<Stock>, ApiError> {
        self.check()?;
        let matching = FakeApi {
            stocks: self
                .stocks
                .iter()
                .filter(|s| s.symbol().to_lowercase().contains(&query.to_lowercase()))
                .cloned()
                .collect(),
            ..Default::default()
        };
        Ok(matching.page(page, size))
    }

    async fn get_stocks_by_exchange(
        &self,
        exchange: &str,
        page: usize,
        size: PageSize,
    ) -> Result<PageResult<Stock>, ApiError> {
        self.check()?;
        let matching = FakeApi {
            stocks: self
                .stocks
                .iter()
                .filter(|s| s.exchange.as_deref() == Some(exchange))
                .cloned()
                .collect(),
            ..Default::default()
        };
        Ok(matching.page(page, size))
    }

    async fn get_exchanges(&self) -> Result<Vec<String>, ApiError> {
        self.check()?;
        Ok(self.exchanges.clone())
    }

    async fn get_stock_history(
        &self,
        _id: i64,
        _params: &HistoryParams,
    ) -> Result<Vec<PriceHistoryEntry>, ApiError> {
        self.check()?;
        if self.failing_history {
            return Err(bad_gateway());
        }
        Ok(self.history.clone())
    }

    async fn get_trending_stocks(&self, params: &TrendingParams) -> Result<Vec<Stock>, ApiError> {
        self.check()?;
        Ok(self.stocks.iter().take(params.limit).cloned().collect())
    }

    async fn get_stock_analytics(&self, id: i64) -> Result<Value, ApiError> {
        self.check()?;
        if self.failing_analytics {
            return Err(bad_gateway());
        }
        Ok(json!({ "id": id, "volatility": 0.2 }))
    }

    async fn add_to_watchlist(
        &self,
        _stock_id: i64,
        _watchlist_id: i64,
    ) -> Result<Value, ApiError> {
        self.check()?;
        Ok(Value::Null)
    }

    async fn remove_from_watchlist(
        &self,
        _stock_id: i64,
        _watchlist_id: i64,
    ) -> Result<Value, ApiError> {
        self.check()?;
        Ok(Value::Null)
    }

    async fn fetch_page(&self, request: &ListRequest) -> Result<PageResult<Stock>, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        match request {
            ListRequest::Search { query, page, size } => {
                self.search_stocks(query, *page, *size, &[]).await
            }
            ListRequest::Exchange {
                exchange,
                page,
                size,
            } => self.get_stocks_by_exchange(exchange, *page, *size).await,
            ListRequest::All { page, size } => self.get_stocks(*page, *size, &[]).await,
        }
    }
}

pub fn stock(id: i64, symbol: &str, exchange: &str) -> Stock {
    Stock {
        id: Some(id),
        symbol: Some(symbol.to_string()),
        company_name: Some(format!("{symbol} Corp")),
        exchange: Some(exchange.to_string()),
        ..Default::default()
    }
}
