use serde_json::Value;
use std::future::Future;
use trend_common::{
    normalize, normalize_list, ListRequest, PageResult, PageSize, PriceHistoryEntry, Stock,
};

use crate::client::ApiClient;
use crate::error::ApiError;

/// Query parameters, in the order they are sent.
pub type Params = Vec<(String, String)>;

/// Query for `GET /stocks/{id}/history`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryParams {
    pub period: String,
    pub interval: String,
}

impl Default for HistoryParams {
    fn default() -> Self {
        Self {
            period: "1M".to_string(),
            interval: "DAILY".to_string(),
        }
    }
}

/// Query for `GET /stocks/trending`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendingParams {
    pub limit: usize,
    pub period: String,
}

impl Default for TrendingParams {
    fn default() -> Self {
        Self {
            limit: 10,
            period: "1D".to_string(),
        }
    }
}

/// Typed calls against the `/stocks` resource.
///
/// List calls come back already normalized, whatever envelope the backend
/// used; see [`trend_common::normalize`].
pub trait StocksApi {
    /// `GET /stocks?page&size&sort=symbol`; `extra` overrides same-named defaults.
    fn get_stocks(
        &self,
        page: usize,
        size: PageSize,
        extra: &[(String, String)],
    ) -> impl Future<Output = Result<PageResult<Stock>, ApiError>> + Send;

    /// `GET /stocks/{id}`; `None` when the stock does not exist.
    fn get_stock_by_id(
        &self,
        id: i64,
    ) -> impl Future<Output = Result<Option<Stock>, ApiError>> + Send;

    /// `GET /stocks/symbol/{symbol}`; `None` when the stock does not exist.
    fn get_stock_by_symbol(
        &self,
        symbol: &str,
    ) -> impl Future<Output = Result<Option<Stock>, ApiError>> + Send;

    /// `GET /stocks/search?q&page&size`
    fn search_stocks(
        &self,
        query: &str,
        page: usize,
        size: PageSize,
        extra: &[(String, String)],
    ) -> impl Future<Output = Result<PageResult<Stock>, ApiError>> + Send;

    /// `GET /stocks/exchange/{exchange}?page&size`
    fn get_stocks_by_exchange(
        &self,
        exchange: &str,
        page: usize,
        size: PageSize,
    ) -> impl Future<Output = Result<PageResult<Stock>, ApiError>> + Send;

    /// `GET /stocks/exchanges`
    fn get_exchanges(&self) -> impl Future<Output = Result<Vec<String>, ApiError>> + Send;

    /// `GET /stocks/{id}/history?period&interval`
    fn get_stock_history(
        &self,
        id: i64,
        params: &HistoryParams,
    ) -> impl Future<Output = Result<Vec<PriceHistoryEntry>, ApiError>> + Send;

    /// `GET /stocks/trending?limit&period`
    fn get_trending_stocks(
        &self,
        params: &TrendingParams,
    ) -> impl Future<Output = Result<Vec<Stock>, ApiError>> + Send;

    /// `GET /stocks/{id}/analytics`; the payload is free-form.
    fn get_stock_analytics(&self, id: i64) -> impl Future<Output = Result<Value, ApiError>> + Send;

    /// `POST /stocks/{id}/watchlist/{watchlistId}`
    fn add_to_watchlist(
        &self,
        stock_id: i64,
        watchlist_id: i64,
    ) -> impl Future<Output = Result<Value, ApiError>> + Send;

    /// `DELETE /stocks/{id}/watchlist/{watchlistId}`
    fn remove_from_watchlist(
        &self,
        stock_id: i64,
        watchlist_id: i64,
    ) -> impl Future<Output = Result<Value, ApiError>> + Send;

    /// Dispatch whichever list call `request` resolved to.
    fn fetch_page(
        &self,
        request: &ListRequest,
    ) -> impl Future<Output = Result<PageResult<Stock>, ApiError>> + Send;
}

impl StocksApi for ApiClient {
    async fn get_stocks(
        &self,
        page: usize,
        size: PageSize,
        extra: &[(String, String)],
    ) -> Result<PageResult<Stock>, ApiError> {
        let query = merge_params(
            vec![
                ("page", page.to_string()),
                ("size", size.to_string()),
                ("sort", "symbol".to_string()),
            ],
            extra,
        );
        let body = self.get(&["stocks"], &query).await?;
        Ok(normalize(&body, size.get()))
    }

    async fn get_stock_by_id(&self, id: i64) -> Result<Option<Stock>, ApiError> {
        single_stock(self.get(&["stocks", &id.to_string()], &[]).await)
    }

    async fn get_stock_by_symbol(&self, symbol: &str) -> Result<Option<Stock>, ApiError> {
        single_stock(self.get(&["stocks", "symbol", symbol], &[]).await)
    }

    async fn search_stocks(
        &self,
        query: &str,
        page: usize,
        size: PageSize,
        extra: &[(String, String)],
    ) -> Result<PageResult<Stock>, ApiError> {
        let params = merge_params(
            vec![
                ("q", query.to_string()),
                ("page", page.to_string()),
                ("size", size.to_string()),
            ],
            extra,
        );
        let body = self.get(&["stocks", "search"], &params).await?;
        Ok(normalize(&body, size.get()))
    }

    async fn get_stocks_by_exchange(
        &self,
        exchange: &str,
        page: usize,
        size: PageSize,
    ) -> Result<PageResult<Stock>, ApiError> {
        let params = merge_params(
            vec![("page", page.to_string()), ("size", size.to_string())],
            &[],
        );
        let body = self.get(&["stocks", "exchange", exchange], &params).await?;
        Ok(normalize(&body, size.get()))
    }

    async fn get_exchanges(&self) -> Result<Vec<String>, ApiError> {
        let body = self.get(&["stocks", "exchanges"], &[]).await?;
        Ok(normalize_list(&body))
    }

    async fn get_stock_history(
        &self,
        id: i64,
        params: &HistoryParams,
    ) -> Result<Vec<PriceHistoryEntry>, ApiError> {
        let query = merge_params(
            vec![
                ("period", params.period.clone()),
                ("interval", params.interval.clone()),
            ],
            &[],
        );
        let body = self.get(&["stocks", &id.to_string(), "history"], &query).await?;
        Ok(normalize_list(&body))
    }

    async fn get_trending_stocks(&self, params: &TrendingParams) -> Result<Vec<Stock>, ApiError> {
        let query = merge_params(
            vec![
                ("limit", params.limit.to_string()),
                ("period", params.period.clone()),
            ],
            &[],
        );
        let body = self.get(&["stocks", "trending"], &query).await?;
        Ok(normalize_list(&body))
    }

    async fn get_stock_analytics(&self, id: i64) -> Result<Value, ApiError> {
        self.get(&["stocks", &id.to_string(), "analytics"], &[]).await
    }

    async fn add_to_watchlist(&self, stock_id: i64, watchlist_id: i64) -> Result<Value, ApiError> {
        self.post(&[
            "stocks",
            &stock_id.to_string(),
            "watchlist",
            &watchlist_id.to_string(),
        ])
        .await
    }

    async fn remove_from_watchlist(
        &self,
        stock_id: i64,
        watchlist_id: i64,
    ) -> Result<Value, ApiError> {
        self.delete(&[
            "stocks",
            &stock_id.to_string(),
            "watchlist",
            &watchlist_id.to_string(),
        ])
        .await
    }

    async fn fetch_page(&self, request: &ListRequest) -> Result<PageResult<Stock>, ApiError> {
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

/// Defaults first, in order; an `extra` entry replaces a default of the same
/// name in place, anything else is appended.
pub fn merge_params(defaults: Vec<(&str, String)>, extra: &[(String, String)]) -> Params {
    let mut params: Params = defaults
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect();

    for (key, value) in extra {
        match params.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value.clone(),
            None => params.push((key.clone(), value.clone())),
        }
    }
    params
}

fn single_stock(body: Result<Value, ApiError>) -> Result<Option<Stock>, ApiError> {
    match body {
        Ok(Value::Null) => Ok(None),
        Ok(body) => Ok(Some(serde_json::from_value(body)?)),
        Err(e) if e.is_not_found() => {
            log::debug!("{e}");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
