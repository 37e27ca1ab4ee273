pub mod client;
pub mod error;
pub mod stocks;
pub mod storage;

pub use reqwest::StatusCode;

pub mod prelude {
    pub use crate::client::{ApiClient, LOGIN_PATH};
    pub use crate::error::ApiError;
    pub use crate::stocks::{HistoryParams, Params, StocksApi, TrendingParams};
    pub use crate::storage::{Storage, StorageError, AUTH_TOKEN_KEY};

    use std::path::PathBuf;
    use std::time::Duration;

    /// Build an [`ApiClient`] for the backend mounted at `base_url`, keeping
    /// its session token in the key-value file at `storage`.
    pub fn build_client(
        base_url: &str,
        storage: impl Into<PathBuf>,
        timeout: Duration,
    ) -> Result<ApiClient, ApiError> {
        ApiClient::new(base_url, Storage::new(storage), timeout)
    }
}
