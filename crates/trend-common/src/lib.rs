pub mod format;
pub mod model;
pub mod normalize;
pub mod pagination;
pub mod query;

pub use model::{PriceHistoryEntry, Stock};
pub use normalize::{extract_items, normalize, normalize_list, PageResult};
pub use pagination::{window, PageEvent, PageSize, PageToken, Pagination};
pub use query::{ListRequest, QueryState};
