use serde::de::DeserializeOwned;
use serde_json::Value;

/// The one shape every list fetch converges to, whatever envelope the
/// backend wrapped its items in.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total_pages: usize,
    pub total_elements: usize,
}

impl<T> Default for PageResult<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_pages: 0,
            total_elements: 0,
        }
    }
}

/// Locate the item array inside a response body.
///
/// Resolution order is `body.content`, then `body.data`, then `body` itself;
/// the first of those that is an array wins. Anything else yields no items.
/// ```rust
/// use serde_json::json;
/// use trend_common::extract_items;
///
/// assert_eq!(extract_items(&json!({ "data": [1, 2] })).len(), 2);
/// assert!(extract_items(&json!(null)).is_empty());
/// ```
pub fn extract_items(body: &Value) -> &[Value] {
    [body.get("content"), body.get("data"), Some(body)]
        .into_iter()
        .flatten()
        .find_map(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Reduce an arbitrary list response to a [`PageResult`].
///
/// - items: see [`extract_items`]
/// - `total_elements`: `body.totalElements`, else `body.total`, else the item count
/// - `total_pages`: `body.totalPages`, else `ceil(total_elements / size)`, else 0
pub fn normalize<T: DeserializeOwned>(body: &Value, size: usize) -> PageResult<T> {
    let items: Vec<T> = decode_items(extract_items(body));

    let total_elements = count_field(body, "totalElements")
        .or_else(|| count_field(body, "total"))
        .unwrap_or(items.len());

    let total_pages = count_field(body, "totalPages").unwrap_or_else(|| {
        if size == 0 {
            0
        } else {
            total_elements.div_ceil(size)
        }
    });

    PageResult {
        items,
        total_pages,
        total_elements,
    }
}

/// Items only, for responses that carry no paging metadata worth keeping
/// (price history, exchanges, trending).
pub fn normalize_list<T: DeserializeOwned>(body: &Value) -> Vec<T> {
    decode_items(extract_items(body))
}

// an undecodable element is dropped, never the whole page
fn decode_items<T: DeserializeOwned>(raw: &[Value]) -> Vec<T> {
    raw.iter()
        .enumerate()
        .filter_map(|(i, value)| match T::deserialize(value) {
            Ok(item) => Some(item),
            Err(e) => {
                log::warn!("skipping item #{i}; failed to decode: {e}");
                None
            }
        })
        .collect()
}

/// A field counts as defined when it holds a non-negative whole number.
fn count_field(body: &Value, key: &str) -> Option<usize> {
    let value = body.get(key)?;
    value
        .as_u64()
        .or_else(|| {
            value
                .as_f64()
                .filter(|n| *n >= 0.0 && n.fract() == 0.0)
                .map(|n| n as u64)
        })
        .map(|n| n as usize)
}
