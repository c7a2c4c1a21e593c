//! Lazy paging over Twitter's `next_cursor`/`previous_cursor` endpoints.

use serde_json::Value;
use tracing::info;

use crate::api::ApiClient;
use crate::error::{TwitterError, TwitterResult};
use crate::methods::HttpMethod;
use crate::params::Params;

/// The cursor Twitter expects for the first page.
pub const FIRST_PAGE: i64 = -1;

type Decode<T> = fn(&Value) -> TwitterResult<T>;

/// A restartable sequence of pages. Nothing is fetched until [`Cursor::next_page`].
pub struct Cursor<'a, T> {
    client: &'a ApiClient,
    resource: &'static str,
    field: &'static str,
    params: Params,
    start: i64,
    next: Option<i64>,
    decode: Decode<T>,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(
        client: &'a ApiClient,
        resource: &'static str,
        field: &'static str,
        params: Params,
        start: i64,
        decode: Decode<T>,
    ) -> Self {
        Self {
            client,
            resource,
            field,
            params,
            start,
            next: Some(start),
            decode,
        }
    }

    /// Fetches the next page, or returns `None` once the last page has been read.
    pub async fn next_page(&mut self) -> TwitterResult<Option<Vec<T>>> {
        let cursor = match self.next {
            Some(cursor) => cursor,
            None => return Ok(None),
        };

        let mut params = self.params.clone();
        params.set("cursor", cursor.to_string());
        let data = self
            .client
            .call(HttpMethod::Get, self.resource, &params, false)
            .await?;

        let items = match data.get(self.field).and_then(Value::as_array) {
            Some(items) => items
                .iter()
                .map(self.decode)
                .collect::<TwitterResult<Vec<T>>>()?,
            None => Vec::new(),
        };
        self.next = following_cursor(&data);

        info!(
            resource = self.resource,
            cursor,
            items = items.len(),
            next = ?self.next,
            "fetched page"
        );
        Ok(Some(items))
    }

    /// Reads every remaining page and concatenates the items.
    pub async fn collect_all(mut self) -> TwitterResult<Vec<T>> {
        let mut out = Vec::new();
        while let Some(page) = self.next_page().await? {
            out.extend(page);
        }
        Ok(out)
    }

    /// Starts over from the first cursor.
    pub fn restart(&mut self) {
        self.next = Some(self.start);
    }

    pub fn is_exhausted(&self) -> bool {
        self.next.is_none()
    }
}

/// The cursor of the page after `data`; `None` when there is none or the
/// server points back at the page it just returned.
fn following_cursor(data: &Value) -> Option<i64> {
    let next = data.get("next_cursor").and_then(Value::as_i64)?;
    let previous = data.get("previous_cursor").and_then(Value::as_i64);
    if next == 0 || previous == Some(next) {
        None
    } else {
        Some(next)
    }
}

/// Ids arrive as numbers, or as strings when `stringify_ids` was requested.
pub(crate) fn decode_id(value: &Value) -> TwitterResult<u64> {
    let id = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    };
    id.ok_or_else(|| {
        TwitterError::Decode(serde::de::Error::custom(format!(
            "expected a user id, found {value}"
        )))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn paging_stops_on_zero_or_repeat() {
        assert_eq!(
            following_cursor(&json!({"next_cursor": 42, "previous_cursor": 0})),
            Some(42)
        );
        assert_eq!(
            following_cursor(&json!({"next_cursor": 0, "previous_cursor": 42})),
            None
        );
        assert_eq!(
            following_cursor(&json!({"next_cursor": 7, "previous_cursor": 7})),
            None
        );
        assert_eq!(following_cursor(&json!({"users": []})), None);
    }

    #[test]
    fn ids_may_be_strings() {
        assert_eq!(decode_id(&json!(12)).unwrap(), 12);
        assert_eq!(decode_id(&json!("783214")).unwrap(), 783214);
        assert!(decode_id(&json!("abc")).is_err());
        assert!(decode_id(&json!(null)).is_err());
    }
}
