//! Pagination utilities for Fortnox list endpoints.
//!
//! Every list endpoint answers with an envelope of the shape
//! `{"<Plural>": [...], "MetaInformation": {"@TotalPages": n, ...}}`.
//! [`paginate`] walks those pages for any resource described by a
//! [`Collection`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::FortnoxClient;
use crate::error::{FortnoxError, Result};

/// Query parameters accepted by every list endpoint.
pub const COMMON_PARAMS: &[&str] = &["page", "limit", "offset"];

/// Maximum pages a single walk fetches.
pub const MAX_PAGES: u32 = 1000;

/// Pagination metadata returned by list endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaInformation {
    /// Total number of resources across all pages.
    #[serde(rename = "@TotalResources", default)]
    pub total_resources: u64,
    /// Total number of pages.
    #[serde(rename = "@TotalPages")]
    pub total_pages: u32,
    /// Page this envelope holds (1-indexed).
    #[serde(rename = "@CurrentPage")]
    pub current_page: u32,
}

impl MetaInformation {
    /// True when this page is the last one the server will return.
    #[must_use]
    pub fn is_last_page(&self) -> bool {
        self.total_pages == self.current_page || self.total_pages == 0
    }
}

/// A page of results from the Fortnox API.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct Page<T> {
    /// The items on this page, in server order.
    pub items: Vec<T>,
    /// Pagination metadata; absent for unpaginated collections.
    pub meta: Option<MetaInformation>,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(items: Vec<T>, meta: Option<MetaInformation>) -> Self {
        Self { items, meta }
    }

    /// Whether the server has more pages after this one.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.meta.is_some_and(|m| !m.is_last_page() && m.total_pages > m.current_page)
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Pagination query parameters shared by all list endpoints.
///
/// Supplying `page` opts into manual pagination: a full listing stops after
/// that page. Supplying `limit` caps the number of items collected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-indexed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Number of items per page, and the cap on items collected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Number of items to skip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl PaginationParams {
    /// Create pagination params for one specific page.
    #[must_use]
    pub fn for_page(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
            offset: None,
        }
    }

    /// Create pagination params that stop after `limit` items.
    #[must_use]
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }
}

/// Static description of one list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collection {
    /// Collection path relative to the base URL, e.g. `/vouchers`.
    pub endpoint: &'static str,
    /// Name of the array field holding the items, e.g. `Vouchers`.
    pub items_key: &'static str,
    /// Query parameters the endpoint accepts beyond [`COMMON_PARAMS`].
    pub extra_params: &'static [&'static str],
}

impl Collection {
    /// Whether `name` may be sent to this endpoint.
    #[must_use]
    pub fn accepts(&self, name: &str) -> bool {
        COMMON_PARAMS.contains(&name) || self.extra_params.contains(&name)
    }

    /// Serialize a typed query into the parameters this endpoint accepts.
    ///
    /// Unset (`None`) fields and names outside the accepted set are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the query does not serialize to a flat object.
    pub fn query_pairs<Q: Serialize + ?Sized>(&self, query: &Q) -> Result<Vec<(String, String)>> {
        let object = match serde_json::to_value(query)? {
            Value::Object(object) => object,
            Value::Null => return Ok(Vec::new()),
            other => {
                return Err(FortnoxError::InvalidArgument(format!(
                    "list query must serialize to an object, got {other}"
                )))
            }
        };

        let mut pairs = Vec::with_capacity(object.len());
        for (name, value) in object {
            if !self.accepts(&name) {
                tracing::debug!(param = %name, endpoint = self.endpoint, "dropping unsupported query parameter");
                continue;
            }
            let value = match value {
                Value::Null => continue,
                Value::String(s) => s,
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                other => {
                    return Err(FortnoxError::InvalidArgument(format!(
                        "query parameter '{name}' must be a scalar, got {other}"
                    )))
                }
            };
            pairs.push((name, value));
        }
        Ok(pairs)
    }

    /// Decode a list envelope into a page of items.
    ///
    /// # Errors
    ///
    /// Returns an error if the items field is missing or an item does not
    /// decode.
    pub fn decode_page<T: DeserializeOwned>(&self, mut envelope: Value) -> Result<Page<T>> {
        let meta = match envelope.get_mut("MetaInformation").map(Value::take) {
            Some(Value::Null) | None => None,
            Some(meta) => Some(serde_json::from_value(meta)?),
        };

        let items = match envelope.get_mut(self.items_key).map(Value::take) {
            Some(Value::Array(items)) => items
                .into_iter()
                .map(serde_json::from_value)
                .collect::<core::result::Result<Vec<T>, _>>()?,
            Some(Value::Null) => Vec::new(),
            _ => {
                return Err(FortnoxError::UnexpectedResponse(format!(
                    "response is missing the '{}' array",
                    self.items_key
                )))
            }
        };

        Ok(Page::new(items, meta))
    }

    /// Fetch a single page with already-filtered parameters.
    pub async fn fetch_page<T: DeserializeOwned>(
        &self,
        client: &FortnoxClient,
        params: &[(String, String)],
    ) -> Result<Page<T>> {
        let envelope = client.get_with_query(self.endpoint, params).await?;
        self.decode_page(envelope)
    }
}

/// What the walker does after receiving a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Done,
    Next(u32),
}

/// Decide whether to request another page.
///
/// `explicit_page` is true when the caller supplied `page`; `limit` is the
/// caller-supplied cap; `collected` is the accumulator length so far.
pub(crate) fn next_step(
    meta: Option<&MetaInformation>,
    explicit_page: bool,
    limit: Option<usize>,
    collected: usize,
) -> Step {
    let Some(meta) = meta else {
        return Step::Done;
    };

    if meta.is_last_page() || explicit_page {
        return Step::Done;
    }
    if limit.is_some_and(|limit| collected >= limit) {
        return Step::Done;
    }
    if meta.total_pages < meta.current_page.saturating_add(1) {
        return Step::Done;
    }
    Step::Next(meta.current_page + 1)
}

/// True when the server answered a follow-up request without moving past
/// the page it returned before.
pub(crate) fn stalled(previous_page: Option<u32>, meta: Option<&MetaInformation>) -> bool {
    match (previous_page, meta) {
        (Some(previous), Some(meta)) => meta.current_page <= previous,
        _ => false,
    }
}

/// Fetch every page of a collection and accumulate the items.
///
/// The query is filtered down to the collection's accepted parameters. The
/// walk ends on the server's last page, after one page if the caller chose
/// `page`, or once `limit` items have been collected (the result is then
/// truncated to exactly `limit`). A server that does not advance past the
/// previous page, or a walk reaching [`MAX_PAGES`], also ends it.
///
/// # Errors
///
/// Returns an error if any page request fails.
#[tracing::instrument(skip(client, query), fields(endpoint = collection.endpoint))]
pub async fn paginate<T, Q>(
    client: &FortnoxClient,
    collection: &Collection,
    query: &Q,
) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    Q: Serialize + ?Sized,
{
    let mut params = collection.query_pairs(query)?;
    let explicit_page = params.iter().any(|(name, _)| name == "page");
    let limit = params
        .iter()
        .find(|(name, _)| name == "limit")
        .map(|(_, value)| {
            value.parse::<usize>().map_err(|_| {
                FortnoxError::InvalidArgument(format!("limit must be a number, got '{value}'"))
            })
        })
        .transpose()?;

    let mut all_items = Vec::new();
    let mut previous_page = None;
    let mut pages_fetched: u32 = 0;

    loop {
        let page: Page<T> = collection.fetch_page(client, &params).await?;
        pages_fetched += 1;

        if stalled(previous_page, page.meta.as_ref()) {
            tracing::warn!(
                ?previous_page,
                current_page = ?page.meta.map(|m| m.current_page),
                "Server did not advance to the requested page, stopping"
            );
            break;
        }
        previous_page = page.meta.map(|m| m.current_page);
        all_items.extend(page.items);

        match next_step(page.meta.as_ref(), explicit_page, limit, all_items.len()) {
            Step::Done => break,
            Step::Next(_) if pages_fetched >= MAX_PAGES => {
                tracing::warn!("Reached pagination limit of {} pages, stopping", MAX_PAGES);
                break;
            }
            Step::Next(next) => {
                tracing::debug!(page = next, collected = all_items.len(), "fetching next page");
                params.retain(|(name, _)| name != "page");
                params.push(("page".to_string(), next.to_string()));
            }
        }
    }

    if let Some(limit) = limit {
        all_items.truncate(limit);
    }

    Ok(all_items)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDGETS: Collection = Collection {
        endpoint: "/widgets",
        items_key: "Widgets",
        extra_params: &["color"],
    };

    fn meta(total_pages: u32, current_page: u32) -> MetaInformation {
        MetaInformation {
            total_resources: 0,
            total_pages,
            current_page,
        }
    }

    #[test]
    fn test_next_step_last_page() {
        assert_eq!(next_step(Some(&meta(3, 3)), false, None, 30), Step::Done);
    }

    #[test]
    fn test_next_step_empty_collection() {
        assert_eq!(next_step(Some(&meta(0, 1)), false, None, 0), Step::Done);
    }

    #[test]
    fn test_next_step_without_meta() {
        assert_eq!(next_step(None, false, None, 10), Step::Done);
    }

    #[test]
    fn test_next_step_explicit_page() {
        assert_eq!(next_step(Some(&meta(5, 1)), true, None, 10), Step::Done);
    }

    #[test]
    fn test_next_step_limit_reached() {
        assert_eq!(next_step(Some(&meta(5, 1)), false, Some(10), 10), Step::Done);
        assert_eq!(next_step(Some(&meta(5, 1)), false, Some(10), 12), Step::Done);
        assert_eq!(next_step(Some(&meta(5, 1)), false, Some(20), 10), Step::Next(2));
    }

    #[test]
    fn test_next_step_current_beyond_total() {
        assert_eq!(next_step(Some(&meta(2, 4)), false, None, 10), Step::Done);
    }

    #[test]
    fn test_next_step_advances() {
        assert_eq!(next_step(Some(&meta(3, 1)), false, None, 10), Step::Next(2));
        assert_eq!(next_step(Some(&meta(3, 2)), false, None, 20), Step::Next(3));
    }

    #[test]
    fn test_stalled() {
        assert!(!stalled(None, Some(&meta(3, 1))));
        assert!(!stalled(Some(1), Some(&meta(3, 2))));
        assert!(!stalled(Some(1), None));
        assert!(stalled(Some(1), Some(&meta(3, 1))));
        assert!(stalled(Some(2), Some(&meta(3, 1))));
    }

    #[test]
    fn test_query_pairs_filters_unaccepted() {
        let query = serde_json::json!({
            "page": 2,
            "color": "red",
            "shape": "round",
            "offset": null
        });
        let mut pairs = WIDGETS.query_pairs(&query).unwrap();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("color".to_string(), "red".to_string()),
                ("page".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_pairs_from_pagination_params() {
        let mut pairs = WIDGETS.query_pairs(&PaginationParams::for_page(3, 50)).unwrap();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("limit".to_string(), "50".to_string()),
                ("page".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_pairs_rejects_nested_values() {
        let query = serde_json::json!({"color": ["red", "blue"]});
        assert!(matches!(
            WIDGETS.query_pairs(&query),
            Err(FortnoxError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_decode_page() {
        let envelope = serde_json::json!({
            "MetaInformation": {"@TotalResources": 3, "@TotalPages": 2, "@CurrentPage": 1},
            "Widgets": [1, 2]
        });
        let page: Page<u32> = WIDGETS.decode_page(envelope).unwrap();
        assert_eq!(page.items, vec![1, 2]);
        assert_eq!(page.meta, Some(MetaInformation { total_resources: 3, total_pages: 2, current_page: 1 }));
        assert!(page.has_more());
    }

    #[test]
    fn test_decode_page_missing_items() {
        let envelope = serde_json::json!({"Other": []});
        let err = WIDGETS.decode_page::<u32>(envelope).unwrap_err();
        assert!(matches!(err, FortnoxError::UnexpectedResponse(_)));
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn test_page_map() {
        let page = Page::new(vec![1, 2, 3], Some(meta(1, 1)));
        let mapped = page.map(|x| x * 2);
        assert_eq!(mapped.items, vec![2, 4, 6]);
        assert!(!mapped.has_more());
    }
}
