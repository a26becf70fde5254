//! HTTP request handlers for the mock server.

pub mod financial_years;
pub mod voucher_series;
pub mod vouchers;

pub use financial_years::*;
pub use voucher_series::*;
pub use vouchers::*;

use std::sync::Arc;

use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;
use crate::MetaInformation;

pub(crate) type SharedState = Arc<RwLock<MockState>>;

/// Pagination parameters accepted by every list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Build an error body the way Fortnox reports failures.
pub(crate) fn error_response(status: StatusCode, code: u32, message: impl Into<String>) -> Response {
    (
        status,
        Json(serde_json::json!({
            "ErrorInformation": {
                "error": 1,
                "message": message.into(),
                "code": code
            }
        })),
    )
        .into_response()
}

/// Reject requests that do not carry the required credentials.
pub(crate) fn check_credentials(state: &MockState, headers: &HeaderMap) -> Result<(), Response> {
    let Some((token, secret)) = &state.required_credentials else {
        return Ok(());
    };

    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
    if header("Access-Token") == Some(token.as_str()) && header("Client-Secret") == Some(secret.as_str()) {
        Ok(())
    } else {
        Err(error_response(
            StatusCode::UNAUTHORIZED,
            2_000_311,
            "Invalid Access-Token or Client-Secret",
        ))
    }
}

/// Cut one page out of `items` and describe it.
pub(crate) fn page_of<T: Clone>(items: &[&T], query: &PageQuery, default_limit: u32) -> (Vec<T>, MetaInformation) {
    let limit = query.limit.unwrap_or(default_limit).max(1) as usize;
    let offset = query.offset.unwrap_or(0) as usize;
    let remaining = items.get(offset..).unwrap_or(&[]);

    let total_pages = remaining.len().div_ceil(limit) as u32;
    let current_page = query.page.unwrap_or(1).max(1);

    let start = (current_page as usize - 1) * limit;
    let page = remaining
        .iter()
        .skip(start)
        .take(limit)
        .map(|item| (*item).clone())
        .collect();

    let meta = MetaInformation {
        total_resources: remaining.len() as u64,
        total_pages,
        current_page,
    };
    (page, meta)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_of_splits_items() {
        let items: Vec<u32> = (1..=5).collect();
        let refs: Vec<&u32> = items.iter().collect();

        let query = PageQuery {
            page: Some(2),
            limit: Some(2),
            offset: None,
        };
        let (page, meta) = page_of(&refs, &query, 100);

        assert_eq!(page, vec![3, 4]);
        assert_eq!(meta.total_pages, 3);
        assert_eq!(meta.current_page, 2);
        assert_eq!(meta.total_resources, 5);
    }

    #[test]
    fn test_page_of_empty_collection_has_no_pages() {
        let refs: Vec<&u32> = Vec::new();
        let (page, meta) = page_of(&refs, &PageQuery::default(), 100);

        assert!(page.is_empty());
        assert_eq!(meta.total_pages, 0);
        assert_eq!(meta.current_page, 1);
    }

    #[test]
    fn test_credentials_checked_when_required() {
        let state = MockState::new().with_required_credentials("token", "secret");

        let mut headers = HeaderMap::new();
        assert!(check_credentials(&state, &headers).is_err());

        headers.insert("access-token", "token".parse().unwrap());
        headers.insert("client-secret", "secret".parse().unwrap());
        assert!(check_credentials(&state, &headers).is_ok());
    }
}
