//! Voucher series endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use super::{check_credentials, error_response, page_of, PageQuery, SharedState};
use crate::VoucherSeries;

/// Body of a create request.
#[derive(Debug, Deserialize)]
pub struct VoucherSeriesBody {
    #[serde(rename = "VoucherSeries")]
    pub voucher_series: VoucherSeries,
}

/// Fields a save request may change.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VoucherSeriesChanges {
    pub description: Option<String>,
    pub manual: Option<bool>,
}

/// Body of a save request.
#[derive(Debug, Deserialize)]
pub struct VoucherSeriesUpdateBody {
    #[serde(rename = "VoucherSeries")]
    pub voucher_series: VoucherSeriesChanges,
}

fn not_found(code: &str) -> axum::response::Response {
    error_response(
        StatusCode::NOT_FOUND,
        2_000_428,
        format!("Kunde inte hitta verifikationsserie: {code}"),
    )
}

/// GET /voucherseries
pub async fn list_voucher_series(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> impl IntoResponse {
    let state = state.read().await;
    if let Err(response) = check_credentials(&state, &headers) {
        return response;
    }

    let series: Vec<&VoucherSeries> = state.voucher_series.values().collect();
    let (items, meta) = page_of(&series, &query, state.page_size);
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "MetaInformation": meta,
            "VoucherSeriesCollection": items,
        })),
    )
        .into_response()
}

/// GET /voucherseries/{code}
pub async fn get_voucher_series(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(code): Path<String>,
) -> impl IntoResponse {
    let state = state.read().await;
    if let Err(response) = check_credentials(&state, &headers) {
        return response;
    }

    match state.voucher_series.get(&code) {
        Some(series) => (
            StatusCode::OK,
            Json(serde_json::json!({ "VoucherSeries": series })),
        )
            .into_response(),
        None => not_found(&code),
    }
}

/// POST /voucherseries
pub async fn create_voucher_series(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<VoucherSeriesBody>,
) -> impl IntoResponse {
    let mut state = state.write().await;
    if let Err(response) = check_credentials(&state, &headers) {
        return response;
    }

    let series = body.voucher_series;
    if series.code.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, 2_000_357, "Code is required");
    }

    let code = series.code.clone();
    match state.insert_voucher_series(series) {
        Some(created) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "VoucherSeries": created })),
        )
            .into_response(),
        None => error_response(
            StatusCode::BAD_REQUEST,
            2_000_358,
            format!("Verifikationsserie {code} finns redan"),
        ),
    }
}

/// PUT /voucherseries/{code}
pub async fn update_voucher_series(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(code): Path<String>,
    Json(body): Json<VoucherSeriesUpdateBody>,
) -> impl IntoResponse {
    let mut state = state.write().await;
    if let Err(response) = check_credentials(&state, &headers) {
        return response;
    }

    let changes = body.voucher_series;
    match state.update_voucher_series(&code, changes.description, changes.manual) {
        Some(series) => (
            StatusCode::OK,
            Json(serde_json::json!({ "VoucherSeries": series })),
        )
            .into_response(),
        None => not_found(&code),
    }
}
