//! Voucher endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use super::{check_credentials, error_response, page_of, PageQuery, SharedState};
use crate::Voucher;

/// Financial year selector accepted by voucher endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct FinancialYearQuery {
    #[serde(rename = "financialyear")]
    pub financial_year: Option<u64>,
    #[serde(rename = "financialyeardate")]
    pub financial_year_date: Option<NaiveDate>,
}

/// Query parameters for listing vouchers.
#[derive(Debug, Default, Deserialize)]
pub struct ListVouchersQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    #[serde(rename = "financialyear")]
    pub financial_year: Option<u64>,
    #[serde(rename = "financialyeardate")]
    pub financial_year_date: Option<NaiveDate>,
}

/// Body of a create request.
#[derive(Debug, Deserialize)]
pub struct VoucherBody {
    #[serde(rename = "Voucher")]
    pub voucher: Voucher,
}

/// GET /vouchers
pub async fn list_vouchers(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<ListVouchersQuery>,
) -> impl IntoResponse {
    let state = state.read().await;
    if let Err(response) = check_credentials(&state, &headers) {
        return response;
    }

    let year = state.resolve_financial_year(query.financial_year, query.financial_year_date);
    let vouchers = state.list_vouchers(year);
    let page = PageQuery {
        page: query.page,
        limit: query.limit,
        offset: query.offset,
    };
    let (items, meta) = page_of(&vouchers, &page, state.page_size);
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "MetaInformation": meta,
            "Vouchers": items,
        })),
    )
        .into_response()
}

/// GET /vouchers/{series}/{number}
pub async fn get_voucher(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path((series, number)): Path<(String, u64)>,
    Query(query): Query<FinancialYearQuery>,
) -> impl IntoResponse {
    let state = state.read().await;
    if let Err(response) = check_credentials(&state, &headers) {
        return response;
    }

    let year = state.resolve_financial_year(query.financial_year, query.financial_year_date);
    match state.get_voucher(&series, number, year) {
        Some(voucher) => (
            StatusCode::OK,
            Json(serde_json::json!({ "Voucher": voucher })),
        )
            .into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            2_000_430,
            format!("Kunde inte hitta verifikation: {series}{number}"),
        ),
    }
}

/// POST /vouchers
pub async fn create_voucher(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<VoucherBody>,
) -> impl IntoResponse {
    let mut state = state.write().await;
    if let Err(response) = check_credentials(&state, &headers) {
        return response;
    }

    let voucher = body.voucher;
    if voucher.transaction_date.is_none() {
        return error_response(StatusCode::BAD_REQUEST, 2_000_752, "TransactionDate is required");
    }
    if voucher.voucher_rows.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, 2_000_753, "Voucher has no rows");
    }
    if !voucher.is_balanced() {
        return error_response(
            StatusCode::BAD_REQUEST,
            2_000_755,
            format!("Verifikationen är inte balanserad ({:.2})", voucher.balance()),
        );
    }

    match state.book_voucher(voucher) {
        Ok(booked) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "Voucher": booked })),
        )
            .into_response(),
        Err(message) => error_response(StatusCode::BAD_REQUEST, 2_000_754, message),
    }
}
