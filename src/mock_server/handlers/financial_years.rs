//! Financial year endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use super::{check_credentials, error_response, page_of, PageQuery, SharedState};
use crate::FinancialYear;

/// Query parameters for listing financial years.
#[derive(Debug, Default, Deserialize)]
pub struct ListFinancialYearsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub date: Option<NaiveDate>,
    #[serde(rename = "fromDate")]
    pub from_date: Option<NaiveDate>,
    #[serde(rename = "toDate")]
    pub to_date: Option<NaiveDate>,
}

/// Body of a create request.
#[derive(Debug, Deserialize)]
pub struct FinancialYearBody {
    #[serde(rename = "FinancialYear")]
    pub financial_year: FinancialYear,
}

/// GET /financialyears
pub async fn list_financial_years(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<ListFinancialYearsQuery>,
) -> impl IntoResponse {
    let state = state.read().await;
    if let Err(response) = check_credentials(&state, &headers) {
        return response;
    }

    let years: Vec<&FinancialYear> = state
        .financial_years
        .values()
        .filter(|y| query.date.map_or(true, |d| y.contains(d)))
        .filter(|y| query.from_date.map_or(true, |d| y.from_date == Some(d)))
        .filter(|y| query.to_date.map_or(true, |d| y.to_date == Some(d)))
        .collect();

    let page = PageQuery {
        page: query.page,
        limit: query.limit,
        offset: query.offset,
    };
    let (items, meta) = page_of(&years, &page, state.page_size);
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "MetaInformation": meta,
            "FinancialYears": items,
        })),
    )
        .into_response()
}

/// GET /financialyears/{id}
pub async fn get_financial_year(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    let state = state.read().await;
    if let Err(response) = check_credentials(&state, &headers) {
        return response;
    }

    match state.financial_years.get(&id) {
        Some(year) => (
            StatusCode::OK,
            Json(serde_json::json!({ "FinancialYear": year })),
        )
            .into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            2_000_434,
            format!("Kunde inte hitta räkenskapsår: {id}"),
        ),
    }
}

/// POST /financialyears
pub async fn create_financial_year(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<FinancialYearBody>,
) -> impl IntoResponse {
    let mut state = state.write().await;
    if let Err(response) = check_credentials(&state, &headers) {
        return response;
    }

    let mut year = body.financial_year;
    let (Some(from), Some(to)) = (year.from_date, year.to_date) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            2_000_588,
            "FromDate and ToDate are required",
        );
    };
    if from > to {
        return error_response(StatusCode::BAD_REQUEST, 2_000_588, "FromDate must precede ToDate");
    }
    if state
        .financial_years
        .values()
        .any(|y| y.contains(from) || y.contains(to))
    {
        return error_response(
            StatusCode::BAD_REQUEST,
            2_000_589,
            "Financial year overlaps an existing financial year",
        );
    }

    year.id = None;
    let created = state.insert_financial_year(year);
    (
        StatusCode::CREATED,
        Json(serde_json::json!({ "FinancialYear": created })),
    )
        .into_response()
}
