// src/handlers/revenue.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    handlers::require_month,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::{
        dashboard::RevenueSummary,
        finance::{MonthQuery, Revenue, UpsertRevenuePayload},
    },
};

/// Meses devolvidos quando `month` não é informado.
const HISTORY_MONTHS: i64 = 6;

// GET /api/revenue[?month=YYYY-MM]
#[utoipa::path(
    get,
    path = "/api/revenue",
    tag = "Revenue",
    params(MonthQuery),
    responses(
        (status = 200, description = "Faturamento do mês (ou null); sem month, os últimos 6 meses", body = Vec<Revenue>),
        (status = 400, description = "Mês inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_revenue(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Query(query): Query<MonthQuery>,
) -> Result<Response, ApiError> {
    let Some(raw) = query.month.as_deref().filter(|m| !m.trim().is_empty()) else {
        let history = app_state
            .revenue_repo
            .list_recent(user.id(), HISTORY_MONTHS)
            .await
            .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
        return Ok((StatusCode::OK, Json(history)).into_response());
    };

    let month = require_month(Some(raw))
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let revenue = app_state
        .revenue_repo
        .find_by_month(user.id(), month)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(revenue)).into_response())
}

// POST /api/revenue
#[utoipa::path(
    post,
    path = "/api/revenue",
    tag = "Revenue",
    request_body = UpsertRevenuePayload,
    responses(
        (status = 200, description = "Faturamento gravado", body = Revenue),
        (status = 400, description = "Payload inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn upsert_revenue(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Json(payload): Json<UpsertRevenuePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let input = payload
        .into_input()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let revenue = app_state
        .revenue_repo
        .upsert(user.id(), &input)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    tracing::info!("💰 Faturamento de {} gravado", input.month);
    Ok((StatusCode::OK, Json(revenue)))
}

// GET /api/revenue/summary?month=YYYY-MM
#[utoipa::path(
    get,
    path = "/api/revenue/summary",
    tag = "Revenue",
    params(MonthQuery),
    responses(
        (status = 200, description = "Indicadores de faturamento do mês", body = RevenueSummary),
        (status = 400, description = "Mês ausente ou inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Query(query): Query<MonthQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let month = require_month(query.month.as_deref())
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let summary = app_state
        .dashboard_service
        .get_revenue_summary(user.id(), month)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(summary.rounded())))
}
