// src/handlers/variable_costs.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    handlers::require_month,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::{
        dashboard::VariableCostBreakdown,
        finance::{MonthQuery, UpsertVariableCostPayload, VariableCost},
    },
};

// GET /api/variable-costs?month=YYYY-MM
#[utoipa::path(
    get,
    path = "/api/variable-costs",
    tag = "Variable Costs",
    params(MonthQuery),
    responses(
        (status = 200, description = "Custos variáveis do mês (ou null)", body = Option<VariableCost>),
        (status = 400, description = "Mês ausente ou inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_variable_costs(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Query(query): Query<MonthQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let month = require_month(query.month.as_deref())
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let cost = app_state
        .variable_cost_repo
        .find_by_month(user.id(), month)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(cost)))
}

// POST /api/variable-costs
#[utoipa::path(
    post,
    path = "/api/variable-costs",
    tag = "Variable Costs",
    request_body = UpsertVariableCostPayload,
    responses(
        (status = 200, description = "Custos variáveis gravados", body = VariableCost),
        (status = 400, description = "Payload inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn upsert_variable_costs(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Json(payload): Json<UpsertVariableCostPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let input = payload
        .into_input()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let cost = app_state
        .variable_cost_repo
        .upsert(user.id(), &input)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    tracing::info!("📊 Custos variáveis de {} gravados", input.month);
    Ok((StatusCode::OK, Json(cost)))
}

// GET /api/variable-costs/breakdown?month=YYYY-MM
#[utoipa::path(
    get,
    path = "/api/variable-costs/breakdown",
    tag = "Variable Costs",
    params(MonthQuery),
    responses(
        (status = 200, description = "Taxas calculadas e total do mês", body = VariableCostBreakdown),
        (status = 400, description = "Mês ausente ou inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_breakdown(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Query(query): Query<MonthQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let month = require_month(query.month.as_deref())
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let breakdown = app_state
        .dashboard_service
        .get_variable_cost_breakdown(user.id(), month)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(breakdown.rounded())))
}
