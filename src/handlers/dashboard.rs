// src/handlers/dashboard.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    handlers::month_or_current,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::{dashboard::FinancialMetrics, finance::MonthQuery},
};

// GET /api/dashboard/metrics[?month=YYYY-MM]
#[utoipa::path(
    get,
    path = "/api/dashboard/metrics",
    tag = "Dashboard",
    params(MonthQuery),
    responses(
        (status = 200, description = "Métricas consolidadas do mês (padrão: mês corrente)", body = FinancialMetrics),
        (status = 400, description = "Mês inválido"),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_metrics(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Query(query): Query<MonthQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let month = month_or_current(query.month.as_deref())
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let metrics = app_state
        .dashboard_service
        .get_metrics(user.id(), month)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(metrics.rounded())))
}
