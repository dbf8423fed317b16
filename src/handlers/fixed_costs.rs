// src/handlers/fixed_costs.rs

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    handlers::require_month,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::finance::{
        CreateFixedCostPayload, FixedCost, MonthQuery, PaymentStatus, UpdateFixedCostPayload,
    },
};

const RESOURCE: &str = "Custo fixo";

// GET /api/fixed-costs
#[utoipa::path(
    get,
    path = "/api/fixed-costs",
    tag = "Fixed Costs",
    responses(
        (status = 200, description = "Custos fixos ativos, por dia de vencimento", body = Vec<FixedCost>),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_fixed_costs(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let costs = app_state
        .fixed_cost_repo
        .list_active(user.id())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(costs)))
}

// POST /api/fixed-costs
#[utoipa::path(
    post,
    path = "/api/fixed-costs",
    tag = "Fixed Costs",
    request_body = CreateFixedCostPayload,
    responses(
        (status = 201, description = "Custo fixo criado", body = FixedCost),
        (status = 400, description = "Payload inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_fixed_cost(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Json(payload): Json<CreateFixedCostPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let new_cost = payload
        .into_new()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let cost = app_state
        .fixed_cost_repo
        .create(user.id(), &new_cost)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    tracing::info!("📌 Custo fixo '{}' criado ({})", cost.name, cost.id);
    Ok((StatusCode::CREATED, Json(cost)))
}

// PATCH /api/fixed-costs/{id}
#[utoipa::path(
    patch,
    path = "/api/fixed-costs/{id}",
    tag = "Fixed Costs",
    request_body = UpdateFixedCostPayload,
    params(("id" = Uuid, Path, description = "ID do custo fixo")),
    responses(
        (status = 200, description = "Custo fixo atualizado", body = FixedCost),
        (status = 400, description = "Payload inválido"),
        (status = 404, description = "Custo fixo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_fixed_cost(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateFixedCostPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let cost = app_state
        .fixed_cost_repo
        .update(user.id(), id, &payload)
        .await
        .and_then(|c| c.ok_or_else(|| AppError::ResourceNotFound(RESOURCE.into())))
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(cost)))
}

// DELETE /api/fixed-costs/{id}
#[utoipa::path(
    delete,
    path = "/api/fixed-costs/{id}",
    tag = "Fixed Costs",
    params(("id" = Uuid, Path, description = "ID do custo fixo")),
    responses(
        (status = 200, description = "Custo fixo desativado"),
        (status = 404, description = "Custo fixo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_fixed_cost(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let deactivated = app_state
        .fixed_cost_repo
        .deactivate(user.id(), id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    if !deactivated {
        return Err(AppError::ResourceNotFound(RESOURCE.into())
            .to_api_error(&locale, &app_state.i18n_store));
    }

    Ok((StatusCode::OK, Json(json!({ "success": true }))))
}

// GET /api/fixed-costs/payments?month=YYYY-MM
#[utoipa::path(
    get,
    path = "/api/fixed-costs/payments",
    tag = "Fixed Costs",
    params(MonthQuery),
    responses(
        (status = 200, description = "Mapa id do custo -> pago", body = HashMap<String, bool>),
        (status = 400, description = "Mês ausente ou inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_payment_statuses(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Query(query): Query<MonthQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let month = require_month(query.month.as_deref())
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let statuses = app_state
        .fixed_cost_repo
        .list_payment_statuses(user.id(), month)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let by_cost: HashMap<Uuid, bool> = statuses
        .into_iter()
        .map(|s| (s.fixed_cost_id, s.is_paid))
        .collect();

    Ok((StatusCode::OK, Json(by_cost)))
}

// POST /api/fixed-costs/{id}/payments?month=YYYY-MM
#[utoipa::path(
    post,
    path = "/api/fixed-costs/{id}/payments",
    tag = "Fixed Costs",
    params(
        ("id" = Uuid, Path, description = "ID do custo fixo"),
        MonthQuery
    ),
    responses(
        (status = 200, description = "Status de pagamento invertido", body = PaymentStatus),
        (status = 400, description = "Mês ausente ou inválido"),
        (status = 404, description = "Custo fixo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn toggle_payment(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Query(query): Query<MonthQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let month = require_month(query.month.as_deref())
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let status = app_state
        .fixed_cost_repo
        .toggle_payment(user.id(), id, month)
        .await
        .and_then(|s| s.ok_or_else(|| AppError::ResourceNotFound(RESOURCE.into())))
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    tracing::info!(
        "💸 Custo fixo {} em {} marcado como {}",
        id,
        month,
        if status.is_paid { "pago" } else { "pendente" }
    );
    Ok((StatusCode::OK, Json(status)))
}
