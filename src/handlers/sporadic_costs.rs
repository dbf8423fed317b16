// src/handlers/sporadic_costs.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    handlers::require_month,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::finance::{
        CreateSporadicCostPayload, MonthQuery, SporadicCost, UpdateSporadicCostPayload,
    },
};

const RESOURCE: &str = "Custo avulso";

// GET /api/sporadic-costs?month=YYYY-MM
#[utoipa::path(
    get,
    path = "/api/sporadic-costs",
    tag = "Sporadic Costs",
    params(MonthQuery),
    responses(
        (status = 200, description = "Custos avulsos do mês, mais recentes primeiro", body = Vec<SporadicCost>),
        (status = 400, description = "Mês ausente ou inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_sporadic_costs(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Query(query): Query<MonthQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let month = require_month(query.month.as_deref())
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let costs = app_state
        .sporadic_cost_repo
        .list_by_month(user.id(), month)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(costs)))
}

// POST /api/sporadic-costs
#[utoipa::path(
    post,
    path = "/api/sporadic-costs",
    tag = "Sporadic Costs",
    request_body = CreateSporadicCostPayload,
    responses(
        (status = 201, description = "Custo avulso criado", body = SporadicCost),
        (status = 400, description = "Payload inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_sporadic_cost(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Json(payload): Json<CreateSporadicCostPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let new_cost = payload
        .into_new()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let cost = app_state
        .sporadic_cost_repo
        .create(user.id(), &new_cost)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    tracing::info!("🧾 Custo avulso '{}' lançado em {}", cost.name, cost.date);
    Ok((StatusCode::CREATED, Json(cost)))
}

// PATCH /api/sporadic-costs/{id}
#[utoipa::path(
    patch,
    path = "/api/sporadic-costs/{id}",
    tag = "Sporadic Costs",
    request_body = UpdateSporadicCostPayload,
    params(("id" = Uuid, Path, description = "ID do custo avulso")),
    responses(
        (status = 200, description = "Custo avulso atualizado", body = SporadicCost),
        (status = 400, description = "Payload inválido"),
        (status = 404, description = "Custo avulso não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_sporadic_cost(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSporadicCostPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let changes = payload
        .into_changes()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let cost = app_state
        .sporadic_cost_repo
        .update(user.id(), id, &changes)
        .await
        .and_then(|c| c.ok_or_else(|| AppError::ResourceNotFound(RESOURCE.into())))
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(cost)))
}

// DELETE /api/sporadic-costs/{id}
#[utoipa::path(
    delete,
    path = "/api/sporadic-costs/{id}",
    tag = "Sporadic Costs",
    params(("id" = Uuid, Path, description = "ID do custo avulso")),
    responses(
        (status = 200, description = "Custo avulso excluído"),
        (status = 404, description = "Custo avulso não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_sporadic_cost(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = app_state
        .sporadic_cost_repo
        .delete(user.id(), id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    if !deleted {
        return Err(AppError::ResourceNotFound(RESOURCE.into())
            .to_api_error(&locale, &app_state.i18n_store));
    }

    Ok((StatusCode::OK, Json(json!({ "success": true }))))
}
