// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::register,
        handlers::auth::logout,
        handlers::auth::session,

        // --- Custos fixos ---
        handlers::fixed_costs::list_fixed_costs,
        handlers::fixed_costs::create_fixed_cost,
        handlers::fixed_costs::update_fixed_cost,
        handlers::fixed_costs::delete_fixed_cost,
        handlers::fixed_costs::get_payment_statuses,
        handlers::fixed_costs::toggle_payment,

        // --- Custos avulsos ---
        handlers::sporadic_costs::list_sporadic_costs,
        handlers::sporadic_costs::create_sporadic_cost,
        handlers::sporadic_costs::update_sporadic_cost,
        handlers::sporadic_costs::delete_sporadic_cost,

        // --- Custos variáveis ---
        handlers::variable_costs::get_variable_costs,
        handlers::variable_costs::upsert_variable_costs,
        handlers::variable_costs::get_breakdown,

        // --- Faturamento ---
        handlers::revenue::get_revenue,
        handlers::revenue::upsert_revenue,
        handlers::revenue::get_summary,

        // --- Dashboard ---
        handlers::dashboard::get_metrics,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::AuthUser,
            models::auth::Session,
            models::auth::LoginUserPayload,
            models::auth::RegisterUserPayload,
            models::auth::AuthResponse,

            // --- Finance ---
            models::finance::FixedCostCategory,
            models::finance::FixedCost,
            models::finance::SporadicCost,
            models::finance::VariableCost,
            models::finance::Revenue,
            models::finance::PaymentStatus,

            // --- Payloads ---
            models::finance::CreateFixedCostPayload,
            models::finance::UpdateFixedCostPayload,
            models::finance::CreateSporadicCostPayload,
            models::finance::UpdateSporadicCostPayload,
            models::finance::UpsertVariableCostPayload,
            models::finance::UpsertRevenuePayload,

            // --- DASHBOARD ---
            models::dashboard::FinancialMetrics,
            models::dashboard::VariableCostBreakdown,
            models::dashboard::RevenueSummary,
        )
    ),
    tags(
        (name = "Auth", description = "Login com o usuário de demonstração e sessão"),
        (name = "Fixed Costs", description = "Custos fixos mensais e status de pagamento"),
        (name = "Sporadic Costs", description = "Custos avulsos do mês"),
        (name = "Variable Costs", description = "Custos variáveis e taxas do mês"),
        (name = "Revenue", description = "Faturamento mensal"),
        (name = "Dashboard", description = "Indicadores consolidados do mês")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
