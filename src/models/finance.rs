// src/models/finance.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::common::month::YearMonth;

// --- Validações Customizadas ---

/// Limite exclusivo de uma coluna `NUMERIC(12, 2)`: 10^10.
const MONEY_LIMIT: Decimal = Decimal::from_parts(1_410_065_408, 2, 0, false, 0);

// Valor que cabe em `NUMERIC(12, 2)` sem arredondar nem estourar.
fn validate_money_column(val: &Decimal) -> Result<(), ValidationError> {
    if val.normalize().scale() > 2 {
        let mut err = ValidationError::new("scale");
        err.message = Some("O valor deve ter no máximo 2 casas decimais.".into());
        return Err(err);
    }
    if val.abs() >= MONEY_LIMIT {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor deve ser menor que 10.000.000.000,00.".into());
        return Err(err);
    }
    Ok(())
}

pub(crate) fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() && !val.is_zero() {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    validate_money_column(val)
}

pub(crate) fn validate_positive(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor deve ser maior que zero.".into());
        return Err(err);
    }
    validate_money_column(val)
}

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "fixed_cost_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FixedCostCategory {
    Hospedagem,
    Ferramentas,
    Colaborador,
    Outros,
}

// --- Linhas do banco ---

/// Custo fixo mensal. Nunca é apagado fisicamente: `is_active = false`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct FixedCost {
    pub id: Uuid,

    #[serde(skip)]
    pub user_id: String,

    #[schema(example = "Hostinger")]
    pub name: String,

    pub description: Option<String>,

    #[schema(example = 300.0)]
    pub amount: Decimal,

    #[schema(example = 10)]
    pub due_day: i32,

    pub category: FixedCostCategory,

    #[serde(skip)]
    pub is_active: bool,
}

/// Custo avulso, vinculado ao mês que contém `date`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SporadicCost {
    pub id: Uuid,

    #[serde(skip)]
    pub user_id: String,

    #[schema(example = "Manutenção do notebook")]
    pub name: String,

    pub description: Option<String>,

    #[schema(example = 150.0)]
    pub amount: Decimal,

    #[schema(value_type = String, format = Date, example = "2025-01-15")]
    pub date: NaiveDate,

    #[schema(example = "geral")]
    pub category: String,
}

/// Custos variáveis do mês. Um registro por (usuário, mês).
///
/// `gateway_percentage` é um valor em reais digitado pelo usuário,
/// não uma taxa sobre o faturamento.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct VariableCost {
    pub id: Uuid,

    #[serde(skip)]
    pub user_id: String,

    #[schema(value_type = String, format = Date, example = "2025-01-01")]
    pub month: NaiveDate,

    #[schema(example = 100.0)]
    pub ad_accounts_purchase: Decimal,

    #[schema(example = 50.0)]
    pub gateway_percentage: Decimal,

    #[schema(example = 2)]
    pub withdrawal_count: i32,

    #[schema(example = 200.0)]
    pub p2p_transfers: Decimal,
}

/// Faturamento do mês. Um registro por (usuário, mês).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Revenue {
    pub id: Uuid,

    #[serde(skip)]
    pub user_id: String,

    #[schema(value_type = String, format = Date, example = "2025-01-01")]
    pub month: NaiveDate,

    #[schema(example = 10000.0)]
    pub total_revenue: Decimal,

    #[schema(example = 50)]
    pub sales_count: i32,

    #[schema(example = 2000.0)]
    pub traffic_investment: Decimal,
}

/// Marcação de pagamento de um custo fixo em um mês.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PaymentStatus {
    pub fixed_cost_id: Uuid,

    #[schema(value_type = String, format = Date, example = "2025-01-01")]
    pub month: NaiveDate,

    pub is_paid: bool,

    pub updated_at: Option<DateTime<Utc>>,
}

// --- Parâmetros de Query ---

#[derive(Debug, Deserialize, IntoParams)]
pub struct MonthQuery {
    /// Mês no formato YYYY-MM
    #[param(example = "2025-01")]
    pub month: Option<String>,
}

// --- Payloads (Entrada da API) ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateFixedCostPayload {
    #[validate(required(message = "O campo 'name' é obrigatório."), length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Hostinger")]
    pub name: Option<String>,

    pub description: Option<String>,

    #[validate(required(message = "O campo 'amount' é obrigatório."), custom(function = "validate_positive"))]
    #[schema(example = 49.9)]
    pub amount: Option<Decimal>,

    #[validate(required(message = "O campo 'due_day' é obrigatório."), range(min = 1, max = 31, message = "O dia de vencimento deve estar entre 1 e 31."))]
    #[schema(example = 10)]
    pub due_day: Option<i32>,

    #[validate(required(message = "O campo 'category' é obrigatório."))]
    pub category: Option<FixedCostCategory>,
}

/// Atualização parcial: campos ausentes não são alterados.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateFixedCostPayload {
    #[validate(length(min = 1, message = "O nome não pode ser vazio."))]
    pub name: Option<String>,

    pub description: Option<String>,

    #[validate(custom(function = "validate_positive"))]
    pub amount: Option<Decimal>,

    #[validate(range(min = 1, max = 31, message = "O dia de vencimento deve estar entre 1 e 31."))]
    pub due_day: Option<i32>,

    pub category: Option<FixedCostCategory>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSporadicCostPayload {
    #[validate(required(message = "O campo 'name' é obrigatório."), length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Manutenção do notebook")]
    pub name: Option<String>,

    pub description: Option<String>,

    #[validate(required(message = "O campo 'amount' é obrigatório."), custom(function = "validate_positive"))]
    #[schema(example = 150.0)]
    pub amount: Option<Decimal>,

    #[validate(required(message = "O campo 'date' é obrigatório."))]
    #[schema(value_type = Option<String>, format = Date, example = "2025-01-15")]
    pub date: Option<NaiveDate>,

    /// Texto livre; padrão "geral"
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateSporadicCostPayload {
    #[validate(length(min = 1, message = "O nome não pode ser vazio."))]
    pub name: Option<String>,

    pub description: Option<String>,

    #[validate(custom(function = "validate_positive"))]
    pub amount: Option<Decimal>,

    #[schema(value_type = Option<String>, format = Date)]
    pub date: Option<NaiveDate>,

    pub category: Option<String>,
}

/// Upsert dos custos variáveis do mês. Campos numéricos ausentes viram 0.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpsertVariableCostPayload {
    #[validate(required(message = "Campo month é obrigatório (YYYY-MM)."))]
    #[schema(value_type = Option<String>, example = "2025-01")]
    pub month: Option<YearMonth>,

    #[validate(custom(function = "validate_not_negative"))]
    pub ad_accounts_purchase: Option<Decimal>,

    #[validate(custom(function = "validate_not_negative"))]
    pub gateway_percentage: Option<Decimal>,

    #[validate(range(min = 0, message = "A quantidade de saques não pode ser negativa."))]
    pub withdrawal_count: Option<i32>,

    #[validate(custom(function = "validate_not_negative"))]
    pub p2p_transfers: Option<Decimal>,
}

/// Upsert do faturamento do mês. Campos numéricos ausentes viram 0.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpsertRevenuePayload {
    #[validate(required(message = "Campo month é obrigatório (YYYY-MM)."))]
    #[schema(value_type = Option<String>, example = "2025-01")]
    pub month: Option<YearMonth>,

    #[validate(custom(function = "validate_not_negative"))]
    pub total_revenue: Option<Decimal>,

    #[validate(range(min = 0, message = "A quantidade de vendas não pode ser negativa."))]
    pub sales_count: Option<i32>,

    #[validate(custom(function = "validate_not_negative"))]
    pub traffic_investment: Option<Decimal>,
}

// --- Valores já validados, prontos para o repositório ---

#[derive(Debug, Clone)]
pub struct NewFixedCost {
    pub name: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub due_day: i32,
    pub category: FixedCostCategory,
}

#[derive(Debug, Clone)]
pub struct NewSporadicCost {
    pub name: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableCostInput {
    pub month: YearMonth,
    pub ad_accounts_purchase: Decimal,
    pub gateway_percentage: Decimal,
    pub withdrawal_count: i32,
    pub p2p_transfers: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevenueInput {
    pub month: YearMonth,
    pub total_revenue: Decimal,
    pub sales_count: i32,
    pub traffic_investment: Decimal,
}

// Campo obrigatório ausente depois do `validate()` vira erro de validação
// do próprio campo (não deveria acontecer, mas não usamos unwrap).
fn required<T>(value: Option<T>, field: &'static str) -> Result<T, validator::ValidationErrors> {
    value.ok_or_else(|| {
        let mut errors = validator::ValidationErrors::new();
        let mut err = ValidationError::new("required");
        err.message = Some(format!("O campo '{}' é obrigatório.", field).into());
        errors.add(field, err);
        errors
    })
}

impl CreateFixedCostPayload {
    pub fn into_new(self) -> Result<NewFixedCost, validator::ValidationErrors> {
        self.validate()?;
        Ok(NewFixedCost {
            name: required(self.name, "name")?,
            description: self.description.filter(|d| !d.is_empty()),
            amount: required(self.amount, "amount")?,
            due_day: required(self.due_day, "due_day")?,
            category: required(self.category, "category")?,
        })
    }
}

impl CreateSporadicCostPayload {
    pub fn into_new(self) -> Result<NewSporadicCost, validator::ValidationErrors> {
        self.validate()?;
        Ok(NewSporadicCost {
            name: required(self.name, "name")?,
            description: self.description.filter(|d| !d.is_empty()),
            amount: required(self.amount, "amount")?,
            date: required(self.date, "date")?,
            category: self
                .category
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| "geral".to_string()),
        })
    }
}

impl UpdateSporadicCostPayload {
    /// Valida e normaliza: categoria em branco volta a ser "geral",
    /// como na criação.
    pub fn into_changes(mut self) -> Result<Self, validator::ValidationErrors> {
        self.validate()?;
        self.category = self.category.map(|c| {
            let trimmed = c.trim();
            if trimmed.is_empty() { "geral".to_string() } else { trimmed.to_string() }
        });
        Ok(self)
    }
}

impl UpsertVariableCostPayload {
    pub fn into_input(self) -> Result<VariableCostInput, validator::ValidationErrors> {
        self.validate()?;
        Ok(VariableCostInput {
            month: required(self.month, "month")?,
            ad_accounts_purchase: self.ad_accounts_purchase.unwrap_or(Decimal::ZERO),
            gateway_percentage: self.gateway_percentage.unwrap_or(Decimal::ZERO),
            withdrawal_count: self.withdrawal_count.unwrap_or(0),
            p2p_transfers: self.p2p_transfers.unwrap_or(Decimal::ZERO),
        })
    }
}

impl UpsertRevenuePayload {
    pub fn into_input(self) -> Result<RevenueInput, validator::ValidationErrors> {
        self.validate()?;
        Ok(RevenueInput {
            month: required(self.month, "month")?,
            total_revenue: self.total_revenue.unwrap_or(Decimal::ZERO),
            sales_count: self.sales_count.unwrap_or(0),
            traffic_investment: self.traffic_investment.unwrap_or(Decimal::ZERO),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn create_fixed_cost_requires_all_fields() {
        let payload: CreateFixedCostPayload =
            serde_json::from_value(json!({ "name": "Hostinger", "amount": 49.9 })).unwrap();
        let errors = payload.into_new().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("due_day"));
        assert!(fields.contains_key("category"));
    }

    #[test]
    fn create_fixed_cost_rejects_due_day_out_of_range() {
        let payload: CreateFixedCostPayload = serde_json::from_value(json!({
            "name": "Hostinger", "amount": 49.9, "due_day": 32, "category": "hospedagem"
        }))
        .unwrap();
        let errors = payload.into_new().unwrap_err();
        assert!(errors.field_errors().contains_key("due_day"));
    }

    #[test]
    fn create_fixed_cost_accepts_valid_payload() {
        let payload: CreateFixedCostPayload = serde_json::from_value(json!({
            "name": "Canva", "description": "", "amount": 34.9, "due_day": 31, "category": "ferramentas"
        }))
        .unwrap();
        let new = payload.into_new().unwrap();
        assert_eq!(new.amount, dec!(34.9));
        assert_eq!(new.due_day, 31);
        assert_eq!(new.category, FixedCostCategory::Ferramentas);
        assert!(new.description.is_none());
    }

    #[test]
    fn fixed_cost_amount_must_be_positive() {
        let payload: CreateFixedCostPayload = serde_json::from_value(json!({
            "name": "Canva", "amount": 0, "due_day": 5, "category": "outros"
        }))
        .unwrap();
        assert!(payload.into_new().unwrap_err().field_errors().contains_key("amount"));
    }

    #[test]
    fn unknown_category_is_rejected_by_serde() {
        let parsed = serde_json::from_value::<CreateFixedCostPayload>(json!({
            "name": "X", "amount": 1, "due_day": 1, "category": "marketing"
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn sporadic_category_defaults_to_geral() {
        let payload: CreateSporadicCostPayload = serde_json::from_value(json!({
            "name": "Cabo HDMI", "amount": 35, "date": "2025-02-10"
        }))
        .unwrap();
        let new = payload.into_new().unwrap();
        assert_eq!(new.category, "geral");
        assert_eq!(new.date, NaiveDate::from_ymd_opt(2025, 2, 10).unwrap());
    }

    #[test]
    fn variable_cost_defaults_missing_numbers_to_zero() {
        let payload: UpsertVariableCostPayload =
            serde_json::from_value(json!({ "month": "2025-01", "withdrawal_count": 3 })).unwrap();
        let input = payload.into_input().unwrap();
        assert_eq!(input.month, YearMonth::new(2025, 1).unwrap());
        assert_eq!(input.ad_accounts_purchase, Decimal::ZERO);
        assert_eq!(input.gateway_percentage, Decimal::ZERO);
        assert_eq!(input.withdrawal_count, 3);
        assert_eq!(input.p2p_transfers, Decimal::ZERO);
    }

    #[test]
    fn variable_cost_rejects_negative_values() {
        let payload: UpsertVariableCostPayload = serde_json::from_value(json!({
            "month": "2025-01", "p2p_transfers": -10, "withdrawal_count": -1
        }))
        .unwrap();
        let errors = payload.into_input().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("p2p_transfers"));
        assert!(fields.contains_key("withdrawal_count"));
    }

    #[test]
    fn revenue_requires_month() {
        let payload: UpsertRevenuePayload =
            serde_json::from_value(json!({ "total_revenue": 1000 })).unwrap();
        assert!(payload.into_input().unwrap_err().field_errors().contains_key("month"));
    }

    #[test]
    fn revenue_with_malformed_month_fails_to_parse() {
        let parsed =
            serde_json::from_value::<UpsertRevenuePayload>(json!({ "month": "2025-1" }));
        assert!(parsed.is_err());
    }

    #[test]
    fn fixed_cost_serializes_snake_case_without_user_id() {
        let cost = FixedCost {
            id: Uuid::nil(),
            user_id: "test-user".into(),
            name: "Hostinger".into(),
            description: None,
            amount: dec!(10),
            due_day: 5,
            category: FixedCostCategory::Hospedagem,
            is_active: true,
        };
        let value = serde_json::to_value(&cost).unwrap();
        assert_eq!(value["due_day"], 5);
        assert_eq!(value["category"], "hospedagem");
        assert!(value.get("user_id").is_none());
    }

    #[test]
    fn money_fields_reject_more_than_two_decimal_places() {
        let payload: CreateFixedCostPayload = serde_json::from_value(json!({
            "name": "Canva", "amount": 0.001, "due_day": 5, "category": "outros"
        }))
        .unwrap();
        assert!(payload.into_new().unwrap_err().field_errors().contains_key("amount"));

        let payload: UpsertVariableCostPayload =
            serde_json::from_value(json!({ "month": "2025-01", "p2p_transfers": 12.345 })).unwrap();
        assert!(payload.into_input().unwrap_err().field_errors().contains_key("p2p_transfers"));

        // Zeros à direita não contam como casas extras
        let payload: UpsertRevenuePayload =
            serde_json::from_value(json!({ "month": "2025-01", "total_revenue": "1500.500" }))
                .unwrap();
        assert_eq!(payload.into_input().unwrap().total_revenue, dec!(1500.5));
    }

    #[test]
    fn money_fields_must_fit_numeric_12_2() {
        let payload: UpsertRevenuePayload = serde_json::from_value(json!({
            "month": "2025-01", "total_revenue": 123456789012i64
        }))
        .unwrap();
        assert!(payload.into_input().unwrap_err().field_errors().contains_key("total_revenue"));

        let payload: UpsertRevenuePayload = serde_json::from_value(json!({
            "month": "2025-01", "traffic_investment": 9999999999.99
        }))
        .unwrap();
        assert_eq!(payload.into_input().unwrap().traffic_investment, dec!(9999999999.99));

        let changes = UpdateSporadicCostPayload {
            amount: Some(dec!(10000000000)),
            ..Default::default()
        };
        assert!(changes.into_changes().unwrap_err().field_errors().contains_key("amount"));
    }

    #[test]
    fn blank_sporadic_category_on_update_becomes_geral() {
        let changes: UpdateSporadicCostPayload =
            serde_json::from_value(json!({ "category": "  " })).unwrap();
        assert_eq!(changes.into_changes().unwrap().category.as_deref(), Some("geral"));

        let changes: UpdateSporadicCostPayload =
            serde_json::from_value(json!({ "category": " transporte " })).unwrap();
        assert_eq!(changes.into_changes().unwrap().category.as_deref(), Some("transporte"));

        let changes: UpdateSporadicCostPayload =
            serde_json::from_value(json!({ "name": "Uber" })).unwrap();
        assert!(changes.into_changes().unwrap().category.is_none());
    }
}
