// src/handlers.rs

pub mod auth;
pub mod dashboard;
pub mod fixed_costs;
pub mod revenue;
pub mod sporadic_costs;
pub mod variable_costs;

use crate::common::{error::AppError, month::YearMonth};

/// `?month=` obrigatório.
pub(crate) fn require_month(raw: Option<&str>) -> Result<YearMonth, AppError> {
    match raw.map(str::trim).filter(|m| !m.is_empty()) {
        Some(m) => m.parse(),
        None => Err(AppError::MissingMonth),
    }
}

/// `?month=` opcional; ausente vira o mês corrente.
pub(crate) fn month_or_current(raw: Option<&str>) -> Result<YearMonth, AppError> {
    match raw.map(str::trim).filter(|m| !m.is_empty()) {
        Some(m) => m.parse(),
        None => Ok(YearMonth::current()),
    }
}
