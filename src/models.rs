// src/models.rs

pub mod auth;
pub mod dashboard;
pub mod finance;
