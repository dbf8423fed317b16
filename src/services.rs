// src/services.rs

pub mod aggregator;
pub mod auth;
pub mod dashboard_service;
pub mod session;
