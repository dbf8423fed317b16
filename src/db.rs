// src/db.rs

pub mod fixed_cost_repo;
pub use fixed_cost_repo::FixedCostRepository;
pub mod sporadic_cost_repo;
pub use sporadic_cost_repo::SporadicCostRepository;
pub mod variable_cost_repo;
pub use variable_cost_repo::VariableCostRepository;
pub mod revenue_repo;
pub use revenue_repo::RevenueRepository;

pub mod record_source;
pub use record_source::PgRecordSource;
