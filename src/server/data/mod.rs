//! Database repository layer.
//!
//! Repositories wrap a borrowed `DatabaseConnection`, run SeaORM queries, and convert entity
//! models into domain models at the boundary. Lifecycle transitions are single conditional
//! `UPDATE` statements; callers inspect the affected row count to learn whether the guarded
//! transition actually happened.

pub mod combustion_request;
pub mod combustion_request_fuel;
pub mod fuel;
pub mod user;
