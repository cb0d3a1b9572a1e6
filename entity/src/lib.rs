//! SeaORM entities for the fuel combustion calculation schema.

pub mod prelude;

pub mod combustion_request;
pub mod combustion_request_fuel;
pub mod fuel;
pub mod user;
