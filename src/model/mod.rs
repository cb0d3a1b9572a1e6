//! Data transfer objects shared by the HTTP API.
//!
//! These types define the JSON bodies the server accepts and returns. They carry `serde`
//! derives for the wire format and `utoipa::ToSchema` for the OpenAPI document.

pub mod api;
pub mod calculation;
pub mod combustion;
pub mod fuel;
pub mod user;
