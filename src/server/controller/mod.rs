//! HTTP handlers.
//!
//! Handlers authenticate the caller through `AuthGuard`, convert DTOs into params, call one
//! service and convert the domain result back into a DTO.

pub mod calculation;
pub mod combustion;
pub mod fuel;
pub mod user;
