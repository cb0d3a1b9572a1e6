//! Service layer for business logic and orchestration.
//!
//! Services sit between the controllers and the repositories. They enforce lifecycle and
//! ownership rules, coordinate several repositories or external collaborators, and work with
//! domain models rather than DTOs or entity models.

pub mod auth;
pub mod calculation;
pub mod combustion;
pub mod fuel;
pub mod image;
pub mod user;

#[cfg(test)]
mod test;
