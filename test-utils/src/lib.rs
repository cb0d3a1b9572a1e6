//! Fuelcalc Test Utils
//!
//! Shared testing utilities for the fuelcalc backend. The crate offers a builder for test
//! contexts backed by in-memory SQLite databases, plus factories that insert fuels, users,
//! combustion requests and their fuel links with sensible defaults.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn adds_fuel_to_draft() -> Result<(), sea_orm::DbErr> {
//!     let test = TestBuilder::new().with_combustion_tables().build().await.unwrap();
//!     let db = test.db.as_ref().unwrap();
//!
//!     let user = factory::create_user(db).await?;
//!     let fuel = factory::create_fuel(db).await?;
//!     // ...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
