//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with a `Factory` builder for customization and a
//! `create_*` function for quick default creation. Factories never create their foreign key
//! dependencies implicitly; pass the owning rows in, or use the `helpers` shortcuts.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let user = factory::create_user(&db).await?;
//! let fuel = factory::fuel::FuelFactory::new(&db)
//!     .title("Methane")
//!     .gas(true)
//!     .build()
//!     .await?;
//! let request = factory::create_draft(&db, user.id).await?;
//! let link = factory::create_link(&db, request.id, fuel.id).await?;
//! ```
//!
//! # Available Factories
//!
//! - `user` - Create buyer and moderator accounts
//! - `fuel` - Create catalog fuels
//! - `combustion_request` - Create requests in any status
//! - `combustion_request_fuel` - Create request-fuel links
//! - `helpers` - ID generation and multi-entity shortcuts

pub mod combustion_request;
pub mod combustion_request_fuel;
pub mod fuel;
pub mod helpers;
pub mod user;

pub use combustion_request::{create_draft, create_submitted};
pub use combustion_request_fuel::create_link;
pub use fuel::create_fuel;
pub use user::{create_moderator, create_user};
