//! Application state shared across all request handlers.
//!
//! Built once in `main` and cloned into every handler through axum's state extraction.
//! Every field is cheap to clone: the database handle is a pool, and the remaining
//! collaborators sit behind `Arc`s.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::service::{
    auth::{deny_list::TokenDenyList, jwt::JwtCodec},
    calculation::{dispatcher::CalculationDispatcher, CalculationSettings},
    image::ImageStore,
};

#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: DatabaseConnection,

    /// Issues and verifies access tokens.
    pub jwt: JwtCodec,

    /// Tokens revoked through logout.
    pub deny_list: Arc<dyn TokenDenyList>,

    /// Storage for fuel card images.
    pub images: Arc<dyn ImageStore>,

    /// Runs calculator jobs detached from the request that started them.
    pub dispatcher: CalculationDispatcher,

    /// Callback URL and optional fixed token for calculation sessions.
    pub calculation: Arc<CalculationSettings>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        jwt: JwtCodec,
        deny_list: Arc<dyn TokenDenyList>,
        images: Arc<dyn ImageStore>,
        dispatcher: CalculationDispatcher,
        calculation: CalculationSettings,
    ) -> Self {
        Self {
            db,
            jwt,
            deny_list,
            images,
            dispatcher,
            calculation: Arc::new(calculation),
        }
    }
}
