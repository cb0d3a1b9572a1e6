//! Combustion request factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Molar volume used by requests unless overridden.
pub const DEFAULT_MOLAR_VOLUME: f64 = 22.414;

/// Factory for creating combustion requests in any status.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::combustion_request::CombustionRequestFactory;
///
/// let request = CombustionRequestFactory::new(&db, user.id)
///     .status("submitted")
///     .molar_volume(Some(24.0))
///     .build()
///     .await?;
/// ```
pub struct CombustionRequestFactory<'a> {
    db: &'a DatabaseConnection,
    creator_id: i32,
    status: String,
    moderator_id: Option<i32>,
    molar_volume: Option<f64>,
    calculation_token: Option<String>,
    calculation_status: Option<String>,
}

impl<'a> CombustionRequestFactory<'a> {
    /// Creates a new factory for a `draft` request with the default molar volume.
    pub fn new(db: &'a DatabaseConnection, creator_id: i32) -> Self {
        Self {
            db,
            creator_id,
            status: "draft".to_string(),
            moderator_id: None,
            molar_volume: Some(DEFAULT_MOLAR_VOLUME),
            calculation_token: None,
            calculation_status: None,
        }
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn moderator_id(mut self, moderator_id: Option<i32>) -> Self {
        self.moderator_id = moderator_id;
        self
    }

    pub fn molar_volume(mut self, molar_volume: Option<f64>) -> Self {
        self.molar_volume = molar_volume;
        self
    }

    /// Puts the request into a running calculation session guarded by `token`.
    pub fn processing(mut self, token: impl Into<String>) -> Self {
        self.calculation_token = Some(token.into());
        self.calculation_status = Some("processing".to_string());
        self
    }

    /// Builds and inserts the request entity into the database.
    pub async fn build(self) -> Result<entity::combustion_request::Model, DbErr> {
        let now = Utc::now();
        entity::combustion_request::ActiveModel {
            id: ActiveValue::NotSet,
            status: ActiveValue::Set(self.status),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            finished_at: ActiveValue::Set(None),
            creator_id: ActiveValue::Set(self.creator_id),
            moderator_id: ActiveValue::Set(self.moderator_id),
            molar_volume: ActiveValue::Set(self.molar_volume),
            final_result: ActiveValue::Set(None),
            calculation_token: ActiveValue::Set(self.calculation_token),
            calculation_status: ActiveValue::Set(self.calculation_status),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a draft request for the given creator.
pub async fn create_draft(
    db: &DatabaseConnection,
    creator_id: i32,
) -> Result<entity::combustion_request::Model, DbErr> {
    CombustionRequestFactory::new(db, creator_id).build().await
}

/// Creates a submitted request for the given creator.
pub async fn create_submitted(
    db: &DatabaseConnection,
    creator_id: i32,
) -> Result<entity::combustion_request::Model, DbErr> {
    CombustionRequestFactory::new(db, creator_id)
        .status("submitted")
        .build()
        .await
}
