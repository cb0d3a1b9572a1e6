//! Combustion request repository.
//!
//! Status changes are conditional updates guarded on the expected current status. Each
//! transition returns `true` only when it changed the row, which lets the service layer tell
//! a lost race or a wrong state apart from success.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection,
    DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::server::model::combustion::{
    CalculationStatus, CombustionFilter, CombustionRequest, RequestStatus, DEFAULT_MOLAR_VOLUME,
};

use entity::combustion_request::Column;

pub struct CombustionRequestRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CombustionRequestRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets a request by ID in any status, deleted included.
    pub async fn get_by_id(&self, id: i32) -> Result<Option<CombustionRequest>, DbErr> {
        entity::prelude::CombustionRequest::find_by_id(id)
            .one(self.db)
            .await?
            .map(CombustionRequest::from_entity)
            .transpose()
    }

    /// Finds the creator's current draft.
    pub async fn find_draft(&self, creator_id: i32) -> Result<Option<CombustionRequest>, DbErr> {
        entity::prelude::CombustionRequest::find()
            .filter(Column::CreatorId.eq(creator_id))
            .filter(Column::Status.eq(RequestStatus::Draft.as_str()))
            .order_by_asc(Column::Id)
            .one(self.db)
            .await?
            .map(CombustionRequest::from_entity)
            .transpose()
    }

    /// Creates an empty draft with the default molar volume.
    pub async fn create_draft(&self, creator_id: i32) -> Result<CombustionRequest, DbErr> {
        let now = Utc::now();
        let entity = entity::combustion_request::ActiveModel {
            status: ActiveValue::Set(RequestStatus::Draft.as_str().to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            finished_at: ActiveValue::Set(None),
            creator_id: ActiveValue::Set(creator_id),
            moderator_id: ActiveValue::Set(None),
            molar_volume: ActiveValue::Set(Some(DEFAULT_MOLAR_VOLUME)),
            final_result: ActiveValue::Set(None),
            calculation_token: ActiveValue::Set(None),
            calculation_status: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        CombustionRequest::from_entity(entity)
    }

    /// Lists requests matching the filter, newest first.
    ///
    /// Without an explicit status, drafts and deleted requests are left out.
    pub async fn get_all(&self, filter: CombustionFilter) -> Result<Vec<CombustionRequest>, DbErr> {
        let mut condition = Condition::all();

        if let Some(creator_id) = filter.creator_id {
            condition = condition.add(Column::CreatorId.eq(creator_id));
        }
        condition = match filter.status {
            Some(status) => condition.add(Column::Status.eq(status.as_str())),
            None => condition.add(Column::Status.is_not_in([
                RequestStatus::Draft.as_str(),
                RequestStatus::Deleted.as_str(),
            ])),
        };
        if let Some(start_date) = filter.start_date {
            condition = condition.add(Column::CreatedAt.gte(start_date));
        }
        if let Some(end_date) = filter.end_date {
            condition = condition.add(Column::CreatedAt.lte(end_date));
        }

        entity::prelude::CombustionRequest::find()
            .filter(condition)
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(CombustionRequest::from_entity)
            .collect()
    }

    /// Gets the token of the request's current calculation session, if any.
    pub async fn get_calculation_token(&self, id: i32) -> Result<Option<String>, DbErr> {
        Ok(entity::prelude::CombustionRequest::find_by_id(id)
            .one(self.db)
            .await?
            .and_then(|request| request.calculation_token))
    }

    /// Sets the molar volume of a draft.
    pub async fn set_molar_volume(&self, id: i32, molar_volume: f64) -> Result<bool, DbErr> {
        let result = entity::prelude::CombustionRequest::update_many()
            .col_expr(Column::MolarVolume, Expr::value(Some(molar_volume)))
            .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(RequestStatus::Draft.as_str()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// `draft → submitted`.
    pub async fn submit(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::CombustionRequest::update_many()
            .col_expr(Column::Status, Expr::value(RequestStatus::Submitted.as_str()))
            .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(RequestStatus::Draft.as_str()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// `submitted → completed | rejected` by a moderator, without a final result.
    pub async fn moderate(
        &self,
        id: i32,
        moderator_id: i32,
        status: RequestStatus,
    ) -> Result<bool, DbErr> {
        let now = Utc::now();
        let result = entity::prelude::CombustionRequest::update_many()
            .col_expr(Column::Status, Expr::value(status.as_str()))
            .col_expr(Column::ModeratorId, Expr::value(Some(moderator_id)))
            .col_expr(Column::FinishedAt, Expr::value(Some(now)))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(RequestStatus::Submitted.as_str()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// `draft | submitted → deleted`. Links are kept.
    pub async fn soft_delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::CombustionRequest::update_many()
            .col_expr(Column::Status, Expr::value(RequestStatus::Deleted.as_str()))
            .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(Column::Id.eq(id))
            .filter(Column::Status.is_in([
                RequestStatus::Draft.as_str(),
                RequestStatus::Submitted.as_str(),
            ]))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Stores a session token on a submitted request and marks it `processing`.
    ///
    /// `moderator_id` is written only when provided.
    pub async fn start_calculation(
        &self,
        id: i32,
        token: &str,
        moderator_id: Option<i32>,
    ) -> Result<bool, DbErr> {
        let mut update = entity::prelude::CombustionRequest::update_many()
            .col_expr(Column::CalculationToken, Expr::value(Some(token.to_string())))
            .col_expr(
                Column::CalculationStatus,
                Expr::value(Some(CalculationStatus::Processing.as_str().to_string())),
            )
            .col_expr(Column::UpdatedAt, Expr::value(Utc::now()));

        if let Some(moderator_id) = moderator_id {
            update = update.col_expr(Column::ModeratorId, Expr::value(Some(moderator_id)));
        }

        let result = update
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(RequestStatus::Submitted.as_str()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// `submitted → completed` at the end of a calculation session.
    ///
    /// Guarded on both the status and the `processing` marker, so among concurrent callers
    /// exactly one observes `true`.
    pub async fn complete_calculation(
        &self,
        id: i32,
        final_result: f64,
        moderator_id: i32,
        finished_at: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::CombustionRequest::update_many()
            .col_expr(Column::Status, Expr::value(RequestStatus::Completed.as_str()))
            .col_expr(Column::FinalResult, Expr::value(Some(final_result)))
            .col_expr(Column::ModeratorId, Expr::value(Some(moderator_id)))
            .col_expr(Column::FinishedAt, Expr::value(Some(finished_at)))
            .col_expr(Column::UpdatedAt, Expr::value(finished_at))
            .col_expr(
                Column::CalculationStatus,
                Expr::value(Some(CalculationStatus::Completed.as_str().to_string())),
            )
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(RequestStatus::Submitted.as_str()))
            .filter(Column::CalculationStatus.eq(CalculationStatus::Processing.as_str()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }
}
