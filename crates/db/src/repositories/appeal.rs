//! Appeal repository.

use std::sync::Arc;

use appeals_common::{AppError, AppResult};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

use crate::entities::{
    Appeal,
    appeal::{self, AppealStatus},
};

/// Filter over the `created_at` column.
///
/// Both parts may be present at once; the resulting conditions are ANDed
/// together, matching the merge behavior of the query operation.
#[derive(Debug, Clone, Default)]
pub struct CreatedAtFilter {
    /// Exact-match instant.
    pub exact: Option<DateTime<Utc>>,
    /// Inclusive range bounds.
    pub between: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

impl CreatedAtFilter {
    /// Returns true if no condition has been set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.exact.is_none() && self.between.is_none()
    }
}

/// Repository for appeal operations.
#[derive(Clone)]
pub struct AppealRepository {
    db: Arc<DatabaseConnection>,
}

impl AppealRepository {
    /// Create a new appeal repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find appeal by ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<appeal::Model>> {
        Appeal::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find all appeals with the given status, in stable retrieval order.
    pub async fn find_by_status(&self, status: AppealStatus) -> AppResult<Vec<appeal::Model>> {
        Appeal::find()
            .filter(appeal::Column::Status.eq(status))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find appeals matching a `created_at` filter. An empty filter returns
    /// all appeals.
    pub async fn find_by_created_at(
        &self,
        filter: &CreatedAtFilter,
    ) -> AppResult<Vec<appeal::Model>> {
        let mut condition = Condition::all();
        if let Some(exact) = filter.exact {
            condition = condition.add(appeal::Column::CreatedAt.eq(exact));
        }
        if let Some((start, end)) = filter.between {
            condition = condition.add(appeal::Column::CreatedAt.between(start, end));
        }

        Appeal::find()
            .filter(condition)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a new appeal with status `New` and fresh timestamps.
    pub async fn create(&self, theme: String, message: String) -> AppResult<appeal::Model> {
        let now = Utc::now();

        let active_model = appeal::ActiveModel {
            theme: Set(theme),
            message: Set(message),
            status: Set(AppealStatus::New),
            solution: Set(None),
            cancel_reason: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        active_model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Set an appeal's status to `InProgress`.
    pub async fn mark_in_progress(&self, id: i32) -> AppResult<appeal::Model> {
        let appeal = self.find_required(id).await?;

        let mut active: appeal::ActiveModel = appeal.into();
        active.status = Set(AppealStatus::InProgress);
        active.updated_at = Set(Utc::now());

        active
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Set an appeal's status to `Completed`, storing the solution verbatim.
    pub async fn mark_completed(&self, id: i32, solution: String) -> AppResult<appeal::Model> {
        let appeal = self.find_required(id).await?;

        let mut active: appeal::ActiveModel = appeal.into();
        active.status = Set(AppealStatus::Completed);
        active.solution = Set(Some(solution));
        active.updated_at = Set(Utc::now());

        active
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Set an appeal's status to `Cancelled`, storing the reason verbatim.
    pub async fn mark_cancelled(&self, id: i32, reason: String) -> AppResult<appeal::Model> {
        let appeal = self.find_required(id).await?;

        let mut active: appeal::ActiveModel = appeal.into();
        active.status = Set(AppealStatus::Cancelled);
        active.cancel_reason = Set(Some(reason));
        active.updated_at = Set(Utc::now());

        active
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn find_required(&self, id: i32) -> AppResult<appeal::Model> {
        self.find_by_id(id)
            .await?
            .ok_or(AppError::AppealNotFound(id))
    }
}
