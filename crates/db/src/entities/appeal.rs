//! Appeal entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Appeal model: a support ticket tracked through a fixed status lifecycle.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "appeal")]
pub struct Model {
    /// Unique appeal ID, assigned by the database.
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Short subject of the appeal. Immutable after creation.
    pub theme: String,

    /// Full description of the appeal. Immutable after creation.
    #[sea_orm(column_type = "Text")]
    pub message: String,

    /// Current lifecycle status.
    pub status: AppealStatus,

    /// Resolution text, set only when the appeal is completed.
    #[sea_orm(column_type = "Text", nullable)]
    pub solution: Option<String>,

    /// Cancellation reason, set only when the appeal is cancelled.
    #[sea_orm(column_type = "Text", nullable)]
    pub cancel_reason: Option<String>,

    /// When the appeal was created. Never modified.
    pub created_at: DateTime<Utc>,

    /// When the appeal was last updated. Refreshed on every mutation.
    pub updated_at: DateTime<Utc>,
}

/// Appeal lifecycle status.
///
/// `New` is the initial status; `Completed` and `Cancelled` are terminal.
/// `Cancelled` is reachable from both `New` and `InProgress`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum AppealStatus {
    /// Freshly created, awaiting processing.
    #[sea_orm(string_value = "New")]
    New,
    /// Being worked on by an operator.
    #[sea_orm(string_value = "InProgress")]
    InProgress,
    /// Resolved with a solution. Terminal.
    #[sea_orm(string_value = "Completed")]
    Completed,
    /// Cancelled with a reason. Terminal.
    #[sea_orm(string_value = "Cancelled")]
    Cancelled,
}

/// Relationships.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
