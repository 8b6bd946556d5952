//! Appeal lifecycle service.
//!
//! Owns the appeal status state machine and the date-based query
//! construction. The service performs no logging and no transport-level
//! formatting; it returns typed failures only.

use appeals_common::{AppError, AppResult};
use appeals_db::entities::appeal::{self, AppealStatus};
use appeals_db::repositories::{AppealRepository, CreatedAtFilter};
use chrono::{DateTime, NaiveDate, Utc};

/// Service for managing the appeal lifecycle.
///
/// The default mode reproduces the historical behavior exactly: transition
/// operations do not inspect the current status, so re-triggering a
/// transition on a terminal appeal silently overwrites it. Constructing the
/// service via [`AppealService::with_strict_transitions`] enables guarded
/// mode, where transitions out of `Completed` or `Cancelled` fail with a
/// conflict error instead.
#[derive(Clone)]
pub struct AppealService {
    appeal_repo: AppealRepository,
    strict_transitions: bool,
}

impl AppealService {
    /// Create a new appeal service with lax transitions.
    #[must_use]
    pub const fn new(appeal_repo: AppealRepository) -> Self {
        Self {
            appeal_repo,
            strict_transitions: false,
        }
    }

    /// Create a new appeal service that rejects transitions out of a
    /// terminal status.
    #[must_use]
    pub const fn with_strict_transitions(appeal_repo: AppealRepository) -> Self {
        Self {
            appeal_repo,
            strict_transitions: true,
        }
    }

    /// List all appeals currently in status `New`.
    pub async fn list_started(&self) -> AppResult<Vec<appeal::Model>> {
        self.appeal_repo.find_by_status(AppealStatus::New).await
    }

    /// Create a new appeal with status `New`.
    ///
    /// Non-emptiness of `theme` and `message` is enforced by the request
    /// validation at the API boundary; this operation accepts
    /// already-validated strings.
    pub async fn create(&self, theme: String, message: String) -> AppResult<appeal::Model> {
        self.appeal_repo.create(theme, message).await
    }

    /// Move an appeal to `InProgress`.
    pub async fn start_processing(&self, id: i32) -> AppResult<appeal::Model> {
        if self.strict_transitions {
            let appeal = self.find_required(id).await?;
            match appeal.status {
                AppealStatus::New => {}
                AppealStatus::InProgress => {
                    return Err(AppError::Conflict(format!(
                        "appeal {id} is already in progress"
                    )));
                }
                AppealStatus::Completed | AppealStatus::Cancelled => {
                    return Err(terminal_transition(id, appeal.status));
                }
            }
        }

        self.appeal_repo.mark_in_progress(id).await
    }

    /// Complete an appeal, storing the solution verbatim.
    pub async fn complete_appeal(&self, id: i32, solution: String) -> AppResult<appeal::Model> {
        if self.strict_transitions {
            let appeal = self.find_required(id).await?;
            if matches!(
                appeal.status,
                AppealStatus::Completed | AppealStatus::Cancelled
            ) {
                return Err(terminal_transition(id, appeal.status));
            }
        }

        self.appeal_repo.mark_completed(id, solution).await
    }

    /// Cancel an appeal, storing the reason verbatim.
    pub async fn cancel_appeal(&self, id: i32, reason: String) -> AppResult<appeal::Model> {
        if self.strict_transitions {
            let appeal = self.find_required(id).await?;
            if matches!(
                appeal.status,
                AppealStatus::Completed | AppealStatus::Cancelled
            ) {
                return Err(terminal_transition(id, appeal.status));
            }
        }

        self.appeal_repo.mark_cancelled(id, reason).await
    }

    /// Cancel every appeal currently in `InProgress`.
    ///
    /// Each cancellation captures its own wall-clock timestamp; the batch
    /// shares no single instant and has no atomicity guarantee. Returns the
    /// updated appeals, or an empty list when nothing was in progress.
    pub async fn cancel_all_in_progress(&self) -> AppResult<Vec<appeal::Model>> {
        let appeals = self
            .appeal_repo
            .find_by_status(AppealStatus::InProgress)
            .await?;

        let mut cancelled = Vec::with_capacity(appeals.len());
        for appeal in appeals {
            let now = Utc::now();
            let reason = format!("Cancelled by system appeal_id: {}, at {}", appeal.id, now);
            cancelled.push(self.appeal_repo.mark_cancelled(appeal.id, reason).await?);
        }

        Ok(cancelled)
    }

    /// Query appeals by creation date.
    ///
    /// `date` builds an exact-match condition; `start_date` plus `end_date`
    /// build an inclusive range. Supplying both kinds ANDs the conditions
    /// together. A lone range bound is ignored, and no parameters at all
    /// return every appeal. Date strings are parsed up front and fail with
    /// a validation error before any query is issued.
    pub async fn query_by_date(
        &self,
        date: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> AppResult<Vec<appeal::Model>> {
        let mut filter = CreatedAtFilter::default();

        if let Some(date) = date {
            filter.exact = Some(parse_date(date)?);
        }
        if let (Some(start), Some(end)) = (start_date, end_date) {
            filter.between = Some((parse_date(start)?, parse_date(end)?));
        }

        self.appeal_repo.find_by_created_at(&filter).await
    }

    async fn find_required(&self, id: i32) -> AppResult<appeal::Model> {
        self.appeal_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::AppealNotFound(id))
    }
}

fn terminal_transition(id: i32, status: AppealStatus) -> AppError {
    AppError::Conflict(format!("appeal {id} is already {status:?}"))
}

/// Parse a date string into a UTC instant.
///
/// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates; the latter are
/// interpreted as midnight UTC.
fn parse_date(input: &str) -> AppResult<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt.and_utc());
        }
    }
    Err(AppError::Validation(format!("unparseable date: {input}")))
}
