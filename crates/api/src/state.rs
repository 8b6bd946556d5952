//! Shared application state.

use appeals_core::AppealService;

/// Application state.
#[derive(Clone)]
pub struct AppState {
    /// The appeal lifecycle service.
    pub appeal_service: AppealService,
}
