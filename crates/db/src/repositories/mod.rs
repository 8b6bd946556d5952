//! Database repositories.

pub mod appeal;

pub use appeal::{AppealRepository, CreatedAtFilter};
