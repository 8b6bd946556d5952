//! Business logic services.

pub mod appeal;

pub use appeal::AppealService;
