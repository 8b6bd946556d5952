//! Database entities.

pub mod appeal;

pub use appeal::Entity as Appeal;
