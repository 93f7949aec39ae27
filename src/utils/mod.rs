//! Small helpers shared across layers.
//!
//! - [`db_error`] - Classification of `sqlx` errors (unique/foreign key violations, connectivity)

pub mod db_error;
