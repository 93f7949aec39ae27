//! Domain layer containing business entities and storage contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`registry`] - The set of channels publication status is aggregated over
//! - [`repositories`] - Data access trait definitions
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure
//! - Repository traits define contracts implemented by the infrastructure layer
//! - Business rules live in services (see [`crate::application::services`])

pub mod entities;
pub mod registry;
pub mod repositories;
