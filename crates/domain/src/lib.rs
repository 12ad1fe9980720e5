//! reddit-relay domain crate
//!
//! This crate contains the core pipeline logic following hexagonal architecture:
//! - `model`: Domain entities and value objects
//! - `ports`: Trait definitions for external dependencies (adapters)
//! - `usecases`: Fetch orchestration, dedup filtering, display caching, and
//!   the poll cycle that ties them together

pub mod model;
pub mod ports;
pub mod usecases;

pub use model::*;
pub use ports::*;
