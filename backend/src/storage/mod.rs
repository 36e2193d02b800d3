//! # Storage Module
//!
//! Holds the authoritative birthday records for the application session.
//!
//! This module abstracts away the specific storage implementation details and
//! provides a consistent interface for the domain layer. The only backend
//! shipped today keeps everything in memory for the lifetime of the process;
//! the trait boundary exists so a persistent implementation could be dropped
//! in without touching domain logic.
//!
//! ## Key Responsibilities
//!
//! - **Single Source of Truth**: owning the id -> birthday mapping
//! - **Immutable Snapshots**: every mutation installs a fresh map, so readers
//!   holding the previous snapshot never observe partial updates
//! - **Storage Abstraction**: a consistent API regardless of backend
//!
//! ## Design Principles
//!
//! - **Repository Pattern**: clean separation between domain and data access
//! - **Dependency Inversion**: the domain depends on the `BirthdayStorage`
//!   trait, not on a concrete repository
//! - **Testability**: the in-memory repository doubles as the test fixture

pub mod traits;
pub mod memory;

pub use traits::*;
pub use memory::*;
