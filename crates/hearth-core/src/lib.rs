//! # hearth-core
//!
//! The persistent record store for Hearth - THE LOGIC.
//!
//! Hearth keeps the records of a small community: scheduled events,
//! technical-support requests and (eventually) volunteers. This crate owns
//! that dataset and everything with real invariants:
//! - Sequential, never-reused ids per collection
//! - Full, atomic saves after every mutation
//! - Recovery from a missing or corrupt data file
//! - A stable display order for events
//!
//! ## Architectural Constraints
//!
//! - [`RecordStore`] is the only mutator of the dataset
//! - Has NO async, NO network dependencies (pure Rust)
//! - Presentation (HTTP, HTML, forms) lives outside this crate and calls in
//!   with plain values

// =============================================================================
// MODULES
// =============================================================================

pub mod clock;
pub mod config;
pub mod formats;
pub mod ordering;
pub mod primitives;
pub mod seeding;
pub mod store;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    Dataset, Event, EventId, HearthError, SupportId, SupportRequest, SupportStatus,
    ValidationError,
};

// =============================================================================
// RE-EXPORTS: Store
// =============================================================================

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::StoreConfig;
pub use formats::{DecodeOutcome, decode, encode};
pub use ordering::{OrderingPolicy, ordered_for_display, select_policy};
pub use seeding::SeedPolicy;
pub use store::{LoadSource, RecordStore};
