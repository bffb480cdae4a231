//! # Formats
//!
//! On-disk representation of the dataset. File I/O lives in the store.

pub mod codec;

pub use codec::{DecodeOutcome, decode, encode};
