//! Shared foundational types used across the hdlscope workspace.
//!
//! This crate provides content hashing for identifying analyzed sources and
//! frequency values with unit parsing.

#![warn(missing_docs)]

pub mod frequency;
pub mod hash;

pub use frequency::{Frequency, ParseFrequencyError};
pub use hash::ContentHash;
