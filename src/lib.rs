//! Core library for dirflat: directory tree rendering and flat copying.
//!
//! This crate provides modules for ignore filtering, visual tree rendering,
//! flattening file copies into a single destination, and report writing.

pub mod error;
pub mod filter;
pub mod flatten;
pub mod report;
pub mod tree;

pub use error::{FlattenError, Result};
