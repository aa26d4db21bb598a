//! Common types shared by the region decoder.
//!
//! This module provides the building blocks used across the crate:
//! 1. **Constants:** Register-file geometry and descriptor grammar defaults.
//! 2. **Error Handling:** The `RegionError` type and the `RegionField` tag it carries.

/// Register-file and grammar constants.
pub mod constants;

/// Error types for parsing and address generation.
pub mod error;

pub use constants::{
    DEFAULT_HORIZONTAL_STRIDE, DEFAULT_REGION_WIDTH, MAX_REGISTER_BYTES, REGISTER_BYTES,
};
pub use error::{RegionError, RegionField};
