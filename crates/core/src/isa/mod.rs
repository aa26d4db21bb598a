//! Gen-ISA register region notation.
//!
//! This module models the operand region syntax of Gen assembly:
//! 1. **Element types:** The `:t` suffix and its byte size.
//! 2. **Regions:** The normalized `RegisterRegion` value object.
//! 3. **Parsing:** Descriptor text to `RegisterRegion`, with grammar defaults.

/// Element type tags and their byte sizes.
pub mod element;

/// Descriptor text parser.
pub mod parse;

/// Register region value object.
pub mod region;

pub use element::ElementType;
pub use parse::parse_region;
pub use region::RegisterRegion;
