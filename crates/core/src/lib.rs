//! Intel Gen-ISA register region decoder.
//!
//! This crate turns region descriptors such as `r4.1<16;8,2>:w` into the
//! per-channel register addresses a SIMD instruction touches. It provides:
//! 1. **ISA:** Element types, the `RegisterRegion` value object, and the descriptor parser.
//! 2. **Addressing:** The channel address generator and the register byte map.
//! 3. **Configuration:** Register-file geometry, partition policy, and logging defaults.
//! 4. **Common:** Shared constants and error types.
//!
//! ```
//! use genreg_core::decode;
//!
//! let first = decode("r4.1<16;8,2>:w", 16)?.next();
//! assert_eq!(first.map(|a| (a.register, a.offsets)), Some((4, vec![2, 3])));
//! # Ok::<(), genreg_core::RegionError>(())
//! ```

/// Channel address generation and register byte maps.
pub mod addressing;
/// Common constants and error types.
pub mod common;
/// Decoder configuration (register-file geometry, partition policy, logging).
pub mod config;
/// Region descriptor model and parser.
pub mod isa;

/// One channel's element address.
pub use crate::addressing::Address;
/// Lazy per-channel address sequence; construct with [`generate`].
pub use crate::addressing::{RegionAddresses, decode, generate, generate_with};
/// Error type shared by the parser and the generator.
pub use crate::common::RegionError;
/// Root configuration type; use `Config::default()` or load it from JSON.
pub use crate::config::Config;
/// Parsed register region descriptor.
pub use crate::isa::{ElementType, RegisterRegion, parse_region};
