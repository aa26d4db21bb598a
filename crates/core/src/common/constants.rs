//! Register-file and descriptor grammar constants.

/// Size of one general register file (GRF) register in bytes.
///
/// The byte cursor rolls over into the next register index at this boundary.
pub const REGISTER_BYTES: u32 = 32;

/// Largest register size a configuration may declare.
///
/// Gen register files use 32- or 64-byte registers; the bound keeps byte
/// maps small.
pub const MAX_REGISTER_BYTES: u32 = 256;

/// Region width used when a descriptor omits the `;width,horizontal` group.
///
/// `r6.0<1>:w` is read as `r6.0<1;1,0>:w`.
pub const DEFAULT_REGION_WIDTH: u32 = 1;

/// Horizontal stride used when a descriptor omits the `;width,horizontal` group.
pub const DEFAULT_HORIZONTAL_STRIDE: u32 = 0;
