//! Element type tags.
//!
//! The element type is the unit in which a region's sub-register number and
//! strides are expressed. Its byte size scales every cursor step of the
//! address generator.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::{RegionError, RegionField};

/// Element type of a register region (the `:t` descriptor suffix).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    /// Unsigned byte.
    Ub,
    /// Signed byte.
    B,
    /// Unsigned word.
    Uw,
    /// Signed word.
    W,
    /// Unsigned doubleword.
    Ud,
    /// Signed doubleword.
    D,
    /// Unsigned quadword.
    Uq,
    /// Signed quadword.
    Q,
    /// Packed unsigned half-byte vector.
    Uv,
    /// Packed signed half-byte vector.
    V,
    /// Half-precision float.
    Hf,
    /// Single-precision float.
    F,
    /// Double-precision float.
    Df,
    /// Packed restricted float vector.
    Vf,
}

impl ElementType {
    /// Every element type, in descriptor table order.
    pub const ALL: [Self; 14] = [
        Self::Ub,
        Self::B,
        Self::Uw,
        Self::W,
        Self::Ud,
        Self::D,
        Self::Uq,
        Self::Q,
        Self::Uv,
        Self::V,
        Self::Hf,
        Self::F,
        Self::Df,
        Self::Vf,
    ];

    /// Returns the size of one element in bytes.
    ///
    /// `uq` and `q` are sized at 4 bytes, matching the region tables this
    /// decoder reproduces.
    pub const fn bytes(self) -> u32 {
        match self {
            Self::Ub | Self::B => 1,
            Self::Uw | Self::W | Self::Uv | Self::V | Self::Hf => 2,
            Self::Ud | Self::D | Self::Uq | Self::Q | Self::F | Self::Vf => 4,
            Self::Df => 8,
        }
    }

    /// Returns `true` for the floating-point types (`hf`, `f`, `df`, `vf`).
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Hf | Self::F | Self::Df | Self::Vf)
    }

    /// Returns the descriptor suffix for this type.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Ub => "ub",
            Self::B => "b",
            Self::Uw => "uw",
            Self::W => "w",
            Self::Ud => "ud",
            Self::D => "d",
            Self::Uq => "uq",
            Self::Q => "q",
            Self::Uv => "uv",
            Self::V => "v",
            Self::Hf => "hf",
            Self::F => "f",
            Self::Df => "df",
            Self::Vf => "vf",
        }
    }
}

impl FromStr for ElementType {
    type Err = RegionError;

    /// Parses a descriptor suffix such as `w` or `hf`.
    ///
    /// Matching is case-sensitive; unknown suffixes yield
    /// [`RegionError::InvalidRegionField`] for [`RegionField::ElementType`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.mnemonic() == s)
            .ok_or_else(|| RegionError::invalid_field(RegionField::ElementType, s))
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
