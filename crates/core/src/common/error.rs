//! Region decoding error definitions.
//!
//! This module defines every way decoding a region can fail. It provides:
//! 1. **Grammar Errors:** Descriptor text that does not match the region grammar.
//! 2. **Field Errors:** Captured fields whose values fall outside their domain.
//! 3. **Partition Errors:** SIMD widths that cannot be split into whole rows.
//!
//! All errors are local and final: there is no transient failure mode, and a
//! caller should treat any of them as "this descriptor is not decodable".

use std::fmt;

use thiserror::Error;

/// Names a field of a register region descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegionField {
    /// Base register number (`r<n>`).
    RegNum,
    /// Sub-register number (`.<n>`).
    SubRegNum,
    /// Vertical stride (`<v;...>`).
    Vertical,
    /// Region width (`;w,...`).
    Width,
    /// Horizontal stride (`,h>`).
    Horizontal,
    /// Element type suffix (`:t`).
    ElementType,
}

impl RegionField {
    /// Returns the descriptor-level name of the field.
    pub const fn name(self) -> &'static str {
        match self {
            Self::RegNum => "regNum",
            Self::SubRegNum => "subRegNum",
            Self::Vertical => "vertical",
            Self::Width => "width",
            Self::Horizontal => "horizontal",
            Self::ElementType => "euType",
        }
    }
}

impl fmt::Display for RegionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors raised while parsing a region descriptor or generating its addresses.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegionError {
    /// The descriptor text does not match the region grammar.
    ///
    /// `position` is the byte offset at which matching failed.
    #[error("malformed region descriptor `{text}` at byte {position}: {reason}")]
    MalformedDescriptor {
        /// The offending descriptor text.
        text: String,
        /// Byte offset of the first character that failed to match.
        position: usize,
        /// What the grammar expected at `position`.
        reason: &'static str,
    },

    /// A captured field holds a value outside its domain.
    ///
    /// Raised for unknown element types, a zero width, and numbers too large
    /// for the model.
    #[error("invalid value `{value}` for region field `{field}`")]
    InvalidRegionField {
        /// The field that failed validation.
        field: RegionField,
        /// The rejected value, as written.
        value: String,
    },

    /// The SIMD width is not a whole number of region rows.
    #[error("SIMD width {simd_width} is not a multiple of region width {width}")]
    NonExactChannelPartition {
        /// Channel count of the modelled instruction.
        simd_width: u32,
        /// Elements per region row.
        width: u32,
    },

    /// The SIMD width is zero.
    #[error("SIMD width must be at least one channel")]
    InvalidSimdWidth,
}

impl RegionError {
    /// Creates a [`RegionError::MalformedDescriptor`] for `text`.
    pub(crate) fn malformed(text: &str, position: usize, reason: &'static str) -> Self {
        Self::MalformedDescriptor {
            text: text.to_owned(),
            position,
            reason,
        }
    }

    /// Creates a [`RegionError::InvalidRegionField`] from any displayable value.
    pub(crate) fn invalid_field(field: RegionField, value: impl fmt::Display) -> Self {
        Self::InvalidRegionField {
            field,
            value: value.to_string(),
        }
    }
}
