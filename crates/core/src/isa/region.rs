//! Register region value object.
//!
//! A `RegisterRegion` describes one operand: where its first element sits in
//! the register file, and how later channels step away from it. It is built
//! once per decoded descriptor and never mutated afterwards.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::element::ElementType;
use super::parse::parse_region;
use crate::common::{RegionError, RegionField};

/// A normalized Gen-ISA register region.
///
/// Fields are private so every instance goes through [`RegisterRegion::new`],
/// which enforces `width > 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct RegisterRegion {
    reg_num: u32,
    sub_reg_num: u32,
    vertical: u32,
    eu_type: ElementType,
    width: u32,
    horizontal: u32,
}

impl RegisterRegion {
    /// Creates a region from already-typed fields.
    ///
    /// # Arguments
    ///
    /// * `reg_num` - Base register index.
    /// * `sub_reg_num` - Sub-register index, in elements.
    /// * `vertical` - Row-to-row stride, in elements.
    /// * `eu_type` - Element type.
    /// * `width` - Elements per row; must be non-zero.
    /// * `horizontal` - Element-to-element stride inside a row, in elements.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidRegionField`] for [`RegionField::Width`]
    /// when `width` is zero.
    pub fn new(
        reg_num: u32,
        sub_reg_num: u32,
        vertical: u32,
        eu_type: ElementType,
        width: u32,
        horizontal: u32,
    ) -> Result<Self, RegionError> {
        if width == 0 {
            return Err(RegionError::invalid_field(RegionField::Width, width));
        }
        Ok(Self {
            reg_num,
            sub_reg_num,
            vertical,
            eu_type,
            width,
            horizontal,
        })
    }

    /// Base register index.
    #[inline]
    pub const fn reg_num(&self) -> u32 {
        self.reg_num
    }

    /// Sub-register index, in elements.
    #[inline]
    pub const fn sub_reg_num(&self) -> u32 {
        self.sub_reg_num
    }

    /// Vertical stride, in elements.
    #[inline]
    pub const fn vertical(&self) -> u32 {
        self.vertical
    }

    /// Element type.
    #[inline]
    pub const fn eu_type(&self) -> ElementType {
        self.eu_type
    }

    /// Elements per row. Always non-zero.
    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Horizontal stride, in elements.
    #[inline]
    pub const fn horizontal(&self) -> u32 {
        self.horizontal
    }

    /// Size of one element in bytes.
    #[inline]
    pub const fn bytes(&self) -> u32 {
        self.eu_type.bytes()
    }

    /// Returns `true` when every channel reads the same element.
    pub const fn is_broadcast(&self) -> bool {
        self.vertical == 0 && self.horizontal == 0
    }
}

impl FromStr for RegisterRegion {
    type Err = RegionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_region(s)
    }
}

impl fmt::Display for RegisterRegion {
    /// Writes the canonical long form, e.g. `r6.0<1;1,0>:w`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "r{}.{}<{};{},{}>:{}",
            self.reg_num, self.sub_reg_num, self.vertical, self.width, self.horizontal, self.eu_type
        )
    }
}
