//! Channel address generation.
//!
//! Walks the SIMD channels of an instruction and computes, for each one, the
//! register and byte offsets of the element it touches. The walk uses a
//! two-stage stride:
//! 1. **Horizontal:** Within a row of `width` channels, each element is
//!    `horizontal * bytes` past the previous one, in the row's register.
//! 2. **Vertical:** After each row, the row start moves `vertical * bytes`
//!    forward and wraps into the next register every `register_bytes` bytes.
//!
//! Only the row start wraps. Offsets inside a row are relative to the row's
//! register and may run past its end.
//!
//! A broadcast region (`<0;1,0>`) repeats one address; a packed region
//! (`<w;w,1>`) yields sequential addresses.

use std::fmt;
use std::iter::FusedIterator;

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::common::RegionError;
use crate::config::{GeneratorConfig, PartitionPolicy};
use crate::isa::{RegisterRegion, parse_region};

/// Register byte occupancy map built from an address sequence.
pub mod map;

pub use map::RegisterMap;

/// The element address of one SIMD channel.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Address {
    /// Physical register index.
    pub register: u64,
    /// Consecutive byte offsets of the element, relative to the start of `register`.
    pub offsets: Vec<u64>,
}

impl Address {
    /// Creates an address from a register and its byte offsets.
    pub fn new(register: u64, offsets: impl Into<Vec<u64>>) -> Self {
        Self {
            register,
            offsets: offsets.into(),
        }
    }

    /// First byte offset of the element.
    pub fn start(&self) -> Option<u64> {
        self.offsets.first().copied()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{} {:?}", self.register, self.offsets)
    }
}

/// Lazy sequence of channel addresses for one region.
///
/// The only state is the current row start `(y, x0)`, the lane inside the
/// row, and the number of rows left. Clone it to replay the sequence.
#[derive(Clone, Debug)]
pub struct RegionAddresses {
    register_bytes: u64,
    element_bytes: u64,
    width: u32,
    horizontal: u64,
    vertical: u64,
    rows_left: u32,
    lane: u32,
    y: u64,
    x0: u64,
}

impl RegionAddresses {
    fn new(region: &RegisterRegion, rows: u32, register_bytes: u32) -> Self {
        let element_bytes = u64::from(region.bytes());
        Self {
            register_bytes: u64::from(register_bytes),
            element_bytes,
            width: region.width(),
            horizontal: u64::from(region.horizontal()),
            vertical: u64::from(region.vertical()),
            rows_left: rows,
            lane: 0,
            y: u64::from(region.reg_num()),
            x0: u64::from(region.sub_reg_num()) * element_bytes,
        }
    }

    /// Builds the address of the element starting `x` bytes into register `y`.
    ///
    /// `x` is clamped so the element's last offset stays representable.
    fn element_at(&self, x: u64) -> Address {
        let start = x.min(u64::MAX - self.element_bytes);
        Address {
            register: self.y,
            offsets: (start..start + self.element_bytes).collect(),
        }
    }

    /// Moves the row start by the vertical stride, carrying whole registers into `y`.
    fn advance_row(&mut self) {
        let cursor = self.x0 + self.vertical * self.element_bytes;
        self.y = self.y.saturating_add(cursor / self.register_bytes);
        self.x0 = cursor % self.register_bytes;
        trace!(y = self.y, x0 = self.x0, rows_left = self.rows_left, "advanced region row");
    }

    fn remaining(&self) -> usize {
        self.rows_left as usize * self.width as usize - self.lane as usize
    }
}

impl Iterator for RegionAddresses {
    type Item = Address;

    fn next(&mut self) -> Option<Address> {
        if self.rows_left == 0 {
            return None;
        }

        let x = u64::from(self.lane)
            .saturating_mul(self.horizontal)
            .saturating_mul(self.element_bytes)
            .saturating_add(self.x0);
        let address = self.element_at(x);

        self.lane += 1;
        if self.lane == self.width {
            self.lane = 0;
            self.rows_left -= 1;
            self.advance_row();
        }
        Some(address)
    }

    /// Skips whole rows and lanes arithmetically instead of building the
    /// skipped addresses.
    fn nth(&mut self, mut n: usize) -> Option<Address> {
        while n > 0 && self.rows_left > 0 {
            let in_row = (self.width - self.lane) as usize;
            if n < in_row {
                self.lane += n as u32;
                break;
            }
            n -= in_row;
            self.lane = 0;
            self.rows_left -= 1;
            self.advance_row();
        }
        self.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for RegionAddresses {}

impl FusedIterator for RegionAddresses {}

/// Generates the channel addresses of `region` with the default configuration.
///
/// # Arguments
///
/// * `simd_width` - Channel count of the modelled instruction.
/// * `region` - The operand region.
///
/// # Errors
///
/// See [`generate_with`].
pub fn generate(simd_width: u32, region: &RegisterRegion) -> Result<RegionAddresses, RegionError> {
    generate_with(simd_width, region, &GeneratorConfig::default())
}

/// Generates the channel addresses of `region`.
///
/// The sequence is computed lazily and holds `simd_width` addresses when the
/// SIMD width is a multiple of the region width. Calling this again with the
/// same inputs yields the same sequence.
///
/// # Arguments
///
/// * `simd_width` - Channel count of the modelled instruction.
/// * `region` - The operand region.
/// * `config` - Register size and partition policy.
///
/// # Errors
///
/// * [`RegionError::InvalidSimdWidth`] if `simd_width` is zero.
/// * [`RegionError::NonExactChannelPartition`] if `simd_width` is not a
///   multiple of the region width and the policy is
///   [`PartitionPolicy::Strict`].
pub fn generate_with(
    simd_width: u32,
    region: &RegisterRegion,
    config: &GeneratorConfig,
) -> Result<RegionAddresses, RegionError> {
    if simd_width == 0 {
        return Err(RegionError::InvalidSimdWidth);
    }

    let width = region.width();
    let rows = simd_width / width;
    let dropped = simd_width % width;
    if dropped != 0 {
        match config.partition {
            PartitionPolicy::Strict => {
                return Err(RegionError::NonExactChannelPartition { simd_width, width });
            }
            PartitionPolicy::Truncate => {
                warn!(%region, simd_width, dropped, "SIMD width is not a multiple of region width; dropping trailing channels");
            }
        }
    }

    // Config::validate rejects zero; hand-built configs must not divide by zero.
    let register_bytes = config.register_bytes.max(1);
    debug!(%region, simd_width, rows, register_bytes, "generating region addresses");
    Ok(RegionAddresses::new(region, rows, register_bytes))
}

/// Parses `text` and generates its channel addresses with the default configuration.
///
/// # Errors
///
/// Any parse error from [`parse_region`] or generation error from [`generate`].
pub fn decode(text: &str, simd_width: u32) -> Result<RegionAddresses, RegionError> {
    let region = parse_region(text)?;
    generate(simd_width, &region)
}
