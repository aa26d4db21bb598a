//! Register byte occupancy map.
//!
//! Collects an address sequence into a per-register view of which channels
//! touch which bytes, and renders it as a text grid:
//!
//! ```text
//! byte  0  1  2  3 ...
//! r4    .  .  0  0 ...
//! ```
//!
//! A `.` marks an untouched byte, a number the single channel using it, and
//! `*` a byte shared by several channels (broadcast or overlapping regions).

use std::collections::BTreeMap;
use std::fmt;

use super::Address;
use crate::common::MAX_REGISTER_BYTES;

/// Per-register, per-byte channel occupancy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterMap {
    register_bytes: u32,
    registers: BTreeMap<u64, Vec<Vec<u32>>>,
}

impl RegisterMap {
    /// Records every byte of every address against its channel number.
    ///
    /// The channel number is the position of the address in `addresses`.
    /// Offsets at or past `register_bytes` are recorded against the
    /// following registers.
    ///
    /// # Arguments
    ///
    /// * `addresses` - Channel addresses, in channel order.
    /// * `register_bytes` - Register size in bytes, clamped to
    ///   `1..=MAX_REGISTER_BYTES`.
    pub fn from_addresses<I>(addresses: I, register_bytes: u32) -> Self
    where
        I: IntoIterator<Item = Address>,
    {
        let register_bytes = register_bytes.clamp(1, MAX_REGISTER_BYTES);
        let row_len = u64::from(register_bytes);
        let mut registers: BTreeMap<u64, Vec<Vec<u32>>> = BTreeMap::new();

        for (channel, address) in addresses.into_iter().enumerate() {
            for offset in address.offsets {
                let register = address.register.saturating_add(offset / row_len);
                let byte = (offset % row_len) as usize;
                let row = registers
                    .entry(register)
                    .or_insert_with(|| vec![Vec::new(); register_bytes as usize]);
                row[byte].push(channel as u32);
            }
        }

        Self {
            register_bytes,
            registers,
        }
    }

    /// Register size in bytes.
    pub const fn register_bytes(&self) -> u32 {
        self.register_bytes
    }

    /// Touched registers, in ascending order.
    pub fn registers(&self) -> impl Iterator<Item = u64> + '_ {
        self.registers.keys().copied()
    }

    /// Number of distinct registers touched.
    pub fn footprint(&self) -> usize {
        self.registers.len()
    }

    /// Channels that touch `byte` of `register`, in channel order.
    ///
    /// Returns an empty slice for untouched or out-of-range bytes.
    pub fn channels_at(&self, register: u64, byte: u32) -> &[u32] {
        self.registers
            .get(&register)
            .and_then(|row| row.get(byte as usize))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Number of decimal digits needed to print `n`.
const fn digits(mut n: u64) -> usize {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}

impl fmt::Display for RegisterMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let max_channel = self
            .registers
            .values()
            .flatten()
            .flatten()
            .copied()
            .max()
            .unwrap_or(0);
        let cell = digits(u64::from(max_channel)).max(digits(u64::from(self.register_bytes - 1)));
        let label = self
            .registers
            .keys()
            .map(|&r| digits(r) + 1)
            .max()
            .unwrap_or(1)
            .max("byte".len());

        write!(f, "{:<label$}", "byte")?;
        for byte in 0..self.register_bytes {
            write!(f, " {byte:>cell$}")?;
        }
        writeln!(f)?;

        for (register, row) in &self.registers {
            write!(f, "{:<label$}", format!("r{register}"))?;
            for channels in row {
                match channels.as_slice() {
                    [] => write!(f, " {:>cell$}", ".")?,
                    [channel] => write!(f, " {channel:>cell$}")?,
                    _ => write!(f, " {:>cell$}", "*")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
