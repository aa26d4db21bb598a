//! Region descriptor parser.
//!
//! Accepts the fixed operand grammar
//!
//! ```text
//! r<regNum>.<subRegNum><<vertical>[;<width>,<horizontal>]>:<euType>
//! ```
//!
//! anchored at both ends. Numbers are ASCII decimal; the type suffix is a
//! word (`[A-Za-z0-9_]+`) looked up in the element table. When the
//! `;width,horizontal` group is omitted the grammar defaults apply
//! (`width = 1`, `horizontal = 0`).

use tracing::debug;

use super::element::ElementType;
use super::region::RegisterRegion;
use crate::common::{DEFAULT_HORIZONTAL_STRIDE, DEFAULT_REGION_WIDTH, RegionError, RegionField};

/// Byte cursor over descriptor text.
struct Cursor<'src> {
    text: &'src str,
    pos: usize,
}

impl<'src> Cursor<'src> {
    const fn new(text: &'src str) -> Self {
        Self { text, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn error(&self, reason: &'static str) -> RegionError {
        RegionError::malformed(self.text, self.pos, reason)
    }

    /// Consumes `byte` or fails with `reason`.
    fn expect(&mut self, byte: u8, reason: &'static str) -> Result<(), RegionError> {
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(reason))
        }
    }

    /// Consumes `byte` if it is next.
    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consumes the longest run of bytes satisfying `pred`.
    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'src str {
        let text = self.text;
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
        &text[start..self.pos]
    }

    /// Consumes a decimal number for `field`.
    ///
    /// A missing number is a grammar error; a number that does not fit in
    /// `u32` is a field error.
    fn number(&mut self, field: RegionField, reason: &'static str) -> Result<u32, RegionError> {
        let digits = self.take_while(|b| b.is_ascii_digit());
        if digits.is_empty() {
            return Err(self.error(reason));
        }
        digits
            .parse()
            .map_err(|_| RegionError::invalid_field(field, digits))
    }

    fn word(&mut self, reason: &'static str) -> Result<&'src str, RegionError> {
        let word = self.take_while(|b| b.is_ascii_alphanumeric() || b == b'_');
        if word.is_empty() {
            return Err(self.error(reason));
        }
        Ok(word)
    }

    fn finish(&self) -> Result<(), RegionError> {
        if self.pos == self.text.len() {
            Ok(())
        } else {
            Err(self.error("unexpected trailing input"))
        }
    }
}

/// Parses a region descriptor such as `r4.1<16;8,2>:w`.
///
/// # Arguments
///
/// * `text` - The descriptor. No surrounding whitespace is accepted.
///
/// # Returns
///
/// The normalized [`RegisterRegion`].
///
/// # Errors
///
/// * [`RegionError::MalformedDescriptor`] if `text` does not match the grammar.
/// * [`RegionError::InvalidRegionField`] for an unknown element type, a zero
///   width, or a number that overflows `u32`.
pub fn parse_region(text: &str) -> Result<RegisterRegion, RegionError> {
    let mut cur = Cursor::new(text);

    cur.expect(b'r', "expected `r`")?;
    let reg_num = cur.number(RegionField::RegNum, "expected register number")?;
    cur.expect(b'.', "expected `.`")?;
    let sub_reg_num = cur.number(RegionField::SubRegNum, "expected sub-register number")?;
    cur.expect(b'<', "expected `<`")?;
    let vertical = cur.number(RegionField::Vertical, "expected vertical stride")?;

    let (width, horizontal) = if cur.eat(b';') {
        let width = cur.number(RegionField::Width, "expected region width")?;
        cur.expect(b',', "expected `,`")?;
        let horizontal = cur.number(RegionField::Horizontal, "expected horizontal stride")?;
        (width, horizontal)
    } else {
        (DEFAULT_REGION_WIDTH, DEFAULT_HORIZONTAL_STRIDE)
    };

    cur.expect(b'>', "expected `>`")?;
    cur.expect(b':', "expected `:`")?;
    let eu_type: ElementType = cur.word("expected element type")?.parse()?;
    cur.finish()?;

    let region = RegisterRegion::new(reg_num, sub_reg_num, vertical, eu_type, width, horizontal)?;
    debug!(descriptor = text, %region, bytes = region.bytes(), "parsed register region");
    Ok(region)
}
